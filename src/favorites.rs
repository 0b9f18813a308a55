use std::time::{SystemTime, UNIX_EPOCH};

use crate::Palette;

/// A palette the user chose to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Favorite {
    /// Unique within its list, increasing in save order.
    pub id: u64,
    pub palette: Vec<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// Saved palettes, oldest first.
///
/// Persisting the list is up to the host; with the `serde` feature it serializes as a plain array of
/// `{ id, palette, timestamp }` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Favorites {
    entries: Vec<Favorite>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save `palette` stamped with the current time.
    pub fn save(&mut self, palette: &Palette) -> &Favorite {
        self.save_at(palette, now_millis())
    }

    /// Save `palette` stamped with `timestamp` (milliseconds since the Unix epoch).
    ///
    /// The id is the timestamp, bumped past the newest id when two saves land in the same millisecond.
    pub fn save_at(&mut self, palette: &Palette, timestamp: u64) -> &Favorite {
        let id = match self.entries.iter().map(|favorite| favorite.id).max() {
            Some(last) if last >= timestamp => last + 1,
            _ => timestamp,
        };

        log::debug!("saved palette {id} to favorites");

        self.entries.push(Favorite {
            id,
            palette: palette.hex_colors(),
            timestamp,
        });

        &self.entries[self.entries.len() - 1]
    }

    pub fn get(&self, id: u64) -> Option<&Favorite> {
        self.entries.iter().find(|favorite| favorite.id == id)
    }

    pub fn remove(&mut self, id: u64) -> Option<Favorite> {
        let index = self.entries.iter().position(|favorite| favorite.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Favorite> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A one-line count for the user.
    pub fn summary(&self) -> String {
        match self.entries.len() {
            0 => "No saved palettes found".to_owned(),
            count => format!("You have {count} saved palettes."),
        }
    }
}

impl From<Vec<Favorite>> for Favorites {
    fn from(entries: Vec<Favorite>) -> Self {
        Self { entries }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

use crate::{
    config::Config,
    error::{Error, Result},
    favorites::{Favorite, Favorites},
    Palette, PaletteBuilder,
};
use image::RgbaImage;

/// The state of one capture-and-share workflow.
///
/// Holds the captured image, the palette generated from it and the saved favorites, so the caller doesn't need any
/// global state. The extractor itself keeps nothing between calls.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: Config,
    captured: Option<RgbaImage>,
    palette: Option<Palette>,
    favorites: Favorites,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            captured: None,
            palette: None,
            favorites: Favorites::new(),
        }
    }

    /// Start with favorites restored from the host's storage.
    pub fn with_favorites(self, favorites: Favorites) -> Self {
        Self { favorites, ..self }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Store a freshly captured image. Any palette from a previous image is discarded.
    pub fn capture(&mut self, image: RgbaImage) {
        log::debug!("captured {}x{} image", image.width(), image.height());

        self.captured = Some(image);
        self.palette = None;
    }

    pub fn captured(&self) -> Option<&RgbaImage> {
        self.captured.as_ref()
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Generate a palette from the captured image and keep it in the session.
    pub fn analyze(&mut self) -> Result<&Palette> {
        let image = self.captured.clone().ok_or(Error::NoCapture)?;
        let palette = PaletteBuilder::from_image(image).config(self.config).generate()?;

        Ok(&*self.palette.insert(palette))
    }

    /// The message asking an external agent to deliver the current palette to `address`.
    pub fn email_request(&self, address: &str) -> Result<String> {
        if !is_valid_email(address) {
            return Err(Error::InvalidEmail(address.to_owned()));
        }

        let palette = self.palette.as_ref().ok_or(Error::NoPalette)?;

        Ok(format!(
            "Please send this color palette to {address}: {}",
            palette.email_body()
        ))
    }

    /// Add the current palette to the favorites.
    pub fn save_favorite(&mut self) -> Result<&Favorite> {
        let palette = self.palette.as_ref().ok_or(Error::NoPalette)?;

        Ok(self.favorites.save(palette))
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut Favorites {
        &mut self.favorites
    }

    /// Drop the captured image and palette, keeping the configuration and favorites.
    pub fn reset(&mut self) {
        self.captured = None;
        self.palette = None;
    }
}

/// A loose `local@domain.tld` shape check, no whitespace allowed.
pub fn is_valid_email(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

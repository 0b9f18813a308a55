use crate::pixel::Pixel;

/// A cluster's representative color and how many samples it gathered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DominantColor {
    hex: String,
    population: u32,
    centroid: Pixel,
}

impl DominantColor {
    pub fn new(centroid: Pixel, population: u32) -> DominantColor {
        let centroid = Pixel::opaque(centroid.rgb());

        Self {
            hex: centroid.hex(),
            population,
            centroid,
        }
    }

    /// `#RRGGBB`, uppercase.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        self.centroid.rgb()
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn centroid(&self) -> Pixel {
        self.centroid
    }
}

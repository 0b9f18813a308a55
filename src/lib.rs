// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to extract a small palette of dominant colors from a photo.
//!
//! Extraction samples a bounded number of pixels, drops transparent and washed-out ones, groups the rest with a
//! single greedy clustering pass in RGB space and picks a fixed number of colors from the most populous clusters.
//! The same image and configuration always produce the same palette.
//!
//! ```no_run
//! let image = mood_palette::load_image("photo.jpg")?;
//! let palette = mood_palette::PaletteBuilder::from_image(image)
//!     .target_count(5)
//!     .generate()?;
//!
//! for hex in palette.hex_colors() {
//!     println!("{hex}");
//! }
//! # Ok::<(), mood_palette::Error>(())
//! ```

mod cluster;
mod config;
mod error;
mod favorites;
mod filter;
mod pixel;
mod sampler;
mod selection;
mod session;
mod swatch;

/// Emitted for every palette entry when an image has no usable pixels.
pub const NEUTRAL_FALLBACK: (u8, u8, u8) = (0x80, 0x80, 0x80);

pub use crate::{
    config::{
        Config, SelectionMode, DEFAULT_BRIGHTNESS_BAND, DEFAULT_CLUSTER_THRESHOLD, DEFAULT_DIVERSITY_THRESHOLD,
        DEFAULT_DOMINANT_COUNT, DEFAULT_MAX_CLUSTER_SAMPLES, DEFAULT_MIN_VIABLE_SAMPLES, DEFAULT_SAMPLE_BUDGET,
        DEFAULT_SECONDARY_COUNT, DEFAULT_TARGET_COUNT,
    },
    error::{Error, Result},
    filter::{DefaultFilter, Filter},
    pixel::Pixel,
    favorites::{Favorite, Favorites},
    session::{is_valid_email, Session},
    swatch::DominantColor,
};
pub use image;

use cluster::Clusterer;
use image::{math::Rect, GenericImageView, ImageBuffer, Rgba, RgbaImage};
use sampler::Sampler;
use selection::Selector;
use std::path::Path;

/// Whether a palette reflects the image or is a neutral stand-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExtractionStatus {
    Ok,
    /// No usable pixels were found; every entry is [`NEUTRAL_FALLBACK`].
    Degraded,
}

/// The colors picked from one image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    colors: Vec<DominantColor>,
    clusters: Vec<DominantColor>,
    status: ExtractionStatus,
}

pub struct PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    image: ImageBuffer<P, Vec<u8>>,
    config: Config,
    region: Option<Rect>,
    default_filter: bool,
    filters: Vec<Box<dyn Filter>>,
}

impl Palette {
    pub fn from_image<P>(image: ImageBuffer<P, Vec<u8>>) -> PaletteBuilder<P>
    where
        P: image::Pixel<Subpixel = u8> + 'static,
    {
        PaletteBuilder::from_image(image)
    }

    /// The selected colors, exactly as many as the configured target count.
    pub fn colors(&self) -> &[DominantColor] {
        &self.colors
    }

    /// `#RRGGBB` strings of the selected colors, in selection order.
    pub fn hex_colors(&self) -> Vec<String> {
        self.colors.iter().map(|color| color.hex().to_owned()).collect()
    }

    /// Every cluster found in the image, most populous first.
    pub fn clusters(&self) -> &[DominantColor] {
        &self.clusters
    }

    pub fn status(&self) -> ExtractionStatus {
        self.status
    }

    pub fn is_degraded(&self) -> bool {
        self.status == ExtractionStatus::Degraded
    }

    pub fn most_prominent_color(&self) -> Option<(u8, u8, u8)> {
        self.clusters.first().map(|color| color.rgb())
    }

    /// Plain-text listing of the palette for an outbound message.
    pub fn email_body(&self) -> String {
        let mut body = String::from("Your Mood Palette:\n\n");

        for (i, color) in self.colors.iter().enumerate() {
            body.push_str(&format!("Color {}: {}\n", i + 1, color.hex()));
        }

        body
    }

    fn generate(samples: &[Pixel], config: &Config) -> Palette {
        if samples.is_empty() {
            log::warn!("no usable pixels in image, returning a neutral palette");
            return Palette::neutral(config.target_count);
        }

        let clusters = Clusterer::new(config.cluster_threshold, config.max_cluster_samples).cluster(samples);

        // stable, so equal populations keep creation order
        let mut ranked = clusters.iter().map(|cluster| cluster.dominant_color()).collect::<Vec<_>>();
        ranked.sort_by(|lhs, rhs| rhs.population().cmp(&lhs.population()));

        let selector = Selector {
            count: config.target_count,
            mode: config.selection_mode,
            dominant_count: config.balanced_dominant_count,
            secondary_count: config.balanced_secondary_count,
            diversity_threshold: config.diversity_threshold,
        };
        let colors = selector.select(&ranked);

        log::debug!(
            "selected {:?} from {} clusters",
            colors.iter().map(DominantColor::hex).collect::<Vec<_>>(),
            ranked.len()
        );

        Self {
            colors,
            clusters: ranked,
            status: ExtractionStatus::Ok,
        }
    }

    fn neutral(count: usize) -> Palette {
        let gray = DominantColor::new(Pixel::opaque(NEUTRAL_FALLBACK), 0);

        Self {
            colors: vec![gray; count],
            clusters: Vec::new(),
            status: ExtractionStatus::Degraded,
        }
    }
}

impl PaletteBuilder<Rgba<u8>> {
    /// Start from a raw RGBA buffer, four bytes per pixel in raster order.
    pub fn from_rgba_raw(width: u32, height: u32, buffer: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;

        if buffer.len() != expected {
            return Err(Error::BufferSize {
                width,
                height,
                expected,
                actual: buffer.len(),
            });
        }

        let image = RgbaImage::from_raw(width, height, buffer).ok_or(Error::BufferSize {
            width,
            height,
            expected,
            actual: expected,
        })?;

        Ok(Self::from_image(image))
    }
}

impl<P> PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    pub fn from_image(image: ImageBuffer<P, Vec<u8>>) -> Self {
        Self {
            image,
            config: Config::default(),
            region: None,
            default_filter: true,
            filters: Vec::new(),
        }
    }

    /// Replace every tunable at once.
    pub fn config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    pub fn target_count(mut self, target_count: usize) -> Self {
        self.config.target_count = target_count;
        self
    }

    pub fn sample_budget(mut self, sample_budget: usize) -> Self {
        self.config.sample_budget = sample_budget;
        self
    }

    pub fn min_viable_samples(mut self, min_viable_samples: usize) -> Self {
        self.config.min_viable_samples = min_viable_samples;
        self
    }

    pub fn cluster_threshold(mut self, cluster_threshold: f32) -> Self {
        self.config.cluster_threshold = cluster_threshold;
        self
    }

    pub fn max_cluster_samples(mut self, max_cluster_samples: usize) -> Self {
        self.config.max_cluster_samples = max_cluster_samples;
        self
    }

    pub fn brightness_band(mut self, min: u8, max: u8) -> Self {
        self.config.brightness_band = (min, max);
        self
    }

    pub fn selection_mode(mut self, selection_mode: SelectionMode) -> Self {
        self.config.selection_mode = selection_mode;
        self
    }

    pub fn balanced_counts(mut self, dominant: usize, secondary: usize) -> Self {
        self.config.balanced_dominant_count = dominant;
        self.config.balanced_secondary_count = secondary;
        self
    }

    pub fn diversity_threshold(mut self, diversity_threshold: f32) -> Self {
        self.config.diversity_threshold = diversity_threshold;
        self
    }

    /// Only sample pixels within the given rectangle. Parts outside the image are ignored.
    pub fn region(self, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            region: Some(Rect { x, y, width, height }),
            ..self
        }
    }

    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn clear_region(self) -> Self {
        Self { region: None, ..self }
    }

    /// Remove every filter, including the default brightness filter.
    pub fn clear_filters(self) -> Self {
        Self {
            default_filter: false,
            filters: Vec::new(),
            ..self
        }
    }

    pub fn generate(self) -> Result<Palette> {
        self.config.validate()?;

        let (width, height) = self.image.dimensions();
        let region = self
            .region
            .map(|region| clip_region(region, width, height))
            .unwrap_or(Rect { x: 0, y: 0, width, height });

        if region.width == 0 || region.height == 0 {
            return Err(Error::EmptyImage {
                width: region.width,
                height: region.height,
            });
        }

        let view = self.image.view(region.x, region.y, region.width, region.height);
        let pixels = view
            .pixels()
            .map(|(_, _, p)| Pixel::from_image_pixel(&p))
            .collect::<Vec<_>>();

        let mut filters = self.filters;
        if self.default_filter {
            filters.insert(0, Box::new(DefaultFilter::new(self.config.brightness_band)));
        }

        let samples = Sampler::new(self.config.sample_budget, self.config.min_viable_samples, &filters).sample(&pixels);

        Ok(Palette::generate(&samples, &self.config))
    }
}

/// Decode an image file into RGBA.
pub fn load_image<Q>(path: Q) -> Result<RgbaImage>
where
    Q: AsRef<Path>,
{
    Ok(image::open(path)?.to_rgba8())
}

/// Decode an in-memory encoded image (PNG, JPEG, ...) into RGBA.
pub fn load_image_from_memory(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

fn clip_region(region: Rect, width: u32, height: u32) -> Rect {
    let x = region.x.min(width);
    let y = region.y.min(height);

    Rect {
        x,
        y,
        width: region.width.min(width - x),
        height: region.height.min(height - y),
    }
}

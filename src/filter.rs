use crate::pixel::Pixel;

/// A trait used to implement filters for the sampling process.
///
/// During sampling, filters remove pixels that would make poor palette entries before they reach
/// clustering. This trait allows the library consumer to implement custom filters.
///
/// Transparent pixels are never sampled and don't need a filter. If filtering leaves too few
/// samples, the sampler re-samples the image with every filter skipped.
///
/// See [`crate::PaletteBuilder::add_filter`] on how to add filters to the sampling process.
pub trait Filter {
    /// Return whether a given opaque-enough pixel should be sampled.
    fn is_allowed(&self, pixel: Pixel) -> bool;
}

impl<F> Filter for F
where
    F: Fn(Pixel) -> bool,
{
    fn is_allowed(&self, pixel: Pixel) -> bool {
        self(pixel)
    }
}

/// The default filter included in every [`crate::PaletteBuilder`] by default.
///
/// This filter disallows pixels whose channel mean falls outside the configured brightness band,
/// which keeps washed-out whites and near-blacks from dominating the palette.
#[derive(Debug, Clone, Copy)]
pub struct DefaultFilter {
    band: (u8, u8),
}

impl DefaultFilter {
    pub fn new(band: (u8, u8)) -> Self {
        Self { band }
    }
}

impl Filter for DefaultFilter {
    fn is_allowed(&self, pixel: Pixel) -> bool {
        (self.band.0 as f32..=self.band.1 as f32).contains(&pixel.brightness())
    }
}

/// Whether a pixel is below half opacity.
pub(crate) fn is_transparent(pixel: Pixel) -> bool {
    (pixel.alpha() as u16) * 2 < u8::MAX as u16
}

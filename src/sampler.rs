use crate::{
    filter::{is_transparent, Filter},
    pixel::Pixel,
};

const FALLBACK_STRIDE: usize = 20;

pub struct Sampler<'a> {
    budget: usize,
    min_viable: usize,
    filters: &'a [Box<dyn Filter>],
}

impl<'a> Sampler<'a> {
    pub fn new(budget: usize, min_viable: usize, filters: &'a [Box<dyn Filter>]) -> Self {
        Self {
            budget: budget.max(1),
            min_viable,
            filters,
        }
    }

    /// Pick a roughly uniform subset of `pixels`, given in raster order.
    ///
    /// Transparent pixels are always skipped. When the filters leave fewer than the viable minimum, the whole buffer is
    /// scanned again at a coarser stride with the filters skipped.
    pub fn sample(&self, pixels: &[Pixel]) -> Vec<Pixel> {
        // rounded up so at most `budget` positions are visited, spread over the whole buffer
        let step = pixels.len().div_ceil(self.budget).max(1);

        let samples = pixels
            .iter()
            .step_by(step)
            .copied()
            .filter(|pixel| !is_transparent(*pixel) && self.is_allowed(*pixel))
            .collect::<Vec<_>>();

        log::debug!("sampled {} pixels at stride {step}", samples.len());

        if samples.len() >= self.min_viable {
            return samples;
        }

        // a small image may not reach the minimum at the usual fallback stride, so tighten it
        let fallback_step = FALLBACK_STRIDE
            .min(pixels.len() / self.min_viable.max(1))
            .max(1);

        let fallback = pixels
            .iter()
            .step_by(fallback_step)
            .copied()
            .filter(|pixel| !is_transparent(*pixel))
            .collect::<Vec<_>>();

        log::debug!(
            "only {} samples passed filtering, fallback pass at stride {fallback_step} found {}",
            samples.len(),
            fallback.len()
        );

        fallback
    }

    fn is_allowed(&self, pixel: Pixel) -> bool {
        self.filters.iter().all(|filter| filter.is_allowed(pixel))
    }
}

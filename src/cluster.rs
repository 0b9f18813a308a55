use crate::{pixel::Pixel, swatch::DominantColor};

/// A group of samples close to each other in RGB space.
#[derive(Debug, Clone)]
pub(crate) struct Cluster {
    sums: (u64, u64, u64),
    population: u32,
}

pub struct Clusterer {
    threshold: f32,
    max_samples: usize,
}

impl Cluster {
    fn new(pixel: Pixel) -> Self {
        let mut cluster = Self {
            sums: (0, 0, 0),
            population: 0,
        };

        cluster.add(pixel);
        cluster
    }

    fn add(&mut self, pixel: Pixel) {
        let (r, g, b) = pixel.rgb();

        self.sums.0 += r as u64;
        self.sums.1 += g as u64;
        self.sums.2 += b as u64;
        self.population += 1;
    }

    fn mean(&self) -> (f32, f32, f32) {
        let pop = self.population as f32;
        (
            self.sums.0 as f32 / pop,
            self.sums.1 as f32 / pop,
            self.sums.2 as f32 / pop,
        )
    }

    fn distance_to(&self, pixel: Pixel) -> f32 {
        let (r, g, b) = pixel.rgb();
        crate::pixel::rgb_distance(self.mean(), (r as f32, g as f32, b as f32))
    }

    /// The cluster's mean color, each channel rounded to the nearest integer.
    pub(crate) fn dominant_color(&self) -> DominantColor {
        let (r, g, b) = self.mean();
        let centroid = Pixel::opaque((round_channel(r), round_channel(g), round_channel(b)));

        DominantColor::new(centroid, self.population)
    }
}

impl Clusterer {
    pub fn new(threshold: f32, max_samples: usize) -> Self {
        Self { threshold, max_samples }
    }

    /// Group `samples` with a single greedy pass.
    ///
    /// Each sample joins the first cluster, in creation order, whose running mean is closer than the threshold, or
    /// starts a new one. The result depends on sample order. Samples past the cap are ignored.
    pub(crate) fn cluster(&self, samples: &[Pixel]) -> Vec<Cluster> {
        let mut clusters: Vec<Cluster> = Vec::new();

        for &pixel in samples.iter().take(self.max_samples) {
            match clusters
                .iter_mut()
                .find(|cluster| cluster.distance_to(pixel) < self.threshold)
            {
                Some(cluster) => cluster.add(pixel),
                None => clusters.push(Cluster::new(pixel)),
            }
        }

        log::debug!(
            "formed {} clusters from {} samples",
            clusters.len(),
            samples.len().min(self.max_samples)
        );

        clusters
    }
}

fn round_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

use crate::error::{Error, Result};

pub const DEFAULT_TARGET_COUNT: usize = 5;
pub const DEFAULT_SAMPLE_BUDGET: usize = 2000;
pub const DEFAULT_MIN_VIABLE_SAMPLES: usize = 50;
pub const DEFAULT_CLUSTER_THRESHOLD: f32 = 30.0;
pub const DEFAULT_MAX_CLUSTER_SAMPLES: usize = 1000;
pub const DEFAULT_BRIGHTNESS_BAND: (u8, u8) = (15, 240);
pub const DEFAULT_DOMINANT_COUNT: usize = 3;
pub const DEFAULT_SECONDARY_COUNT: usize = 2;
pub const DEFAULT_DIVERSITY_THRESHOLD: f32 = 60.0;

/// How the final colors are picked from the ranked clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SelectionMode {
    /// The most populous clusters, in population order.
    TopN,
    /// A few most populous clusters followed by colors kept apart from them.
    #[default]
    Balanced,
}

/// Tunables for a single extraction run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Number of colors in the palette.
    pub target_count: usize,
    /// Upper bound on sampled pixel positions.
    pub sample_budget: usize,
    /// Below this many filtered samples the sampler falls back to an unfiltered pass.
    pub min_viable_samples: usize,
    /// Euclidean RGB distance under which a sample joins an existing cluster.
    pub cluster_threshold: f32,
    /// Samples beyond this count are not clustered.
    pub max_cluster_samples: usize,
    /// Inclusive range of allowed channel-mean brightness.
    pub brightness_band: (u8, u8),
    pub selection_mode: SelectionMode,
    pub balanced_dominant_count: usize,
    pub balanced_secondary_count: usize,
    /// Minimum distance between a secondary color and every color already selected.
    pub diversity_threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            sample_budget: DEFAULT_SAMPLE_BUDGET,
            min_viable_samples: DEFAULT_MIN_VIABLE_SAMPLES,
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
            max_cluster_samples: DEFAULT_MAX_CLUSTER_SAMPLES,
            brightness_band: DEFAULT_BRIGHTNESS_BAND,
            selection_mode: SelectionMode::default(),
            balanced_dominant_count: DEFAULT_DOMINANT_COUNT,
            balanced_secondary_count: DEFAULT_SECONDARY_COUNT,
            diversity_threshold: DEFAULT_DIVERSITY_THRESHOLD,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.target_count == 0 {
            return Err(invalid("target_count", "must be at least 1"));
        }

        if self.sample_budget == 0 {
            return Err(invalid("sample_budget", "must be at least 1"));
        }

        if self.max_cluster_samples == 0 {
            return Err(invalid("max_cluster_samples", "must be at least 1"));
        }

        // written this way so NaN is rejected too
        if !(self.cluster_threshold > 0.0) {
            return Err(invalid("cluster_threshold", "must be a positive number"));
        }

        if !(self.diversity_threshold >= 0.0) {
            return Err(invalid("diversity_threshold", "must be a non-negative number"));
        }

        if self.selection_mode == SelectionMode::Balanced
            && self.balanced_dominant_count == 0
            && self.balanced_secondary_count == 0
        {
            return Err(invalid(
                "balanced_dominant_count",
                "balanced mode needs at least one dominant or secondary slot",
            ));
        }

        if self.brightness_band.0 > self.brightness_band.1 {
            return Err(invalid("brightness_band", "lower bound is above upper bound"));
        }

        Ok(())
    }
}

fn invalid(name: &'static str, message: &'static str) -> Error {
    Error::InvalidConfig { name, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_target_count() {
        let config = Config {
            target_count: 0,
            ..Config::default()
        };

        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig {
                name: "target_count",
                ..
            })
        ));
    }

    #[test]
    fn rejects_nan_threshold() {
        let config = Config {
            cluster_threshold: f32::NAN,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_balanced_mode_without_slots() {
        let config = Config {
            balanced_dominant_count: 0,
            balanced_secondary_count: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
        assert!(Config {
            selection_mode: SelectionMode::TopN,
            ..config
        }
        .validate()
        .is_ok());
        assert!(Config {
            balanced_secondary_count: 1,
            ..config
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn rejects_inverted_band() {
        let config = Config {
            brightness_band: (200, 100),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }
}

use std::path::Path;

use serde_derive::Deserialize;

use super::error::{Result, TrackStatsError};

/// Settings for a statistics run, read from a TOML file such as
///
/// ```toml
/// extremes_percentile = 0.05
/// stopped_speed_threshold_kmh = 1.0
/// min_segment_length_m = 10.0
/// min_segment_duration_s = 600.0
/// verbose = false
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StatsConfig {
    pub extremes_percentile: f64,
    pub stopped_speed_threshold_kmh: f64,
    pub min_segment_length_m: f64,
    pub min_segment_duration_s: f64,
    pub verbose: bool,
    pub logging: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            extremes_percentile: 0.05,
            stopped_speed_threshold_kmh: 1.0,
            min_segment_length_m: 10.0,
            min_segment_duration_s: 600.0,
            verbose: false,
            logging: true,
        }
    }
}

impl StatsConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TrackStatsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StatsConfig = toml::from_str(content)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=0.5).contains(&self.extremes_percentile) {
            return Err(TrackStatsError::InvalidParameter(format!(
                "extremes_percentile must be within [0, 0.5], got {}",
                self.extremes_percentile
            )));
        }

        if !(self.stopped_speed_threshold_kmh >= 0.0) {
            return Err(TrackStatsError::InvalidParameter(format!(
                "stopped_speed_threshold_kmh must not be negative, got {}",
                self.stopped_speed_threshold_kmh
            )));
        }

        Ok(())
    }
}

use std::path::Path;

use processors::SegmentStatsPipeline;
use util::{
    config::StatsConfig,
    error::{Result, TrackStatsError},
    logging,
};

pub mod data_types;
pub mod processors;
pub mod util;

pub use data_types::{
    annotation::{PointAnnotation, SensorReadings},
    stats::{SegmentStats, TrackStatsRecord},
    track::{Track, TrackPoint, TrackSegment},
};
pub use processors::statistics::{compute_segment_stats, StatsAggregator};

pub struct App {
    config: StatsConfig,
    pipeline: SegmentStatsPipeline,
}

impl App {
    const CC: &'static str = "App";

    pub fn new(config: StatsConfig) -> Result<Self> {
        config.validate()?;

        logging::set_global_logging(config.logging);
        if config.verbose {
            logging::set_global_level(logging::LogLevel::VERBOSE);
        }

        Ok(Self {
            pipeline: SegmentStatsPipeline::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub fn load_track<P: AsRef<Path>>(&self, path: P) -> Result<Track> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TrackStatsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let track: Track = serde_json::from_str(&content)?;
        logln!(
            "Loaded {} with {} segments",
            track.name.as_deref().unwrap_or("track"),
            track.segments.len()
        );

        Ok(track)
    }

    pub fn process_track(&self, track: &Track) -> Vec<SegmentStats> {
        self.pipeline.run(track)
    }

    pub fn records_json(&self, stats: &[SegmentStats]) -> Result<String> {
        let records: Vec<TrackStatsRecord> = stats
            .iter()
            .map(|s| s.to_record(self.pipeline.extremes_percentile()))
            .collect();

        serde_json::to_string_pretty(&records).map_err(TrackStatsError::Output)
    }
}

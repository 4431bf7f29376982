use crate::{
    data_types::{stats::SegmentStats, track::Track},
    logln,
    util::config::StatsConfig,
};

use self::{
    motion::ThresholdMotionSegmenter,
    segments::{prepare_segment, SegmentFilter},
    statistics::StatsAggregator,
};

pub mod annotation_parser;
pub mod motion;
pub mod segments;
pub mod statistics;
pub mod wind;

/// Runs every significant segment of a track through the statistics engine.
pub struct SegmentStatsPipeline {
    filter: SegmentFilter,
    aggregator: StatsAggregator<ThresholdMotionSegmenter>,
    extremes_percentile: f64,
}

impl SegmentStatsPipeline {
    const CC: &'static str = "Pipeline";

    pub fn new(config: &StatsConfig) -> Self {
        Self {
            filter: SegmentFilter {
                min_length_m: config.min_segment_length_m,
                min_duration_s: config.min_segment_duration_s,
            },
            aggregator: StatsAggregator::with_segmenter(ThresholdMotionSegmenter::new(
                config.stopped_speed_threshold_kmh,
            )),
            extremes_percentile: config.extremes_percentile,
        }
    }

    pub fn extremes_percentile(&self) -> f64 {
        self.extremes_percentile
    }

    pub fn run(&self, track: &Track) -> Vec<SegmentStats> {
        let mut results: Vec<SegmentStats> = Vec::new();

        for (index, segment) in track.segments.iter().enumerate() {
            let segment = prepare_segment(segment.clone());

            if !self.filter.is_significant(&segment) {
                continue;
            }

            logln!("Processing segment {} ({} points)", index, segment.points.len());
            results.push(
                self.aggregator
                    .compute(&segment.points, self.extremes_percentile),
            );
        }

        results
    }
}

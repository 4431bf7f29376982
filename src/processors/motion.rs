use crate::{data_types::track::TrackPoint, logvbln, util::geo::GeoUtils};

/// Time and distance split of a segment into moving and stopped parts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovingData {
    pub moving_seconds: f64,
    pub stopped_seconds: f64,
    pub moving_meters: f64,
    pub stopped_meters: f64,
    // None when the segment is too short for a reliable maximum
    pub max_speed_mps: Option<f64>,
}

impl MovingData {
    pub fn total_seconds(&self) -> f64 {
        self.moving_seconds + self.stopped_seconds
    }

    pub fn total_meters(&self) -> f64 {
        self.moving_meters + self.stopped_meters
    }
}

pub trait MotionSegmenter {
    /// `extremes_percentile` is the fraction (0 to 0.5) of the fastest speed
    /// samples ignored for the maximum speed.
    fn moving_data(&self, points: &[TrackPoint], extremes_percentile: f64) -> MovingData;
}

/// Splits on a fixed speed threshold between consecutive timed points.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdMotionSegmenter {
    pub stopped_speed_threshold_kmh: f64,
}

impl Default for ThresholdMotionSegmenter {
    fn default() -> Self {
        Self {
            stopped_speed_threshold_kmh: 1.0,
        }
    }
}

impl ThresholdMotionSegmenter {
    const CC: &'static str = "MotionSegmenter";

    const MIN_SPEED_SAMPLES: usize = 20;
    const DISTANCE_DEVIATION_ALLOWANCE: f64 = 1.5;

    pub fn new(stopped_speed_threshold_kmh: f64) -> Self {
        Self {
            stopped_speed_threshold_kmh,
        }
    }

    // samples are (speed m/s, distance m) of the legs from the first moving one on
    fn max_speed(samples: &[(f64, f64)], extremes_percentile: f64) -> Option<f64> {
        if samples.len() < ThresholdMotionSegmenter::MIN_SPEED_SAMPLES {
            logvbln!("{} speed samples, too few for a max speed", samples.len());
            return None;
        }

        let size = samples.len() as f64;
        let avg_distance = samples.iter().map(|s| s.1).sum::<f64>() / size;
        let std_distance = (samples
            .iter()
            .map(|s| (s.1 - avg_distance).powi(2))
            .sum::<f64>()
            / size)
            .sqrt();

        // Legs much longer or shorter than usual are GPS jumps
        let mut speeds: Vec<f64> = samples
            .iter()
            .filter(|s| {
                (s.1 - avg_distance).abs()
                    <= std_distance * ThresholdMotionSegmenter::DISTANCE_DEVIATION_ALLOWANCE
            })
            .map(|s| s.0)
            .collect();

        if speeds.is_empty() {
            return None;
        }

        speeds.sort_by(|a, b| a.total_cmp(b));

        let index = (speeds.len() as f64 * (1.0 - extremes_percentile)) as usize;
        speeds.get(index).or_else(|| speeds.last()).copied()
    }
}

impl MotionSegmenter for ThresholdMotionSegmenter {
    fn moving_data(&self, points: &[TrackPoint], extremes_percentile: f64) -> MovingData {
        let extremes_percentile = if extremes_percentile.is_finite() {
            extremes_percentile.clamp(0.0, 0.5)
        } else {
            0.0
        };

        let mut data = MovingData::default();
        let mut speed_samples: Vec<(f64, f64)> = Vec::new();

        for pair in points.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);

            let (start, end) = match (previous.time, current.time) {
                (Some(start), Some(end)) => (start, end),
                _ => continue,
            };

            let seconds = (end - start).num_milliseconds() as f64 / 1000.0;
            if seconds <= 0.0 {
                continue;
            }

            let distance = GeoUtils::distance(previous.coord(), current.coord());
            let speed_kmh = (distance / 1000.0) / (seconds / 3600.0);

            if speed_kmh <= self.stopped_speed_threshold_kmh {
                data.stopped_seconds += seconds;
                data.stopped_meters += distance;
            } else {
                data.moving_seconds += seconds;
                data.moving_meters += distance;
            }

            // stopped legs count too once the boat has started moving
            if distance > 0.0 && data.moving_seconds > 0.0 {
                speed_samples.push((distance / seconds, distance));
            }
        }

        data.max_speed_mps = ThresholdMotionSegmenter::max_speed(&speed_samples, extremes_percentile);

        logvbln!(
            "moving {:.0}s/{:.0}m, stopped {:.0}s/{:.0}m over {} points",
            data.moving_seconds,
            data.moving_meters,
            data.stopped_seconds,
            data.stopped_meters,
            points.len()
        );

        data
    }
}

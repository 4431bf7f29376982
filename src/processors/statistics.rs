use crate::{
    data_types::{
        annotation::PointAnnotation,
        stats::{Aggregate, SegmentStats},
        track::{time_bounds, TrackPoint},
    },
    logvbln,
    processors::{
        motion::{MotionSegmenter, ThresholdMotionSegmenter},
        wind::{VectorWindAverager, WindSample},
    },
    util::{
        time::duration_from_secs,
        units::{normalize_speed_sample, UnitSystem, KNOTS_LABEL},
    },
};

/// Statistics for one segment with the default motion split.
pub fn compute_segment_stats(points: &[TrackPoint], extremes_percentile: f64) -> SegmentStats {
    StatsAggregator::<ThresholdMotionSegmenter>::default().compute(points, extremes_percentile)
}

// A speed without a direction cannot be averaged as a vector, so the speed
// (and its fallback diagnostic) is only resolved once a direction is known
fn wind_sample(annotation: &PointAnnotation) -> Option<WindSample> {
    let direction_deg = annotation.effective_twd()?;
    let speed = annotation.effective_tws()?;

    Some(WindSample {
        direction_deg,
        speed,
    })
}

pub struct StatsAggregator<S: MotionSegmenter = ThresholdMotionSegmenter> {
    segmenter: S,
}

impl Default for StatsAggregator<ThresholdMotionSegmenter> {
    fn default() -> Self {
        Self {
            segmenter: ThresholdMotionSegmenter::default(),
        }
    }
}

impl<S: MotionSegmenter> StatsAggregator<S> {
    const CC: &'static str = "StatsAggregator";

    pub fn with_segmenter(segmenter: S) -> Self {
        Self { segmenter }
    }

    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    pub fn compute(&self, points: &[TrackPoint], extremes_percentile: f64) -> SegmentStats {
        let bounds = time_bounds(points);
        let moving = self.segmenter.moving_data(points, extremes_percentile);

        let annotations: Vec<PointAnnotation> = points
            .iter()
            .map(|p| PointAnnotation::from_comment(p.comment.as_deref()))
            .collect();

        let speed_unit = annotations
            .first()
            .map_or_else(|| KNOTS_LABEL.to_string(), PointAnnotation::speed_unit);
        let units = UnitSystem::from_speed_unit(&speed_unit);

        let total_seconds = moving.total_seconds();
        let raw_avg_sog = if total_seconds > 0.0 {
            Some(moving.total_meters() / total_seconds)
        } else {
            None
        };

        let sog = Aggregate {
            max: units.speed_from_mps(normalize_speed_sample(moving.max_speed_mps)),
            avg: units.speed_from_mps(normalize_speed_sample(raw_avg_sog)),
        };

        let stw_values: Vec<f64> = annotations.iter().filter_map(PointAnnotation::stw).collect();

        let wind_samples: Vec<WindSample> = annotations.iter().filter_map(wind_sample).collect();

        let tws_values: Vec<f64> = wind_samples.iter().map(|s| s.speed).collect();
        let wind_average = VectorWindAverager::average(&wind_samples);

        logvbln!(
            "{} points, {} with STW, {} with wind, unit {}",
            points.len(),
            stw_values.len(),
            wind_samples.len(),
            speed_unit
        );

        SegmentStats {
            start_timestamp: bounds.as_ref().map(|b| b.start.timestamp()),
            start_date: bounds.as_ref().map(|b| b.start_date()),
            start_time: bounds.as_ref().map(|b| b.start_time()),
            moving_time: duration_from_secs(moving.moving_seconds),
            stopped_time: duration_from_secs(moving.stopped_seconds),
            moving_distance: units.distance_from_meters(moving.moving_meters),
            stopped_distance: units.distance_from_meters(moving.stopped_meters),
            num_points: points.len(),
            speed_unit,
            sog: Some(sog),
            stw: Aggregate::from_values(&stw_values),
            tws: Aggregate::from_values(&tws_values),
            avg_wind_dir: wind_average.map(|w| w.direction_deg),
            avg_wind_speed: wind_average.map(|w| w.speed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::motion::MovingData;

    // Reports fixed motion figures so unit handling can be checked in isolation
    struct FixedSegmenter(MovingData);

    impl MotionSegmenter for FixedSegmenter {
        fn moving_data(&self, _points: &[TrackPoint], _extremes_percentile: f64) -> MovingData {
            self.0
        }
    }

    fn fixed(max_speed_mps: Option<f64>) -> StatsAggregator<FixedSegmenter> {
        StatsAggregator::with_segmenter(FixedSegmenter(MovingData {
            moving_seconds: 900.0,
            stopped_seconds: 300.0,
            moving_meters: 1000.0,
            stopped_meters: 200.0,
            max_speed_mps,
        }))
    }

    fn annotated(comments: &[&str]) -> Vec<TrackPoint> {
        comments
            .iter()
            .enumerate()
            .map(|(i, c)| TrackPoint::new(50.0 + i as f64 * 0.001, -1.0).with_comment(c))
            .collect()
    }

    #[test]
    fn converts_to_knots_and_nautical_miles() {
        let stats = fixed(Some(2.0)).compute(&annotated(&["STW: 3.1 kts"]), 0.05);

        assert_eq!(stats.speed_unit(), "kts");
        assert!((stats.max_sog().unwrap() - 3.88768).abs() < 1e-9);
        assert!((stats.avg_sog().unwrap() - 1.94384).abs() < 1e-9);
        assert!((stats.moving_distance() - 0.5399566666666666).abs() < 1e-12);
        assert_eq!(stats.moving_time().num_seconds(), 900);
    }

    #[test]
    fn metric_log_keeps_si_units() {
        let stats = fixed(Some(2.0)).compute(&annotated(&["STW: 1.6 m/s", "STW: 1.8 kts"]), 0.05);

        assert_eq!(stats.speed_unit(), "m/s");
        assert_eq!(stats.max_sog(), Some(2.0));
        assert_eq!(stats.moving_distance(), 1000.0);
        assert_eq!(stats.stopped_distance(), 200.0);
    }

    #[test]
    fn missing_max_speed_reads_as_zero() {
        let stats = fixed(None).compute(&annotated(&[""]), 0.05);
        assert_eq!(stats.max_sog(), Some(0.0));
    }

    #[test]
    fn stw_only_from_points_that_logged_it() {
        let stats = fixed(None).compute(&annotated(&["STW: 4.0", "SOG: 5.0", "STW: 6.0"]), 0.05);
        assert_eq!(stats.max_stw(), Some(6.0));
        assert_eq!(stats.avg_stw(), Some(5.0));
    }

    #[test]
    fn no_stw_is_no_data_not_zero() {
        let stats = fixed(None).compute(&annotated(&["SOG: 5.0", "Depth: 4"]), 0.05);
        assert_eq!(stats.max_stw(), None);
        assert_eq!(stats.avg_stw(), None);
        assert_eq!(stats.max_tws(), None);
        assert_eq!(stats.avg_wind_dir(), None);
    }

    #[test]
    fn wind_needs_both_speed_and_direction() {
        let stats = fixed(None).compute(
            &annotated(&[
                "TWD 90\nTWS: 10",
                "TWS: 30",
                "TWD 90\nTWS: 14",
                "COG: 60\nAWA: 30\nAWS: 12",
            ]),
            0.05,
        );

        assert_eq!(stats.max_tws(), Some(14.0));
        assert_eq!(stats.avg_tws(), Some(12.0));
        assert!((stats.avg_wind_dir().unwrap() - 90.0).abs() < 1e-9);
        assert!((stats.avg_wind_speed().unwrap() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn empty_segment_degrades_to_no_data() {
        let stats = compute_segment_stats(&[], 0.05);

        assert_eq!(stats.num_points(), 0);
        assert_eq!(stats.start_date(), None);
        assert_eq!(stats.start_time(), None);
        assert_eq!(stats.speed_unit(), "kts");
        assert_eq!(stats.max_sog(), Some(0.0));
        assert_eq!(stats.avg_sog(), Some(0.0));
        assert_eq!(stats.max_tws(), None);
    }

    #[test]
    fn wind_sample_requires_a_direction_first() {
        let underway = PointAnnotation::from_comment(Some("SOG: 5.2\nAWS: 14"));
        assert_eq!(wind_sample(&underway), None);

        let apparent = PointAnnotation::from_comment(Some("SOG: 5.2\nCOG: 40\nAWA: 35\nAWS: 14"));
        assert_eq!(
            wind_sample(&apparent),
            Some(WindSample {
                direction_deg: 75.0,
                speed: 14.0,
            })
        );
    }
}

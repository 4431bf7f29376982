use crate::{data_types::track::TrackSegment, logvbln};

pub struct SegmentFilter {
    pub min_length_m: f64,
    pub min_duration_s: f64,
}

impl Default for SegmentFilter {
    fn default() -> Self {
        Self {
            min_length_m: 10.0,
            min_duration_s: 600.0,
        }
    }
}

impl SegmentFilter {
    const CC: &'static str = "SegmentFilter";

    // Short hops and brief recordings are noise, not passages
    pub fn is_significant(&self, segment: &TrackSegment) -> bool {
        let length = segment.length_2d();
        let duration = segment.duration_seconds();

        if length > self.min_length_m && duration > self.min_duration_s {
            return true;
        }

        logvbln!(
            "Skipping segment of {} points: {:.0}m over {:.0}s",
            segment.points.len(),
            length,
            duration
        );
        false
    }
}

// Some exports store points newest first
pub fn prepare_segment(mut segment: TrackSegment) -> TrackSegment {
    if let [first, second, ..] = segment.points.as_slice() {
        if let (Some(t1), Some(t2)) = (first.time, second.time) {
            if t1 > t2 {
                segment.points.reverse();
            }
        }
    }

    segment
}

/// Integer percentage of top speeds to ignore, clamped to 0-50, as a fraction.
pub fn percentile_from_pct(pct: i64) -> f64 {
    pct.clamp(0, 50) as f64 / 100.0
}

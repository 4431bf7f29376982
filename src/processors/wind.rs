use crate::{logvbln, util::geo::GeoUtils};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSample {
    // bearing the wind blows from
    pub direction_deg: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindAverage {
    pub direction_deg: f64,
    pub speed: f64,
}

/// Averages wind readings as vectors. Bearings cannot be averaged directly
/// (350° and 10° would give 180°), so the east/north components are averaged
/// and turned back into a bearing and a resultant speed.
pub struct VectorWindAverager {}

impl VectorWindAverager {
    const CC: &'static str = "VectorWindAverager";

    pub fn average(samples: &[WindSample]) -> Option<WindAverage> {
        if samples.is_empty() {
            return None;
        }

        let count = samples.len() as f64;
        let (sum_east, sum_north) = samples.iter().fold((0.0, 0.0), |(east, north), sample| {
            let radians = GeoUtils::deg2rad(sample.direction_deg);
            (
                east + radians.sin() * sample.speed,
                north + radians.cos() * sample.speed,
            )
        });

        // Readings give the "from" bearing, the components point where the wind goes
        let avg_east = -(sum_east / count);
        let avg_north = -(sum_north / count);

        let speed = (avg_east.powi(2) + avg_north.powi(2)).sqrt();
        let direction_deg =
            VectorWindAverager::normalize_direction(GeoUtils::rad2deg(avg_east.atan2(avg_north)));

        logvbln!(
            "{} wind samples averaged to {:.1}° at {:.1}",
            samples.len(),
            direction_deg,
            speed
        );

        Some(WindAverage {
            direction_deg,
            speed,
        })
    }

    // Flips the "to" bearing back to "from". Exactly 180° is left untouched.
    pub fn normalize_direction(direction_deg: f64) -> f64 {
        if direction_deg > 180.0 {
            direction_deg - 180.0
        } else if direction_deg < 180.0 {
            direction_deg + 180.0
        } else {
            direction_deg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(direction_deg: f64, speed: f64) -> WindSample {
        WindSample {
            direction_deg,
            speed,
        }
    }

    #[test]
    fn opposing_winds_cancel() {
        let average =
            VectorWindAverager::average(&[sample(0.0, 10.0), sample(180.0, 10.0)]).unwrap();
        assert!(average.speed.abs() < 1e-9);
    }

    #[test]
    fn single_sample_keeps_its_bearing() {
        for direction in [0.0, 45.0, 90.0, 135.0, 200.0, 270.0, 315.0] {
            let average = VectorWindAverager::average(&[sample(direction, 12.0)]).unwrap();
            assert!(
                (average.direction_deg - direction).abs() < 1e-9,
                "{} averaged to {}",
                direction,
                average.direction_deg
            );
            assert!((average.speed - 12.0).abs() < 1e-9);
        }
    }

    #[test]
    fn averages_across_north() {
        let average =
            VectorWindAverager::average(&[sample(350.0, 10.0), sample(20.0, 10.0)]).unwrap();
        assert!((average.direction_deg - 5.0).abs() < 1e-6);
    }

    #[test]
    fn resultant_speed_is_below_scalar_mean() {
        let samples = [sample(80.0, 10.0), sample(100.0, 14.0), sample(60.0, 12.0)];
        let average = VectorWindAverager::average(&samples).unwrap();
        let scalar_mean = 12.0;

        assert!(average.speed < scalar_mean);
        assert!(average.speed > 11.0);
    }

    #[test]
    fn no_samples_no_average() {
        assert_eq!(VectorWindAverager::average(&[]), None);
    }

    #[test]
    fn direction_normalization_is_pinned() {
        assert_eq!(VectorWindAverager::normalize_direction(190.0), 10.0);
        assert_eq!(VectorWindAverager::normalize_direction(170.0), 350.0);
        assert_eq!(VectorWindAverager::normalize_direction(-90.0), 90.0);
        assert_eq!(VectorWindAverager::normalize_direction(180.0), 180.0);
    }
}

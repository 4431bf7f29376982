use std::fmt::Display;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde_derive::Serialize;

use crate::util::{nullable_float_as_str, time::format_duration, units::UnitSystem, DateTimeUtils};

/// Max and average of one reading over a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub max: f64,
    pub avg: f64,
}

impl Aggregate {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = values.iter().sum::<f64>() / values.len() as f64;

        Some(Self { max, avg })
    }
}

/// Statistics of one track segment. Speeds and distances are all expressed in
/// the unit system named by `speed_unit`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentStats {
    pub(crate) start_timestamp: Option<i64>,
    pub(crate) start_date: Option<NaiveDate>,
    pub(crate) start_time: Option<NaiveTime>,
    pub(crate) moving_time: Duration,
    pub(crate) stopped_time: Duration,
    pub(crate) moving_distance: f64,
    pub(crate) stopped_distance: f64,
    pub(crate) num_points: usize,
    pub(crate) speed_unit: String,
    pub(crate) sog: Option<Aggregate>,
    pub(crate) stw: Option<Aggregate>,
    pub(crate) tws: Option<Aggregate>,
    pub(crate) avg_wind_dir: Option<f64>,
    pub(crate) avg_wind_speed: Option<f64>,
}

impl SegmentStats {
    pub fn start_timestamp(&self) -> Option<i64> {
        self.start_timestamp
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    pub fn moving_time(&self) -> Duration {
        self.moving_time
    }

    pub fn stopped_time(&self) -> Duration {
        self.stopped_time
    }

    pub fn moving_distance(&self) -> f64 {
        self.moving_distance
    }

    pub fn stopped_distance(&self) -> f64 {
        self.stopped_distance
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn speed_unit(&self) -> &str {
        &self.speed_unit
    }

    pub fn unit_system(&self) -> UnitSystem {
        UnitSystem::from_speed_unit(&self.speed_unit)
    }

    pub fn max_sog(&self) -> Option<f64> {
        self.sog.map(|a| a.max)
    }

    pub fn avg_sog(&self) -> Option<f64> {
        self.sog.map(|a| a.avg)
    }

    pub fn max_stw(&self) -> Option<f64> {
        self.stw.map(|a| a.max)
    }

    pub fn avg_stw(&self) -> Option<f64> {
        self.stw.map(|a| a.avg)
    }

    pub fn max_tws(&self) -> Option<f64> {
        self.tws.map(|a| a.max)
    }

    pub fn avg_tws(&self) -> Option<f64> {
        self.tws.map(|a| a.avg)
    }

    pub fn avg_wind_dir(&self) -> Option<f64> {
        self.avg_wind_dir
    }

    pub fn avg_wind_speed(&self) -> Option<f64> {
        self.avg_wind_speed
    }

    pub fn summary(&self) -> String {
        format!(
            "Date: {}, Start T: {}, Points: {}",
            DateTimeUtils::date_to_str(self.start_date),
            DateTimeUtils::time_to_str(self.start_time),
            self.num_points
        )
    }

    pub fn distances(&self) -> String {
        let unit = self.unit_system().distance_label();

        format!(
            "\tMoving T: {} Stopped T: {} Moving Dist: {:.2} {} Stopped Dist: {:.2} {}",
            format_duration(&self.moving_time),
            format_duration(&self.stopped_time),
            self.moving_distance,
            unit,
            self.stopped_distance,
            unit
        )
    }

    pub fn speeds(&self) -> String {
        let mut rendered = format!(
            "\tSpeed over ground ({}): max: {}, avg: {}",
            self.speed_unit,
            nullable_float_as_str(self.max_sog(), 1),
            nullable_float_as_str(self.avg_sog(), 1)
        );

        if let Some(stw) = self.stw {
            rendered.push_str(&format!(
                "\n\tSpeed thru water ({}): max: {:.1}, avg: {:.1}",
                self.speed_unit, stw.max, stw.avg
            ));
        }

        rendered
    }

    pub fn wind(&self) -> String {
        match self.tws {
            Some(tws) => format!(
                "\tTrue Wind Speed ({}): max: {:.1}, avg: {:.1}\n\tAverage Wind: {}° at {} {}",
                self.speed_unit,
                tws.max,
                tws.avg,
                nullable_float_as_str(self.avg_wind_dir, 1),
                nullable_float_as_str(self.avg_wind_speed, 1),
                self.speed_unit
            ),
            None => "\tNo wind data available".to_string(),
        }
    }

    pub fn to_record(&self, pct_top_spd_ignored: f64) -> TrackStatsRecord {
        TrackStatsRecord {
            start_timestamp: self.start_timestamp,
            pct_top_spd_ignored,
            moving_seconds: self.moving_time.num_seconds(),
            stopped_seconds: self.stopped_time.num_seconds(),
            moving_distance: self.moving_distance,
            stopped_distance: self.stopped_distance,
            speed_unit: self.speed_unit.clone(),
            sog_avg: self.avg_sog(),
            sog_max: self.max_sog(),
            stw_avg: self.avg_stw(),
            stw_max: self.max_stw(),
            tws_avg: self.avg_tws(),
            tws_max: self.max_tws(),
            avg_wind_dir: self.avg_wind_dir,
            avg_wind_spd: self.avg_wind_speed,
        }
    }
}

impl Display for SegmentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.summary())?;
        writeln!(f, "{}", self.distances())?;
        writeln!(f, "{}", self.speeds())?;
        write!(f, "{}", self.wind())
    }
}

/// Flat row handed to persistence and export, missing readings stay null.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TrackStatsRecord {
    pub start_timestamp: Option<i64>,
    pub pct_top_spd_ignored: f64,
    pub moving_seconds: i64,
    pub stopped_seconds: i64,
    pub moving_distance: f64,
    pub stopped_distance: f64,
    pub speed_unit: String,
    pub sog_avg: Option<f64>,
    pub sog_max: Option<f64>,
    pub stw_avg: Option<f64>,
    pub stw_max: Option<f64>,
    pub tws_avg: Option<f64>,
    pub tws_max: Option<f64>,
    pub avg_wind_dir: Option<f64>,
    pub avg_wind_spd: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> SegmentStats {
        SegmentStats {
            start_timestamp: Some(1_686_405_600),
            start_date: NaiveDate::from_ymd_opt(2023, 6, 10),
            start_time: NaiveTime::from_hms_opt(14, 0, 0),
            moving_time: Duration::seconds(4000),
            stopped_time: Duration::seconds(600),
            moving_distance: 5.126,
            stopped_distance: 0.031,
            num_points: 412,
            speed_unit: "kts".to_string(),
            sog: Some(Aggregate { max: 7.26, avg: 4.61 }),
            stw: None,
            tws: None,
            avg_wind_dir: None,
            avg_wind_speed: None,
        }
    }

    #[test]
    fn aggregate_of_values() {
        let aggregate = Aggregate::from_values(&[4.0, 6.0, 5.0]).unwrap();
        assert_eq!(aggregate.max, 6.0);
        assert!((aggregate.avg - 5.0).abs() < 1e-12);
        assert_eq!(Aggregate::from_values(&[]), None);
    }

    #[test]
    fn renders_summary_and_distances() {
        let stats = stats();
        assert_eq!(stats.summary(), "Date: 2023-06-10, Start T: 14:00:00, Points: 412");
        assert_eq!(
            stats.distances(),
            "\tMoving T: 1:06:40 Stopped T: 0:10:00 Moving Dist: 5.13 nm Stopped Dist: 0.03 nm"
        );
    }

    #[test]
    fn renders_speeds_without_log() {
        assert_eq!(
            stats().speeds(),
            "\tSpeed over ground (kts): max: 7.3, avg: 4.6"
        );
    }

    #[test]
    fn renders_missing_wind() {
        assert_eq!(stats().wind(), "\tNo wind data available");
    }

    #[test]
    fn renders_wind_and_log() {
        let stats = SegmentStats {
            stw: Some(Aggregate { max: 6.84, avg: 4.22 }),
            tws: Some(Aggregate { max: 18.06, avg: 12.44 }),
            avg_wind_dir: Some(221.37),
            avg_wind_speed: Some(11.92),
            ..stats()
        };

        assert!(stats
            .speeds()
            .ends_with("\n\tSpeed thru water (kts): max: 6.8, avg: 4.2"));
        assert_eq!(
            stats.wind(),
            "\tTrue Wind Speed (kts): max: 18.1, avg: 12.4\n\tAverage Wind: 221.4° at 11.9 kts"
        );
        assert_eq!(stats.to_string().lines().count(), 6);
    }

    #[test]
    fn unknown_start_renders_as_unknown() {
        let stats = SegmentStats {
            start_timestamp: None,
            start_date: None,
            start_time: None,
            ..stats()
        };
        assert_eq!(stats.summary(), "Date: unknown, Start T: unknown, Points: 412");
    }

    #[test]
    fn record_keeps_missing_readings_null() {
        let record = stats().to_record(0.05);
        assert_eq!(record.moving_seconds, 4000);
        assert_eq!(record.stw_max, None);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["tws_avg"].is_null());
        assert_eq!(json["speed_unit"], "kts");
    }
}

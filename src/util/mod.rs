use chrono::{NaiveDate, NaiveTime};

pub mod config;
pub mod error;
pub mod geo;
pub mod logging;
pub mod time;
pub mod units;

pub struct DateTimeUtils {}

impl DateTimeUtils {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn date_to_str(date: Option<NaiveDate>) -> String {
        date.map_or_else(|| Self::UNKNOWN.to_string(), |d| d.format("%Y-%m-%d").to_string())
    }

    pub fn time_to_str(time: Option<NaiveTime>) -> String {
        time.map_or_else(|| Self::UNKNOWN.to_string(), |t| t.format("%H:%M:%S").to_string())
    }
}

// "{:.1}" style rendering of a value that may be missing
pub fn nullable_float_as_str(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => DateTimeUtils::UNKNOWN.to_string(),
    }
}

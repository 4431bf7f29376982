use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

pub struct TimeBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeBounds {
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start.time()
    }

    pub fn span(&self) -> Duration {
        self.end - self.start
    }
}

// Truncates to whole seconds
pub fn duration_from_secs(seconds: f64) -> Duration {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::seconds(seconds as i64)
    } else {
        Duration::zero()
    }
}

// H:MM:SS, hours are not wrapped into days
pub fn format_duration(duration: &Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();

    format!(
        "{}{}:{:0>2}:{:0>2}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

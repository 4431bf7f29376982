//! Speed and distance unit policy.
//!
//! GPS derived values come in meters and meters/second. A segment reports them
//! either in knots and nautical miles or unchanged, depending on the unit the
//! boat's own log (STW) uses.

pub const MPS_TO_KNOTS: f64 = 1.94384;
pub const METERS_TO_NM: f64 = 0.0005399566666666666;

pub const KNOTS_LABEL: &str = "kts";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnitSystem {
    /// knots and nautical miles
    Nautical,
    /// meters/second and meters
    Metric,
}

impl UnitSystem {
    pub fn from_speed_unit(label: &str) -> Self {
        if label == KNOTS_LABEL {
            UnitSystem::Nautical
        } else {
            UnitSystem::Metric
        }
    }

    pub fn speed_from_mps(&self, mps: f64) -> f64 {
        match self {
            UnitSystem::Nautical => mps_to_knots(mps),
            UnitSystem::Metric => mps,
        }
    }

    pub fn distance_from_meters(&self, meters: f64) -> f64 {
        match self {
            UnitSystem::Nautical => meters_to_nm(meters),
            UnitSystem::Metric => meters,
        }
    }

    pub fn distance_label(&self) -> &'static str {
        match self {
            UnitSystem::Nautical => "nm",
            UnitSystem::Metric => "m",
        }
    }
}

/// The motion split reports no speed (or a zero one) when the first and last
/// points of a track share a location. Such samples count as standing still.
pub fn normalize_speed_sample(raw_mps: Option<f64>) -> f64 {
    match raw_mps {
        Some(mps) if mps != 0.0 && mps.is_finite() => mps,
        _ => 0.0,
    }
}

/// Turns the text left over after stripping a reading's number into a unit label.
pub fn normalize_unit_suffix(suffix: &str) -> String {
    match suffix.trim() {
        "" | "knots" => KNOTS_LABEL.to_string(),
        other => other.to_string(),
    }
}

pub fn mps_to_knots(mps: f64) -> f64 {
    mps * MPS_TO_KNOTS
}

pub fn knots_to_mps(knots: f64) -> f64 {
    knots / MPS_TO_KNOTS
}

pub fn meters_to_nm(meters: f64) -> f64 {
    meters * METERS_TO_NM
}

pub fn nm_to_meters(nm: f64) -> f64 {
    nm / METERS_TO_NM
}

use std::collections::BTreeMap;

use crate::{
    logwarn,
    processors::annotation_parser::{AnnotationParser, ParseIssue},
    util::units::{normalize_unit_suffix, KNOTS_LABEL},
};

pub const DEPTH: &str = "Depth";
pub const STW: &str = "STW";
pub const COG: &str = "COG";
pub const SOG: &str = "SOG";
pub const TWD: &str = "TWD";
pub const TWS: &str = "TWS";
pub const AWA: &str = "AWA";
pub const AWS: &str = "AWS";

/// Numeric instrument readings of one track point. A field is `None` when the
/// sensor code is missing from the comment or its value holds no number.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorReadings {
    pub depth: Option<f64>,
    pub stw: Option<f64>,
    pub cog: Option<f64>,
    pub sog: Option<f64>,
    pub twd: Option<f64>,
    pub tws: Option<f64>,
    pub awa: Option<f64>,
    pub aws: Option<f64>,
}

/// Sensor code to raw value mapping parsed from a track point comment, e.g.
///
/// ```text
/// SOG: 5.2 kts
/// TWD 180
/// STW/SOG: 4.2/5.0
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointAnnotation {
    values: BTreeMap<String, String>,
    readings: SensorReadings,
    issues: Vec<ParseIssue>,
}

impl PointAnnotation {
    const CC: &'static str = "PointAnnotation";

    pub fn new(values: BTreeMap<String, String>, issues: Vec<ParseIssue>) -> Self {
        let number = |key: &str| values.get(key).and_then(|v| numeric_value(v));

        let readings = SensorReadings {
            depth: number(DEPTH),
            stw: number(STW),
            cog: number(COG),
            sog: number(SOG),
            twd: number(TWD),
            tws: number(TWS),
            awa: number(AWA),
            aws: number(AWS),
        };

        Self {
            values,
            readings,
            issues,
        }
    }

    pub fn from_comment(comment: Option<&str>) -> Self {
        AnnotationParser::parse(comment)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn readings(&self) -> &SensorReadings {
        &self.readings
    }

    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn depth(&self) -> Option<f64> {
        self.readings.depth
    }

    pub fn stw(&self) -> Option<f64> {
        self.readings.stw
    }

    pub fn cog(&self) -> Option<f64> {
        self.readings.cog
    }

    pub fn sog(&self) -> Option<f64> {
        self.readings.sog
    }

    pub fn twd(&self) -> Option<f64> {
        self.readings.twd
    }

    pub fn tws(&self) -> Option<f64> {
        self.readings.tws
    }

    pub fn awa(&self) -> Option<f64> {
        self.readings.awa
    }

    pub fn aws(&self) -> Option<f64> {
        self.readings.aws
    }

    /// Unit the boat's log reports speed through water in, `None` without an STW entry.
    pub fn stw_unit(&self) -> Option<String> {
        self.get(STW).map(|v| normalize_unit_suffix(&unit_suffix(v)))
    }

    pub fn speed_unit(&self) -> String {
        self.stw_unit().unwrap_or_else(|| KNOTS_LABEL.to_string())
    }

    /// True wind direction, approximated as course + apparent wind angle when
    /// the instruments did not log one (they cannot while the boat is stationary).
    pub fn effective_twd(&self) -> Option<f64> {
        self.twd().or_else(|| match (self.cog(), self.awa()) {
            (Some(cog), Some(awa)) => Some(cog + awa),
            _ => None,
        })
    }

    /// True wind speed, falling back to apparent wind speed.
    pub fn effective_tws(&self) -> Option<f64> {
        if let Some(tws) = self.tws() {
            return Some(tws);
        }

        if let Some(sog) = self.sog() {
            if sog > 0.0 {
                logwarn!(
                    "SOG is {} but no TWS was logged, using AWS {:?}",
                    sog,
                    self.aws()
                );
            }
        }

        self.aws()
    }
}

// Keeps digits and '.', "12.5 kts" => 12.5, "kts" => None
pub fn numeric_value(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse::<f64>().ok()
}

pub fn unit_suffix(raw: &str) -> String {
    raw.chars()
        .filter(|c| !(c.is_ascii_digit() || *c == '.'))
        .collect::<String>()
        .trim()
        .to_string()
}

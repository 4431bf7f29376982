use chrono::{DateTime, Utc};
use geo_types::Coord;
use serde_derive::{Deserialize, Serialize};

use crate::util::{geo::GeoUtils, time::TimeBounds};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,

    #[serde(default)]
    pub time: Option<DateTime<Utc>>,

    // Instrument readings, one "KEY: VALUE" entry per line
    #[serde(default)]
    pub comment: Option<String>,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            time: None,
            comment: None,
        }
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn coord(&self) -> Coord {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TrackSegment {
    #[serde(default)]
    pub points: Vec<TrackPoint>,
}

impl TrackSegment {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Self { points }
    }

    // First and last timestamps found in the segment
    pub fn time_bounds(&self) -> Option<TimeBounds> {
        time_bounds(&self.points)
    }

    pub fn duration_seconds(&self) -> f64 {
        self.time_bounds()
            .map_or(0.0, |bounds| bounds.span().num_milliseconds() as f64 / 1000.0)
    }

    pub fn length_2d(&self) -> f64 {
        let coords: Vec<Coord> = self.points.iter().map(TrackPoint::coord).collect();
        GeoUtils::path_length(&coords)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Track {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub segments: Vec<TrackSegment>,
}

pub fn time_bounds(points: &[TrackPoint]) -> Option<TimeBounds> {
    let start = points.iter().find_map(|p| p.time)?;
    let end = points.iter().rev().find_map(|p| p.time)?;

    Some(TimeBounds { start, end })
}

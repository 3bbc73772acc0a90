use serde::{Deserialize, Serialize};

/// Best windowed average of one channel for one interval length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelExtremum {
    /// Window length in samples (seconds at 1 Hz).
    pub interval: usize,
    pub value: f64,
    /// Index of the first sample in the winning window.
    pub offset: usize,
}

pub type BestAverages = Vec<ChannelExtremum>;

/// One point of the simplified, sensor-aligned time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergedPoint {
    #[serde(rename = "p")]
    pub power: u16,
    /// Cumulative meters.
    #[serde(rename = "d")]
    pub distance: f64,
    /// Seconds since the first record.
    #[serde(rename = "t")]
    pub time: f64,
    /// Feet.
    #[serde(rename = "e")]
    pub elevation: f32,
    #[serde(rename = "h")]
    pub heart_rate: u8,
    #[serde(rename = "g")]
    pub grade: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerZone {
    pub zone: u8,
    pub title: String,
    pub power_low: Option<i64>,
    /// `None` for the open-ended top zone.
    pub power_high: Option<i64>,
}

/// Track simplification output. `indices` point into the coordinate-aligned
/// channels and are strictly increasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Simplified {
    pub points: Vec<[f64; 3]>,
    pub indices: Vec<usize>,
}

/// What gets handed to the object store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesPayload {
    pub coordinates: Vec<[f64; 3]>,
    pub elevation: Vec<MergedPoint>,
}

/// The analytics emitted for one activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivityAnalysis {
    pub heart_analysis: BestAverages,
    pub cadence_analysis: BestAverages,
    pub temperature_analysis: BestAverages,
    /// Meters.
    pub elevation_gain: f32,
    pub stopped_time: i64,
    pub elapsed_time: i64,
    /// Kilometers.
    pub total_distance: f64,
    pub average_power: f32,
    pub normalized_power: f32,
    pub power_analysis: BestAverages,
    pub simplified_coordinates: Vec<[f64; 3]>,
    pub simplified_distances: Vec<f32>,
    pub simplified_elevations: Vec<f64>,
    pub timeseries_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_zones: Option<Vec<PowerZone>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_zone_buckets: Option<Vec<i64>>,
    #[serde(skip)]
    pub merged: Vec<MergedPoint>,
}

impl ActivityAnalysis {
    pub fn payload(&self) -> TimeseriesPayload {
        TimeseriesPayload {
            coordinates: self.simplified_coordinates.clone(),
            elevation: self.merged.clone(),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// FIT manufacturer code for Wahoo Fitness.
pub const WAHOO_FITNESS: u16 = 89;

/// Altitude in its raw FIT encoding: `(meters + 500) * 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltitudeRaw(pub u32);

impl AltitudeRaw {
    pub fn from_meters(meters: f64) -> Self {
        Self(((meters + 500.0) * 5.0).round().max(0.0) as u32)
    }

    pub fn meters(self) -> f32 {
        (self.0 as f32 / 5.0) - 500.0
    }

    /// A raw value of zero is what devices write when they have no fix.
    pub fn is_reported(self) -> bool {
        self.0 != 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub timestamp: DateTime<Utc>,
    pub power: Option<u16>,
    pub cadence: Option<u8>,
    pub temperature: Option<i8>,
    pub heart_rate: Option<u8>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<AltitudeRaw>,
    pub enhanced_altitude: Option<AltitudeRaw>,
    /// Cumulative distance in centimeters.
    pub distance: Option<u32>,
}

impl RawRecord {
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            power: None,
            cadence: None,
            temperature: None,
            heart_rate: None,
            latitude: None,
            longitude: None,
            altitude: None,
            enhanced_altitude: None,
            distance: None,
        }
    }

    pub fn has_readings(&self) -> bool {
        self.power.is_some()
            || self.cadence.is_some()
            || self.temperature.is_some()
            || self.heart_rate.is_some()
            || self.latitude.is_some()
            || self.longitude.is_some()
            || self.altitude.is_some()
            || self.enhanced_altitude.is_some()
            || self.distance.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub manufacturer: u16,
}

/// Which altitude field to trust first when accumulating elevation gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltitudeSource {
    /// Plain `altitude`, falling back to `enhanced_altitude`.
    AltitudeFirst,
    /// `enhanced_altitude`, falling back to plain `altitude`.
    EnhancedFirst,
}

impl AltitudeSource {
    pub fn for_devices(devices: &[DeviceInfo]) -> Self {
        if devices.iter().any(|d| d.manufacturer == WAHOO_FITNESS) {
            AltitudeSource::AltitudeFirst
        } else {
            AltitudeSource::EnhancedFirst
        }
    }

    pub fn pick(self, record: &RawRecord) -> Option<AltitudeRaw> {
        let (first, second) = match self {
            AltitudeSource::AltitudeFirst => (record.altitude, record.enhanced_altitude),
            AltitudeSource::EnhancedFirst => (record.enhanced_altitude, record.altitude),
        };
        first
            .filter(|a| a.is_reported())
            .or_else(|| second.filter(|a| a.is_reported()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DecodedActivity {
    pub records: Vec<RawRecord>,
    pub devices: Vec<DeviceInfo>,
}

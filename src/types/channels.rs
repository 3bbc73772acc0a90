use crate::types::activity::AltitudeRaw;

/// Per-channel series in traversal order. Power, cadence and heart rate hold one
/// entry per traversed sample (gaps zero-filled); temperature and distance only
/// hold reported values and are never cross-indexed with the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedChannels {
    pub power: Vec<u16>,
    pub cadence: Vec<u8>,
    pub temperature: Vec<i8>,
    pub heart_rate: Vec<u8>,
    /// Meters.
    pub distance: Vec<f32>,
}

/// One sample that carried a usable position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedSample {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude_raw: AltitudeRaw,
    pub elevation_ft: f64,
    pub power: u16,
    pub heart_rate: u8,
    /// Meters; zero when the record carried no distance.
    pub distance: f32,
    /// Seconds since the first raw record.
    pub elapsed: f64,
}

/// Channels that exist only for position-bearing samples. Every column has the
/// same length because they are only ever appended together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateAlignedChannels {
    longitude: Vec<f64>,
    latitude: Vec<f64>,
    altitude_raw: Vec<AltitudeRaw>,
    elevation_ft: Vec<f64>,
    power: Vec<u16>,
    heart_rate: Vec<u8>,
    distance: Vec<f32>,
    elapsed: Vec<f64>,
}

impl CoordinateAlignedChannels {
    pub fn push(&mut self, sample: AlignedSample) {
        self.longitude.push(sample.longitude);
        self.latitude.push(sample.latitude);
        self.altitude_raw.push(sample.altitude_raw);
        self.elevation_ft.push(sample.elevation_ft);
        self.power.push(sample.power);
        self.heart_rate.push(sample.heart_rate);
        self.distance.push(sample.distance);
        self.elapsed.push(sample.elapsed);
    }

    pub fn len(&self) -> usize {
        self.longitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longitude.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<AlignedSample> {
        if idx >= self.len() {
            return None;
        }
        Some(AlignedSample {
            longitude: self.longitude[idx],
            latitude: self.latitude[idx],
            altitude_raw: self.altitude_raw[idx],
            elevation_ft: self.elevation_ft[idx],
            power: self.power[idx],
            heart_rate: self.heart_rate[idx],
            distance: self.distance[idx],
            elapsed: self.elapsed[idx],
        })
    }

    /// `[longitude, latitude, raw altitude]` triples, the simplifier's input.
    pub fn coordinates(&self) -> Vec<[f64; 3]> {
        self.longitude
            .iter()
            .zip(&self.latitude)
            .zip(&self.altitude_raw)
            .map(|((lon, lat), alt)| [*lon, *lat, alt.0 as f64])
            .collect()
    }

    pub fn power(&self) -> &[u16] {
        &self.power
    }

    pub fn distance(&self) -> &[f32] {
        &self.distance
    }

    pub fn elevation_ft(&self) -> &[f64] {
        &self.elevation_ft
    }
}

/// Everything the aggregator derives in its single pass over the records.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub cleaned: CleanedChannels,
    pub aligned: CoordinateAlignedChannels,
    /// Meters.
    pub elevation_gain: f32,
    pub stopped_seconds: f64,
    pub elapsed_seconds: f64,
    pub valid_samples: usize,
    /// Kilometers, from the last record that reported a distance.
    pub total_distance_km: f64,
}

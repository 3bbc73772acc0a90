use std::collections::HashSet;

use chrono::{DateTime, Utc};
use fitparser::de::{from_bytes_with_options, DecodeOption};
use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};

use crate::error::DecodeError;
use crate::pipeline::parse::Decoder;
use crate::types::activity::{AltitudeRaw, DecodedActivity, DeviceInfo, RawRecord};

const INVALID_UINT8: u8 = u8::MAX;
const INVALID_SINT8: i8 = i8::MAX;
const INVALID_UINT16: u16 = u16::MAX;

pub struct FitDecoder;

impl Decoder for FitDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedActivity, DecodeError> {
        // Composite fields are kept so plain `altitude` is still reported next to
        // the `enhanced_altitude` it expands into.
        let options: HashSet<DecodeOption> = [
            DecodeOption::ReturnNumericEnumValues,
            DecodeOption::KeepCompositeFields,
        ]
        .into_iter()
        .collect();
        let data = from_bytes_with_options(bytes, &options)
            .map_err(|e| DecodeError::InvalidFit(format!("Failed to parse FIT file: {}", e)))?;

        let mut activity = DecodedActivity::default();
        let mut last_timestamp: Option<DateTime<Utc>> = None;

        for message in &data {
            match message.kind() {
                MesgNum::Record => {
                    let (mut record, timestamp) = decode_record(message);
                    if let Some(ts) = timestamp {
                        if last_timestamp.is_none() {
                            // Leading records without a timestamp take the first one seen.
                            for earlier in &mut activity.records {
                                earlier.timestamp = ts;
                            }
                        }
                        last_timestamp = Some(ts);
                    }
                    record.timestamp = last_timestamp.unwrap_or_default();
                    activity.records.push(record);
                }
                MesgNum::DeviceInfo => {
                    if let Some(device) = decode_device_info(message) {
                        activity.devices.push(device);
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(
            "Decoded {} records and {} device infos",
            activity.records.len(),
            activity.devices.len()
        );

        Ok(activity)
    }
}

/// The record and its own timestamp, if it carried one.
fn decode_record(message: &FitDataRecord) -> (RawRecord, Option<DateTime<Utc>>) {
    let mut record = RawRecord::at(DateTime::default());
    let mut timestamp = None;

    for field in message.fields() {
        let value = field.value();
        match field.name() {
            "timestamp" => {
                if let Value::Timestamp(ts) = value {
                    timestamp = Some(ts.with_timezone(&Utc));
                }
            }
            "position_lat" => {
                if let Value::SInt32(val) = value {
                    record.latitude = Some(semicircles_to_degrees(*val));
                }
            }
            "position_long" => {
                if let Value::SInt32(val) = value {
                    record.longitude = Some(semicircles_to_degrees(*val));
                }
            }
            "altitude" => record.altitude = as_f64(value).map(AltitudeRaw::from_meters),
            "enhanced_altitude" => {
                record.enhanced_altitude = as_f64(value).map(AltitudeRaw::from_meters)
            }
            "distance" => {
                record.distance = as_f64(value)
                    .filter(|m| m.is_finite() && *m >= 0.0)
                    .map(|m| (m * 100.0).round() as u32)
            }
            "power" => {
                record.power = as_u64(value)
                    .and_then(|v| u16::try_from(v).ok())
                    .filter(|v| *v != INVALID_UINT16)
            }
            "cadence" => {
                record.cadence = as_u64(value)
                    .and_then(|v| u8::try_from(v).ok())
                    .filter(|v| *v != INVALID_UINT8)
            }
            "heart_rate" => {
                record.heart_rate = as_u64(value)
                    .and_then(|v| u8::try_from(v).ok())
                    .filter(|v| *v != INVALID_UINT8)
            }
            "temperature" => {
                if let Value::SInt8(val) = value {
                    record.temperature = Some(*val).filter(|v| *v != INVALID_SINT8);
                }
            }
            _ => {}
        }
    }

    (record, timestamp)
}

fn decode_device_info(message: &FitDataRecord) -> Option<DeviceInfo> {
    message
        .fields()
        .iter()
        .find(|field| field.name() == "manufacturer")
        .and_then(|field| as_u64(field.value()))
        .and_then(|code| u16::try_from(code).ok())
        .map(|manufacturer| DeviceInfo { manufacturer })
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::UInt8(v) | Value::UInt8z(v) | Value::Enum(v) | Value::Byte(v) => Some(*v as u64),
        Value::UInt16(v) | Value::UInt16z(v) => Some(*v as u64),
        Value::UInt32(v) | Value::UInt32z(v) => Some(*v as u64),
        Value::UInt64(v) | Value::UInt64z(v) => Some(*v),
        // Enums come back as SInt64 with numeric enum values enabled.
        Value::SInt64(v) => u64::try_from(*v).ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Float64(v) => Some(*v),
        Value::Float32(v) => Some(*v as f64),
        other => as_u64(other).map(|v| v as f64),
    };
    number.filter(|v| !v.is_nan())
}

fn semicircles_to_degrees(semicircles: i32) -> f64 {
    (semicircles as f64) * (180.0 / 2_147_483_648.0)
}

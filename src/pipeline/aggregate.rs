use crate::error::ProcessError;
use crate::types::activity::{AltitudeRaw, AltitudeSource, DecodedActivity, RawRecord};
use crate::types::channels::{Aggregate, AlignedSample};

const FEET_PER_METER: f32 = 3.28084;

/// Single pass over the raw records: filters sentinels, builds both channel
/// sets and accumulates elevation gain and stopped time.
pub fn aggregate(activity: &DecodedActivity) -> Result<Aggregate, ProcessError> {
    let records = &activity.records;
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ProcessError::EmptyActivity),
    };

    let source = AltitudeSource::for_devices(&activity.devices);
    let start = first.timestamp;
    let mut agg = Aggregate {
        elapsed_seconds: seconds_between(first, last),
        ..Aggregate::default()
    };
    let mut previous_altitude: Option<f32> = None;

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            let prev = &records[i - 1];
            // Only distance is compared; timestamp gaps alone are not stops.
            if record.distance == prev.distance {
                agg.stopped_seconds += seconds_between(prev, record);
            }
        }

        // Every record keeps a slot in the zero-filled channels, readings or not.
        if record.has_readings() {
            agg.valid_samples += 1;
        }

        let power = record.power.unwrap_or(0);
        let heart_rate = record.heart_rate.unwrap_or(0);
        agg.cleaned.power.push(power);
        agg.cleaned.cadence.push(record.cadence.unwrap_or(0));
        agg.cleaned.heart_rate.push(heart_rate);
        if let Some(temp) = record.temperature.filter(|t| *t != 0) {
            agg.cleaned.temperature.push(temp);
        }
        if let Some(cm) = record.distance {
            agg.cleaned.distance.push(cm as f32 / 100.0);
            agg.total_distance_km = cm as f64 / 100.0 / 1000.0;
        }

        if let Some((lon, lat, altitude_raw)) = position_of(record) {
            agg.aligned.push(AlignedSample {
                longitude: lon,
                latitude: lat,
                altitude_raw,
                elevation_ft: meters_to_feet(altitude_raw.meters()),
                power,
                heart_rate,
                distance: record.distance.map(|cm| cm as f32 / 100.0).unwrap_or(0.0),
                elapsed: (record.timestamp - start).num_milliseconds() as f64 / 1000.0,
            });
        }

        let Some(altitude) = source.pick(record).map(|raw| raw.meters()) else {
            continue;
        };
        if let Some(prev) = previous_altitude {
            if altitude > prev {
                agg.elevation_gain += altitude - prev;
            }
        }
        previous_altitude = Some(altitude);
    }

    if agg.valid_samples == 0 {
        return Err(ProcessError::NoValidSamples);
    }

    tracing::debug!(
        "Aggregated {} of {} records ({} with position), gain {:.1} m",
        agg.valid_samples,
        records.len(),
        agg.aligned.len(),
        agg.elevation_gain
    );

    Ok(agg)
}

/// Longitude, latitude and raw altitude when the record can sit on the track.
fn position_of(record: &RawRecord) -> Option<(f64, f64, AltitudeRaw)> {
    let lat = record.latitude.filter(|v| *v != 0.0 && !v.is_nan())?;
    let lon = record.longitude.filter(|v| *v != 0.0 && !v.is_nan())?;
    let altitude = record.enhanced_altitude.or(record.altitude)?;
    Some((lon, lat, altitude))
}

/// Feet, rounded to two decimals.
fn meters_to_feet(meters: f32) -> f64 {
    let feet = (meters * FEET_PER_METER) as f64;
    (feet * 100.0).round() / 100.0
}

fn seconds_between(from: &RawRecord, to: &RawRecord) -> f64 {
    (to.timestamp - from.timestamp).num_milliseconds() as f64 / 1000.0
}

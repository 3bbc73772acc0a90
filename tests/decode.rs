mod common;

use fitstats_rs::pipeline::parse;
use fitstats_rs::types::activity::{AltitudeRaw, DeviceInfo, WAHOO_FITNESS};

#[test]
fn decodes_records_and_devices() {
    let activity = parse::decode(&common::sample_ride()).expect("decode");

    assert_eq!(activity.records.len(), 5);
    assert_eq!(
        activity.devices,
        vec![DeviceInfo {
            manufacturer: WAHOO_FITNESS
        }]
    );

    let r = &activity.records[1];
    assert_eq!(r.timestamp, common::fit_time(0));
    assert_eq!(r.latitude, Some(45.0));
    assert_eq!(r.longitude, Some(22.5));
    assert_eq!(r.enhanced_altitude, Some(AltitudeRaw(3000)));
    assert_eq!(r.altitude, None);
    assert_eq!(r.distance, Some(0));
    assert_eq!(r.power, Some(200));
    assert_eq!(r.cadence, Some(90));
    assert_eq!(r.heart_rate, Some(140));
    assert_eq!(r.temperature, Some(20));
}

#[test]
fn sentinel_readings_decode_as_absent() {
    let activity = parse::decode(&common::sample_ride()).expect("decode");

    let r = &activity.records[2];
    assert_eq!(r.timestamp, common::fit_time(1));
    assert_eq!(r.power, None);
    assert_eq!(r.cadence, None);
    assert_eq!(r.heart_rate, None);
    assert_eq!(r.temperature, None);
    assert_eq!(r.distance, Some(500));
    assert_eq!(r.enhanced_altitude, Some(AltitudeRaw(3005)));
}

#[test]
fn unstamped_records_borrow_a_neighbouring_timestamp() {
    let activity = parse::decode(&common::sample_ride()).expect("decode");

    // leading record takes the first timestamp in the file
    let leading = &activity.records[0];
    assert_eq!(leading.timestamp, common::fit_time(0));
    assert_eq!(leading.power, Some(150));
    assert_eq!(leading.heart_rate, Some(120));

    // later ones keep the previous timestamp
    let later = &activity.records[3];
    assert_eq!(later.timestamp, common::fit_time(1));
    assert_eq!(later.power, Some(250));

    assert_eq!(activity.records[4].timestamp, common::fit_time(2));
}

#[test]
fn plain_altitude_field_is_kept() {
    let mut fit = common::FitWriter::new();
    fit.define(0, 20, &[(253, 4, 0x86), (2, 2, 0x84)])
        .data(0, &[&common::RIDE_START.to_le_bytes(), &2600u16.to_le_bytes()]);

    let activity = parse::decode(&fit.finish()).expect("decode");
    assert_eq!(activity.records.len(), 1);
    assert_eq!(activity.records[0].altitude, Some(AltitudeRaw(2600)));
}

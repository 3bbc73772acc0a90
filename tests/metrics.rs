use fitstats_rs::pipeline::curves::{best_averages, channel_curves, generate_intervals};
use fitstats_rs::pipeline::power::{average_power, normalized_power};
use fitstats_rs::types::channels::CleanedChannels;

#[test]
fn constant_power_normalizes_to_itself() {
    let powers = vec![100_u16; 45];
    assert!((normalized_power(&powers) - 100.0).abs() < 1e-3);
    assert!((average_power(&powers) - 100.0).abs() < 1e-6);
}

#[test]
fn variable_power_normalizes_above_average() {
    let powers: Vec<u16> = (0..600)
        .map(|i| if (i / 60) % 2 == 0 { 350 } else { 100 })
        .collect();
    let np = normalized_power(&powers);
    let avg = average_power(&powers);
    assert!(np > avg, "np {} should exceed avg {}", np, avg);
}

#[test]
fn zero_filled_gaps_pull_normalized_power_down() {
    let steady = vec![250_u16; 120];
    let mut with_gap = steady.clone();
    with_gap.extend(std::iter::repeat(0).take(120));
    assert!(normalized_power(&with_gap) < normalized_power(&steady));
}

#[test]
fn short_series_uses_available_window() {
    // window of 1, then 2: averages 100 and 150
    let np = normalized_power(&[100, 200]);
    let expected = ((100f64.powi(4) + 150f64.powi(4)) / 2.0).powf(0.25) as f32;
    assert!((np - expected).abs() < 1e-3);
    assert_eq!(normalized_power(&[]), 0.0);
}

#[test]
fn interval_catalog_respects_length() {
    assert!(generate_intervals(0).is_empty());
    assert_eq!(generate_intervals(5), vec![1, 2, 3, 4, 5]);

    let short = generate_intervals(100);
    assert_eq!(&short[..10], &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(&short[10..], &[15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 90, 100]);

    let long = generate_intervals(4 * 3600);
    assert!(long.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(*long.last().expect("last"), 4 * 3600);
    assert!(long.contains(&3600));
    assert!(long.contains(&4500));
    assert!(!long.contains(&3700));
    assert!(long.len() > short.len());
}

#[test]
fn best_average_prefers_earliest_window_on_ties() {
    let values: Vec<u16> = vec![5, 1, 5];
    let curve = best_averages(&[1, 2], &values);
    assert_eq!(curve[0].interval, 1);
    assert_eq!(curve[0].value, 5.0);
    assert_eq!(curve[0].offset, 0);
    assert_eq!(curve[1].value, 3.0);
    assert_eq!(curve[1].offset, 0);
}

#[test]
fn best_average_finds_late_peak() {
    let values: Vec<u16> = vec![100, 100, 100, 400, 500, 100];
    let curve = best_averages(&[2], &values);
    assert_eq!(curve[0].value, 450.0);
    assert_eq!(curve[0].offset, 3);
}

#[test]
fn intervals_longer_than_channel_are_skipped() {
    let values: Vec<u8> = vec![150, 160, 170];
    let curve = best_averages(&[1, 2, 10], &values);
    assert_eq!(curve.len(), 2);
    assert!(best_averages::<u8>(&[1, 2], &[]).is_empty());
}

#[test]
fn best_average_is_non_increasing_for_decaying_effort() {
    let values: Vec<u16> = vec![600, 450, 380, 320, 300, 280, 260, 250];
    let curve = best_averages(&generate_intervals(values.len()), &values);
    assert!(curve.windows(2).all(|w| w[0].value >= w[1].value));
}

#[test]
fn negative_temperatures_average_correctly() {
    let values: Vec<i8> = vec![-5, -3, -4];
    let curve = best_averages(&[1, 3], &values);
    assert_eq!(curve[0].value, -3.0);
    assert_eq!(curve[0].offset, 1);
    assert_eq!(curve[1].value, -4.0);
}

#[test]
fn channel_curves_are_computed_per_channel() {
    let channels = CleanedChannels {
        power: vec![200, 300, 250, 100],
        cadence: vec![80, 90, 85, 0],
        temperature: vec![20],
        heart_rate: vec![140, 150, 160, 155],
        distance: vec![0.0, 5.0, 10.0, 15.0],
    };
    let curves = channel_curves(&generate_intervals(4), &channels);
    assert_eq!(curves.power.len(), 4);
    assert_eq!(curves.power[0].value, 300.0);
    assert_eq!(curves.cadence[0].value, 90.0);
    assert_eq!(curves.temperature.len(), 1);
    assert_eq!(curves.heart_rate[1].value, 157.5);
    assert_eq!(curves.heart_rate[1].offset, 2);
}

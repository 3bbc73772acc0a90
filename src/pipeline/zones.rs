use crate::types::analysis::{MergedPoint, PowerZone};

/// Zone table as percentages of threshold power.
const ZONE_PERCENTAGES: &[(u8, &str, i64, Option<i64>)] = &[
    (0, "Not pedaling", 0, Some(0)),
    (1, "Active Recovery", 1, Some(56)),
    (2, "Endurance", 56, Some(76)),
    (3, "Tempo", 76, Some(91)),
    (4, "Threshold", 91, Some(106)),
    (5, "VO2max", 106, Some(121)),
    (6, "Anaerobic Capacity", 121, None),
];

/// Absolute zone boundaries in watts, truncated to whole watts.
pub fn power_zones(threshold: i64) -> Vec<PowerZone> {
    ZONE_PERCENTAGES
        .iter()
        .map(|&(zone, title, low, high)| PowerZone {
            zone,
            title: title.to_string(),
            power_low: Some(low * threshold / 100),
            power_high: high.map(|pct| pct * threshold / 100),
        })
        .collect()
}

/// Highest zone whose lower bound the power reaches.
pub fn zone_index(zones: &[PowerZone], power: u16) -> Option<usize> {
    zones
        .iter()
        .rposition(|z| z.power_low.is_some_and(|low| power as i64 >= low))
}

/// Seconds spent in each zone. Every merged point owns the span until the next
/// point; the last one owns the rest of the elapsed time.
pub fn time_in_zones(zones: &[PowerZone], merged: &[MergedPoint], elapsed: f64) -> Vec<i64> {
    let mut buckets = vec![0_i64; zones.len()];

    for (i, point) in merged.iter().enumerate() {
        let Some(zone) = zone_index(zones, point.power) else {
            continue;
        };
        let until = merged.get(i + 1).map(|next| next.time).unwrap_or(elapsed);
        let span = (until - point.time).max(0.0);
        buckets[zone] += span.round() as i64;
    }

    buckets
}

use crate::types::analysis::MergedPoint;
use crate::types::channels::CoordinateAlignedChannels;

/// Re-aligns the coordinate-bound channels onto the kept track points and
/// annotates each point with the grade from its predecessor.
pub fn merge(indices: &[usize], aligned: &CoordinateAlignedChannels) -> Vec<MergedPoint> {
    let mut merged = Vec::with_capacity(indices.len());
    // (elevation ft, distance m) of the previous emitted point
    let mut previous: Option<(f64, f64)> = None;

    for &idx in indices {
        let Some(sample) = aligned.get(idx) else {
            tracing::warn!("Skipping out-of-range track index {}", idx);
            continue;
        };

        let distance = sample.distance as f64;
        let grade = previous
            .map(|(prev_elevation, prev_distance)| {
                grade_between(prev_elevation, sample.elevation_ft, prev_distance, distance)
            })
            .unwrap_or(0.0);
        previous = Some((sample.elevation_ft, distance));

        merged.push(MergedPoint {
            power: sample.power,
            distance,
            time: sample.elapsed,
            elevation: sample.elevation_ft as f32,
            heart_rate: sample.heart_rate,
            grade,
        });
    }

    merged
}

fn grade_between(prev_elevation: f64, elevation: f64, prev_distance: f64, distance: f64) -> f64 {
    let run = distance - prev_distance;
    if run == 0.0 {
        return 0.0;
    }
    (elevation - prev_elevation) / run
}

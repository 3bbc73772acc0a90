pub mod aggregate;
pub mod curves;
pub mod merge;
pub mod parse;
pub mod power;
pub mod simplify;
pub mod zones;

use crate::config::DEFAULT_SIMPLIFY_TOLERANCE;
use crate::error::ProcessError;
use crate::sink::KeyGenerator;
use crate::types::activity::DecodedActivity;
use crate::types::analysis::ActivityAnalysis;

#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    /// Track simplification tolerance in degrees.
    pub tolerance: f64,
    /// Threshold power in watts; zones are only computed when this is positive.
    pub threshold_power: Option<i64>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
            threshold_power: None,
        }
    }
}

/// Runs the whole pipeline over one decoded activity.
pub fn analyze(
    activity: &DecodedActivity,
    options: &AnalysisOptions,
    keys: &dyn KeyGenerator,
) -> Result<ActivityAnalysis, ProcessError> {
    let agg = aggregate::aggregate(activity)?;

    let intervals = curves::generate_intervals(activity.records.len());
    let curves = curves::channel_curves(&intervals, &agg.cleaned);
    let normalized_power = power::normalized_power(&agg.cleaned.power);
    let average_power = power::average_power(&agg.cleaned.power);

    let simplified = simplify::simplify_with_indices(&agg.aligned.coordinates(), options.tolerance);
    let merged = merge::merge(&simplified.indices, &agg.aligned);

    tracing::info!(
        "Simplified track from {} to {} points",
        agg.aligned.len(),
        simplified.points.len()
    );

    let (power_zones, power_zone_buckets) = match options.threshold_power.filter(|t| *t > 0) {
        Some(threshold) => {
            let table = zones::power_zones(threshold);
            let buckets = zones::time_in_zones(&table, &merged, agg.elapsed_seconds.trunc());
            (Some(table), Some(buckets))
        }
        None => (None, None),
    };

    Ok(ActivityAnalysis {
        heart_analysis: curves.heart_rate,
        cadence_analysis: curves.cadence,
        temperature_analysis: curves.temperature,
        elevation_gain: agg.elevation_gain,
        stopped_time: agg.stopped_seconds as i64,
        elapsed_time: agg.elapsed_seconds as i64,
        total_distance: agg.total_distance_km,
        average_power,
        normalized_power,
        power_analysis: curves.power,
        simplified_distances: merged.iter().map(|p| p.distance as f32).collect(),
        simplified_elevations: simplified
            .indices
            .iter()
            .filter_map(|&i| agg.aligned.get(i))
            .map(|sample| sample.elevation_ft)
            .collect(),
        simplified_coordinates: simplified.points,
        timeseries_key: keys.next_key(),
        power_zones,
        power_zone_buckets,
        merged,
    })
}

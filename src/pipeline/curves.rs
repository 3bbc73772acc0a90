//! Best-average curves: for each window length in a catalog, the highest mean
//! of any contiguous window of that length.

use crate::types::analysis::{BestAverages, ChannelExtremum};
use crate::types::channels::CleanedChannels;

/// `(upper bound, step)` tiers, in samples. Short efforts get per-second
/// resolution; long ones are sampled more coarsely.
const INTERVAL_TIERS: &[(usize, usize)] = &[
    (10, 1),
    (60, 5),
    (300, 30),
    (1200, 60),
    (3600, 300),
    (usize::MAX, 900),
];

/// Interval catalog for a recording of `total` samples. Strictly increasing,
/// never longer than `total`, and ends with the full recording.
pub fn generate_intervals(total: usize) -> Vec<usize> {
    let mut intervals = Vec::new();
    let mut next: usize = 1;

    for &(upper, step) in INTERVAL_TIERS {
        next = next.div_ceil(step) * step;
        while next <= upper && next <= total {
            intervals.push(next);
            next += step;
        }
        if next > total {
            break;
        }
    }

    if total > 0 && intervals.last() != Some(&total) {
        intervals.push(total);
    }
    intervals
}

/// Max windowed average for every interval that fits in `values`. Ties go to
/// the earliest window.
pub fn best_averages<T>(intervals: &[usize], values: &[T]) -> BestAverages
where
    T: Copy + Into<i64>,
{
    intervals
        .iter()
        .filter(|&&len| len > 0 && len <= values.len())
        .map(|&len| best_window(values, len))
        .collect()
}

fn best_window<T>(values: &[T], len: usize) -> ChannelExtremum
where
    T: Copy + Into<i64>,
{
    let mut window_sum: i64 = values[..len].iter().map(|&v| Into::<i64>::into(v)).sum();
    let mut best_sum = window_sum;
    let mut best_offset = 0;

    for i in len..values.len() {
        let incoming: i64 = values[i].into();
        let outgoing: i64 = values[i - len].into();
        window_sum += incoming - outgoing;
        if window_sum > best_sum {
            best_sum = window_sum;
            best_offset = i + 1 - len;
        }
    }

    ChannelExtremum {
        interval: len,
        value: best_sum as f64 / len as f64,
        offset: best_offset,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelCurves {
    pub power: BestAverages,
    pub cadence: BestAverages,
    pub temperature: BestAverages,
    pub heart_rate: BestAverages,
}

/// All four channel curves. Channels are independent, so they run in parallel.
pub fn channel_curves(intervals: &[usize], channels: &CleanedChannels) -> ChannelCurves {
    let ((power, cadence), (temperature, heart_rate)) = rayon::join(
        || {
            rayon::join(
                || best_averages(intervals, &channels.power),
                || best_averages(intervals, &channels.cadence),
            )
        },
        || {
            rayon::join(
                || best_averages(intervals, &channels.temperature),
                || best_averages(intervals, &channels.heart_rate),
            )
        },
    );

    ChannelCurves {
        power,
        cadence,
        temperature,
        heart_rate,
    }
}

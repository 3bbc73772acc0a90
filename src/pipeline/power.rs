/// Rolling window used for normalized power, in samples.
pub const NP_WINDOW: usize = 30;

/// Normalized power of a zero-filled 1 Hz power series.
///
/// Trailing 30-sample moving average (shorter at the start), each value raised
/// to the fourth power, averaged, then the fourth root taken. Zeros from gaps
/// stay in the series and pull the result down.
pub fn normalized_power(powers: &[u16]) -> f32 {
    if powers.is_empty() {
        return 0.0;
    }

    let mut window_sum = 0.0_f64;
    let mut fourth_sum = 0.0_f64;

    for (i, &p) in powers.iter().enumerate() {
        window_sum += p as f64;
        if i >= NP_WINDOW {
            window_sum -= powers[i - NP_WINDOW] as f64;
        }
        let len = (i + 1).min(NP_WINDOW) as f64;
        fourth_sum += (window_sum / len).powi(4);
    }

    (fourth_sum / powers.len() as f64).powf(0.25) as f32
}

pub fn average_power(powers: &[u16]) -> f32 {
    if powers.is_empty() {
        return 0.0;
    }
    let total: u64 = powers.iter().map(|&p| p as u64).sum();
    (total as f64 / powers.len() as f64) as f32
}

use crate::constants::MIN_POWER_THRESHOLD;

/// Index of the largest value, first occurrence on ties
///
/// NaN values never win. Returns `None` for an empty series.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b || v.is_nan() => {}
            None if v.is_nan() => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Convert a time offset to a whole number of samples, `round(seconds * sample_rate)`
pub fn seconds_to_samples(seconds: f64, sample_rate: f64) -> i64 {
    (seconds * sample_rate).round() as i64
}

/// Circularly rotate a series backward by `shift` samples
///
/// `out[i] = x[(i + shift) mod n]`; a negative shift rotates forward and any
/// shift is reduced modulo the series length.
pub fn rotate_backward(series: &[f64], shift: i64) -> Vec<f64> {
    let mut out = series.to_vec();
    if !out.is_empty() {
        let k = shift.rem_euclid(out.len() as i64) as usize;
        out.rotate_left(k);
    }
    out
}

/// Peak power over the mean power of the samples outside a window around the peak, in dB
///
/// Returns `None` when the window covers the whole series or the noise
/// floor is below [`MIN_POWER_THRESHOLD`].
pub fn peak_to_noise_db(series: &[f64], peak_index: usize, half_width: usize) -> Option<f64> {
    let peak = *series.get(peak_index)?;
    let start = peak_index.saturating_sub(half_width);
    let end = peak_index.saturating_add(half_width + 1).min(series.len());

    let outside = series[..start].iter().chain(&series[end..]);
    let (sum, count) = outside.fold((0.0, 0usize), |(s, c), &x| (s + x * x, c + 1));
    if count == 0 {
        return None;
    }

    let noise_power = sum / count as f64;
    if noise_power < MIN_POWER_THRESHOLD {
        return None;
    }
    Some(10.0 * (peak * peak / noise_power).log10())
}

use crate::error::{EngError, Result};
use crate::signal_processing::argmax;

/// Full cross-correlation of `b` against `a`
///
/// The result has `a.len() + b.len() - 1` entries. Entry `k` holds the
/// correlation at lag `k - (a.len() - 1)`:
///
/// `R[k] = sum_n a[n] * b[n + k - (a.len() - 1)]`
///
/// so a positive lag pairs each sample of `a` with a later sample of `b`.
pub fn cross_correlate_full(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let na = a.len() as i64;
    let nb = b.len() as i64;
    (-(na - 1)..nb)
        .map(|lag| {
            let start = 0i64.max(-lag);
            let end = na.min(nb - lag);
            (start..end)
                .map(|n| a[n as usize] * b[(n + lag) as usize])
                .sum::<f64>()
        })
        .collect()
}

/// Lag in samples at which `b` best matches `a`
///
/// Positive when `b` is a delayed copy of `a`. When several lags reach the
/// same maximum correlation the most negative lag wins.
///
/// # Errors
/// Returns `EngError::DimensionMismatch` if the series differ in length and
/// `EngError::InvalidParameter` if they are empty or hold non-finite samples.
pub fn estimate_lag_samples(a: &[f64], b: &[f64]) -> Result<i64> {
    if a.len() != b.len() {
        return Err(EngError::DimensionMismatch {
            what: "latency estimation series length",
            expected: a.len(),
            actual: b.len(),
        });
    }

    if a.is_empty() {
        return Err(EngError::InvalidParameter(
            "cannot estimate latency of an empty series".to_string(),
        ));
    }
    if let Some(bad) = a.iter().chain(b).find(|x| !x.is_finite()) {
        return Err(EngError::InvalidParameter(format!(
            "cannot estimate latency of a series holding non-finite sample {}",
            bad
        )));
    }

    let corr = cross_correlate_full(a, b);
    let peak = argmax(&corr).ok_or_else(|| {
        EngError::InvalidParameter("cross-correlation has no finite maximum".to_string())
    })?;

    Ok(peak as i64 - (a.len() as i64 - 1))
}

/// Signed latency of `b` relative to `a`, in seconds
///
/// Resolution is one sample period; no sub-sample interpolation is done.
///
/// # Errors
/// Returns `EngError::InvalidParameter` for a non-positive sampling rate or
/// empty or non-finite series, and `EngError::DimensionMismatch` for series of different
/// lengths.
pub fn estimate_latency(a: &[f64], b: &[f64], sample_rate: f64) -> Result<f64> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(EngError::InvalidParameter(format!(
            "sample rate must be positive, got {}",
            sample_rate
        )));
    }

    let lag = estimate_lag_samples(a, b)?;
    log::debug!("Cross-correlation peak at lag {} samples", lag);
    Ok(lag as f64 / sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_correlate_full_layout() {
        let a = [1.0, 2.0, 3.0];
        let b = [0.0, 1.0, 0.5];
        let corr = cross_correlate_full(&a, &b);
        assert_eq!(corr.len(), 5);
        // lag -2: a[2]*b[0]
        assert_eq!(corr[0], 0.0);
        // lag -1: a[1]*b[0] + a[2]*b[1]
        assert_eq!(corr[1], 3.0);
        // lag 0: 0 + 2 + 1.5
        assert_eq!(corr[2], 3.5);
        // lag 1: a[0]*b[1] + a[1]*b[2]
        assert_eq!(corr[3], 2.0);
        // lag 2: a[0]*b[2]
        assert_eq!(corr[4], 0.5);
    }

    #[test]
    fn test_lag_of_delayed_impulse() {
        let mut a = vec![0.0; 32];
        let mut b = vec![0.0; 32];
        a[10] = 1.0;
        b[14] = 1.0;
        assert_eq!(estimate_lag_samples(&a, &b).unwrap(), 4);
        assert_eq!(estimate_lag_samples(&b, &a).unwrap(), -4);
    }

    #[test]
    fn test_tie_breaks_on_first_maximum() {
        // Two equal peaks in b at lags 2 and 6
        let mut a = vec![0.0; 16];
        let mut b = vec![0.0; 16];
        a[4] = 1.0;
        b[6] = 1.0;
        b[10] = 1.0;
        assert_eq!(estimate_lag_samples(&a, &b).unwrap(), 2);
    }

    #[test]
    fn test_latency_in_seconds() {
        let mut a = vec![0.0; 100];
        let mut b = vec![0.0; 100];
        a[20] = 1.0;
        b[27] = 1.0;
        let latency = estimate_latency(&a, &b, 20_000.0).unwrap();
        assert_eq!(latency, 7.0 / 20_000.0);
    }

    #[test]
    fn test_length_mismatch() {
        let result = estimate_latency(&[0.0; 10], &[0.0; 11], 1000.0);
        assert!(matches!(result, Err(EngError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_empty_and_bad_rate() {
        assert!(matches!(
            estimate_latency(&[], &[], 1000.0),
            Err(EngError::InvalidParameter(_))
        ));
        assert!(matches!(
            estimate_latency(&[1.0], &[1.0], 0.0),
            Err(EngError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_non_finite_samples_rejected() {
        let err = estimate_latency(&[f64::NAN; 4], &[f64::NAN; 4], 1000.0).unwrap_err();
        match err {
            EngError::InvalidParameter(msg) => {
                assert!(msg.contains("non-finite"), "unexpected message: {}", msg)
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }

        let mut b = vec![0.0; 8];
        b[3] = f64::INFINITY;
        assert!(matches!(
            estimate_lag_samples(&[1.0; 8], &b),
            Err(EngError::InvalidParameter(_))
        ));
    }
}

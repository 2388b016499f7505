use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{EngError, Result};

/// Build the random source for noise injection
///
/// A seed gives a reproducible generator; `None` seeds from the OS.
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Mean power of a series
pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|&x| x * x).sum::<f64>() / signal.len() as f64
}

/// Add zero-mean white Gaussian noise to every sample in place
///
/// Each call draws fresh samples from `rng`, so calling this once per
/// channel yields independent noise realizations.
pub fn add_gaussian_noise<R>(signal: &mut [f64], noise_std: f64, rng: &mut R) -> Result<()>
where
    R: Rng + ?Sized,
{
    if !(noise_std.is_finite() && noise_std >= 0.0) {
        return Err(EngError::InvalidParameter(format!(
            "noise std must be finite and non-negative, got {}",
            noise_std
        )));
    }
    if noise_std == 0.0 {
        return Ok(());
    }

    let normal = Normal::new(0.0, noise_std)
        .map_err(|e| EngError::InvalidParameter(format!("noise std {}: {}", noise_std, e)))?;

    for sample in signal.iter_mut() {
        *sample += normal.sample(rng);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_noise_changes_signal() {
        let clean: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.1).sin()).collect();
        let mut noisy = clean.clone();
        add_gaussian_noise(&mut noisy, 0.1, &mut create_rng(Some(42))).unwrap();

        assert_eq!(clean.len(), noisy.len());
        assert_ne!(clean, noisy);
    }

    #[test]
    fn test_seeded_rng_reproducibility() {
        let mut a = vec![0.0; 1000];
        let mut b = vec![0.0; 1000];
        add_gaussian_noise(&mut a, 0.5, &mut create_rng(Some(12345))).unwrap();
        add_gaussian_noise(&mut b, 0.5, &mut create_rng(Some(12345))).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_power_matches_std() {
        let mut noise = vec![0.0; 50_000];
        add_gaussian_noise(&mut noise, 0.2, &mut create_rng(Some(7))).unwrap();

        let power = signal_power(&noise);
        assert!(
            (power - 0.04).abs() < 0.002,
            "noise power {} should be close to 0.04",
            power
        );
    }

    #[test]
    fn test_zero_std_is_noop() {
        let mut signal = vec![1.0, 2.0, 3.0];
        add_gaussian_noise(&mut signal, 0.0, &mut create_rng(Some(1))).unwrap();
        assert_eq!(signal, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_negative_std_rejected() {
        let mut signal = vec![0.0; 4];
        let result = add_gaussian_noise(&mut signal, -1.0, &mut create_rng(Some(1)));
        assert!(matches!(result, Err(EngError::InvalidParameter(_))));
        assert_eq!(signal, vec![0.0; 4], "rejected call must not touch the signal");
    }

    #[test]
    fn test_non_finite_std_rejected() {
        for std in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1e-12] {
            let mut signal = vec![1.0; 4];
            let result = add_gaussian_noise(&mut signal, std, &mut create_rng(Some(1)));
            assert!(
                matches!(result, Err(EngError::InvalidParameter(_))),
                "noise std {} should be rejected",
                std
            );
            assert_eq!(signal, vec![1.0; 4]);
        }
    }

    #[test]
    fn test_signal_power_empty() {
        assert_eq!(signal_power(&[]), 0.0);
    }
}

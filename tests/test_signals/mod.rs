#![allow(dead_code)]

use engsim::config::{EngConfig, PhysicalParams};

pub const FS: f64 = 20_000.0;

/// Gaussian bump centered at sample `center` with width `sigma` samples
pub fn gaussian_pulse(n: usize, center: f64, sigma: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let d = i as f64 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect()
}

/// Shift `series` later by `d` samples (earlier for negative `d`), zero-filled
pub fn shifted(series: &[f64], d: i64) -> Vec<f64> {
    let n = series.len() as i64;
    (0..n)
        .map(|i| {
            let src = i - d;
            if (0..n).contains(&src) {
                series[src as usize]
            } else {
                0.0
            }
        })
        .collect()
}

/// Reference recording setup with the given noise level and seed
pub fn reference_config(noise_std: f64, seed: u64) -> EngConfig {
    EngConfig {
        seed: Some(seed),
        physical: PhysicalParams {
            noise_std,
            ..Default::default()
        },
        ..Default::default()
    }
}

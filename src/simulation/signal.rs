use rand::Rng;

use super::noise::add_gaussian_noise;
use crate::config::PhysicalParams;
use crate::constants::{PROXIMAL_ONSET_SAMPLE, PULSE_CENTER_SECS, PULSE_WIDTH_SECS};
use crate::error::Result;
use crate::recording::Recording;

/// Uniform time axis `t[i] = i / sample_rate` with `num_samples` points
pub fn time_axis(num_samples: usize, sample_rate: f64) -> Vec<f64> {
    (0..num_samples).map(|i| i as f64 / sample_rate).collect()
}

/// Canonical action-potential shape
///
/// A Gaussian bump centered at [`PULSE_CENTER_SECS`] with standard deviation
/// [`PULSE_WIDTH_SECS`], sampled at `sample_rate` over `num_samples` points.
pub fn pulse_shape(num_samples: usize, sample_rate: f64) -> Vec<f64> {
    let two_sigma_sq = 2.0 * PULSE_WIDTH_SECS * PULSE_WIDTH_SECS;
    (0..num_samples)
        .map(|i| {
            let dt = i as f64 / sample_rate - PULSE_CENTER_SECS;
            (-(dt * dt) / two_sigma_sq).exp()
        })
        .collect()
}

/// Add `pulse` into `series` starting at `onset`
///
/// The part of the pulse that would run past the end of the series is
/// dropped.
pub fn place_pulse(series: &mut [f64], pulse: &[f64], onset: usize) {
    if let Some(tail) = series.get_mut(onset..) {
        for (sample, &p) in tail.iter_mut().zip(pulse) {
            *sample += p;
        }
    }
}

/// Generate a two-channel ENG recording with a known propagation delay
///
/// Channel 0 (proximal) carries the pulse at [`PROXIMAL_ONSET_SAMPLE`];
/// channel 1 (distal) carries the same pulse `params.delay_samples()` later.
/// Independent Gaussian noise of `params.noise_std` is then added to each
/// channel from `rng`.
///
/// Returns the recording together with its time axis.
///
/// # Errors
/// Returns `EngError::InvalidParameter` if the physical parameters fail
/// validation.
pub fn synthesize<R>(params: &PhysicalParams, rng: &mut R) -> Result<(Recording, Vec<f64>)>
where
    R: Rng + ?Sized,
{
    params.validate()?;

    let n = params.num_samples();
    let fs = params.sample_rate;
    let delay_samples = params.delay_samples();
    let pulse = pulse_shape(n, fs);

    let mut proximal = vec![0.0; n];
    place_pulse(&mut proximal, &pulse, PROXIMAL_ONSET_SAMPLE);

    let mut distal = vec![0.0; n];
    place_pulse(
        &mut distal,
        &pulse,
        PROXIMAL_ONSET_SAMPLE.saturating_add(delay_samples),
    );

    add_gaussian_noise(&mut proximal, params.noise_std, rng)?;
    add_gaussian_noise(&mut distal, params.noise_std, rng)?;

    log::debug!(
        "Synthesized {} samples at {} Hz, delay {} samples ({:.3} ms)",
        n,
        fs,
        delay_samples,
        params.delay_seconds() * 1000.0
    );

    let recording = Recording::new(fs, vec![proximal, distal])?;
    Ok((recording, time_axis(n, fs)))
}

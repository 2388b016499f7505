use crate::error::{EngError, Result};
use crate::recording::Recording;
use crate::signal_processing::{rotate_backward, seconds_to_samples};

/// Delay-and-sum combination of all channels of `recording`
///
/// Each channel `i` is rotated circularly backward by
/// `round(delays[i] * sample_rate)` samples, so samples shifted off the
/// start reappear at the end, and the rotated channels are averaged sample
/// by sample. With delays matching the propagation delay the common pulse
/// lines up while independent noise partially cancels.
///
/// The output has the length of one channel.
///
/// # Errors
/// Returns `EngError::DimensionMismatch` if `delays` does not have one entry
/// per channel and `EngError::InvalidParameter` if any delay is not finite.
pub fn beamform(recording: &Recording, delays: &[f64]) -> Result<Vec<f64>> {
    let channels = recording.num_channels();
    if delays.len() != channels {
        return Err(EngError::DimensionMismatch {
            what: "beamform delays",
            expected: channels,
            actual: delays.len(),
        });
    }

    if let Some(bad) = delays.iter().find(|d| !d.is_finite()) {
        return Err(EngError::InvalidParameter(format!(
            "beamform delay must be finite, got {}",
            bad
        )));
    }

    let sample_rate = recording.sample_rate();
    let mut sum = vec![0.0; recording.len()];

    for (channel, &delay) in recording.channels().iter().zip(delays) {
        let shift = seconds_to_samples(delay, sample_rate);
        log::trace!("Beamform shift {} samples ({} s)", shift, delay);
        for (acc, x) in sum.iter_mut().zip(rotate_backward(channel, shift)) {
            *acc += x;
        }
    }

    if channels > 0 {
        let scale = 1.0 / channels as f64;
        sum.iter_mut().for_each(|x| *x *= scale);
    }
    Ok(sum)
}

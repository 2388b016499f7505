use crate::config::FilterSpec;
use crate::error::{EngError, Result};
use crate::recording::Recording;
use iir_filters::filter::{DirectForm2Transposed, Filter};
use iir_filters::filter_design::{FilterType, butter};
use iir_filters::sos::zpk2sos;

/// Zero-phase Butterworth band-pass filter
///
/// Runs the same second-order-section cascade forward and then backward
/// over the signal, so the magnitude response is squared and the phase
/// response cancels. Pulse timing is preserved exactly, which matters
/// because downstream latency estimation measures timing differences.
///
/// The filter is consumed by [`ZeroPhaseBandpass::apply`], so nothing
/// carries over between signals. Each pass starts from the steady state the
/// cascade reaches under a constant input equal to its first sample.
pub struct ZeroPhaseBandpass {
    forward: DirectForm2Transposed,
    backward: DirectForm2Transposed,
    pad_len: usize,
    settle_len: usize,
}

/// Relative imaginary part below which a designed pole or zero is real
const REAL_ROOT_TOLERANCE: f64 = 1e-9;

/// Residual state decay targeted when settling a pass
const SETTLE_RESIDUAL: f64 = 1e-12;

const MAX_SETTLE_LEN: usize = 1 << 20;

impl ZeroPhaseBandpass {
    /// Design a band-pass for `spec` at `sample_rate`
    ///
    /// # Errors
    /// Returns `EngError::InvalidFilterSpec` (or `InvalidParameter` for the
    /// sampling rate) when the specification does not satisfy
    /// `0 < low_cut < high_cut < sample_rate / 2`, and
    /// `EngError::FilterDesign` if the designer rejects it anyway.
    pub fn new(spec: &FilterSpec, sample_rate: f64) -> Result<Self> {
        spec.validate(sample_rate)?;

        let mut zpk = butter(
            spec.order as u32,
            FilterType::BandPass(spec.low_cut, spec.high_cut),
            sample_rate,
        )
        .map_err(|e| EngError::FilterDesign(format!("{:?}", e)))?;

        // Near Nyquist the real pole of an odd order comes out with rounding
        // noise in its imaginary part and no conjugate to pair with
        for root in zpk.z.iter_mut().chain(zpk.p.iter_mut()) {
            if root.im.abs() <= REAL_ROOT_TOLERANCE * root.norm() {
                root.im = 0.0;
            }
        }

        let slowest_pole = zpk.p.iter().map(|p| p.norm()).fold(0.0, f64::max);
        let settle_len = if slowest_pole > 0.0 && slowest_pole < 1.0 {
            ((SETTLE_RESIDUAL.ln() / slowest_pole.ln()).ceil() as usize).min(MAX_SETTLE_LEN)
        } else {
            0
        };

        let sos = zpk2sos(&zpk, None).map_err(|e| EngError::FilterDesign(format!("{:?}", e)))?;

        Ok(Self {
            forward: DirectForm2Transposed::new(&sos),
            backward: DirectForm2Transposed::new(&sos),
            // A band-pass of order N has 2N + 1 coefficients per polynomial
            pad_len: 3 * (2 * spec.order + 1),
            settle_len,
        })
    }

    /// Filter a whole series, returning a new one of the same length
    ///
    /// The series is extended at both ends by odd reflection before
    /// filtering and the extension is removed afterwards, which suppresses
    /// start-up transients at the boundaries.
    pub fn apply(mut self, input: &[f64]) -> Vec<f64> {
        if input.is_empty() {
            return Vec::new();
        }

        let pad = self.pad_len.min(input.len() - 1);
        let extended = odd_extend(input, pad);

        settle(&mut self.forward, extended[0], self.settle_len);
        let mut pass: Vec<f64> = extended.iter().map(|&x| self.forward.filter(x)).collect();
        pass.reverse();
        settle(&mut self.backward, pass[0], self.settle_len);
        let mut pass: Vec<f64> = pass.iter().map(|&x| self.backward.filter(x)).collect();
        pass.reverse();

        pass[pad..pad + input.len()].to_vec()
    }
}

/// Drive `filter` with a constant `level` until its state reaches steady state
///
/// Starting a pass from this state removes the step transient a zero state
/// would produce at the first sample.
fn settle(filter: &mut DirectForm2Transposed, level: f64, len: usize) {
    if level == 0.0 {
        return;
    }
    for _ in 0..len {
        filter.filter(level);
    }
}

/// Point-reflect `pad` samples about each end of `input`
fn odd_extend(input: &[f64], pad: usize) -> Vec<f64> {
    let n = input.len();
    let first = input[0];
    let last = input[n - 1];

    let mut out = Vec::with_capacity(n + 2 * pad);
    out.extend((1..=pad).rev().map(|k| 2.0 * first - input[k]));
    out.extend_from_slice(input);
    out.extend((1..=pad).map(|k| 2.0 * last - input[n - 1 - k]));
    out
}

/// Zero-phase band-pass of a single series
///
/// A new filter is designed for every call.
pub fn bandpass(series: &[f64], sample_rate: f64, spec: &FilterSpec) -> Result<Vec<f64>> {
    Ok(ZeroPhaseBandpass::new(spec, sample_rate)?.apply(series))
}

/// Band-pass every channel of `recording` independently
pub fn bandpass_recording(recording: &Recording, spec: &FilterSpec) -> Result<Recording> {
    let sample_rate = recording.sample_rate();
    log::debug!(
        "Filtering {} channels: {}-{} Hz, order {}",
        recording.num_channels(),
        spec.low_cut,
        spec.high_cut,
        spec.order
    );
    recording.map_channels(|channel| bandpass(channel, sample_rate, spec))
}

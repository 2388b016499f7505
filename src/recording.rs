use crate::error::{EngError, Result};

/// Multi-channel recording sharing one sampling rate
///
/// All channels have the same length. A recording is never mutated once
/// built; processing stages produce new recordings through
/// [`Recording::map_channels`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    sample_rate: f64,
    channels: Vec<Vec<f64>>,
}

impl Recording {
    /// Create a recording from per-channel sample series
    ///
    /// # Errors
    /// Returns `EngError::InvalidParameter` if `sample_rate` is not positive
    /// and finite, and `EngError::DimensionMismatch` if the channels differ
    /// in length.
    pub fn new(sample_rate: f64, channels: Vec<Vec<f64>>) -> Result<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(EngError::InvalidParameter(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }

        if let Some(first) = channels.first() {
            let expected = first.len();
            if let Some(bad) = channels.iter().find(|c| c.len() != expected) {
                return Err(EngError::DimensionMismatch {
                    what: "recording channel length",
                    expected,
                    actual: bad.len(),
                });
            }
        }

        Ok(Self {
            sample_rate,
            channels,
        })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate
    }

    pub fn channel(&self, index: usize) -> Option<&[f64]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }

    /// Build a new recording by transforming every channel independently
    pub fn map_channels<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&[f64]) -> Result<Vec<f64>>,
    {
        let channels = self
            .channels
            .iter()
            .map(|c| f(c.as_slice()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(self.sample_rate, channels)
    }
}

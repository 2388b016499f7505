//! Configuration for the ENG latency pipeline.
//!
//! Every field maps directly onto a physical parameter of the simulated
//! nerve, the band-pass filter, or the beamformer delays. Defaults are the
//! values of the reference recording setup:
//!
//! | field                 | default  |
//! |-----------------------|----------|
//! | sample rate           | 20000 Hz |
//! | duration              | 0.05 s   |
//! | conduction velocity   | 30 m/s   |
//! | electrode distance    | 0.01 m   |
//! | noise std             | 0.05     |
//! | band-pass             | 300-3000 Hz, order 3 |
//!
//! Configurations can be loaded from TOML; missing sections and fields fall
//! back to the defaults above.
//!
//! ```
//! use engsim::config::EngConfig;
//!
//! let config = EngConfig::from_toml_str(
//!     r#"
//!     seed = 7
//!     [physical]
//!     conduction_velocity = 50.0
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.physical.conduction_velocity, 50.0);
//! assert_eq!(config.filter.order, 3);
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::{EngError, Result};

/// Physical parameters of the simulated recording
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicalParams {
    /// Sampling rate in Hz
    pub sample_rate: f64,
    /// Recording duration in seconds
    pub duration: f64,
    /// Nerve conduction velocity in m/s
    pub conduction_velocity: f64,
    /// Distance between the proximal and distal electrodes in meters
    pub distance: f64,
    /// Standard deviation of the additive Gaussian noise
    pub noise_std: f64,
}

impl Default for PhysicalParams {
    fn default() -> Self {
        Self {
            sample_rate: 20_000.0,
            duration: 0.05,
            conduction_velocity: 30.0,
            distance: 0.01,
            noise_std: 0.05,
        }
    }
}

impl PhysicalParams {
    /// Check all physical parameters
    ///
    /// # Errors
    /// Returns `EngError::InvalidParameter` for a non-positive sampling
    /// rate, duration, or conduction velocity, a negative distance, or a
    /// negative noise level. Non-finite values are rejected as well.
    pub fn validate(&self) -> Result<()> {
        require_positive("sample rate", self.sample_rate)?;
        require_positive("duration", self.duration)?;
        require_positive("conduction velocity", self.conduction_velocity)?;
        require_non_negative("electrode distance", self.distance)?;
        require_non_negative("noise std", self.noise_std)?;
        Ok(())
    }

    /// Number of samples in the recording, `floor(sample_rate * duration)`
    pub fn num_samples(&self) -> usize {
        (self.sample_rate * self.duration).floor() as usize
    }

    /// Ground-truth propagation delay between the electrodes in seconds
    pub fn delay_seconds(&self) -> f64 {
        self.distance / self.conduction_velocity
    }

    /// Ground-truth propagation delay rounded to whole samples
    pub fn delay_samples(&self) -> usize {
        (self.delay_seconds() * self.sample_rate).round() as usize
    }
}

/// Band-pass filter specification
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSpec {
    /// Lower cutoff in Hz
    pub low_cut: f64,
    /// Upper cutoff in Hz
    pub high_cut: f64,
    /// Butterworth order
    pub order: usize,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            low_cut: 300.0,
            high_cut: 3000.0,
            order: 3,
        }
    }
}

impl FilterSpec {
    pub fn new(low_cut: f64, high_cut: f64, order: usize) -> Self {
        Self {
            low_cut,
            high_cut,
            order,
        }
    }

    /// Check the cutoffs against the Nyquist frequency of `sample_rate`
    ///
    /// # Errors
    /// Returns `EngError::InvalidParameter` if `sample_rate` is not positive
    /// and `EngError::InvalidFilterSpec` unless
    /// `0 < low_cut < high_cut < sample_rate / 2` and `order >= 1`.
    pub fn validate(&self, sample_rate: f64) -> Result<()> {
        require_positive("sample rate", sample_rate)?;
        let nyquist = 0.5 * sample_rate;

        if self.order == 0 {
            return Err(EngError::InvalidFilterSpec(
                "filter order must be at least 1".to_string(),
            ));
        }
        if !(self.low_cut.is_finite() && self.low_cut > 0.0) {
            return Err(EngError::InvalidFilterSpec(format!(
                "low cutoff must be positive, got {} Hz",
                self.low_cut
            )));
        }
        if !(self.high_cut.is_finite() && self.high_cut > self.low_cut) {
            return Err(EngError::InvalidFilterSpec(format!(
                "high cutoff {} Hz must exceed low cutoff {} Hz",
                self.high_cut, self.low_cut
            )));
        }
        if self.high_cut >= nyquist {
            return Err(EngError::InvalidFilterSpec(format!(
                "high cutoff {} Hz must be below Nyquist {} Hz",
                self.high_cut, nyquist
            )));
        }
        Ok(())
    }
}

/// Delay-and-sum configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeamformConfig {
    /// Per-channel alignment delays in seconds.
    /// `None` compensates the ground-truth propagation delay: `[0, distance / velocity]`.
    pub delays: Option<Vec<f64>>,
}

impl BeamformConfig {
    pub fn resolve_delays(&self, physical: &PhysicalParams) -> Vec<f64> {
        match &self.delays {
            Some(delays) => delays.clone(),
            None => vec![0.0, physical.delay_seconds()],
        }
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngConfig {
    /// Noise seed; `None` draws a fresh seed from the OS
    pub seed: Option<u64>,
    pub physical: PhysicalParams,
    pub filter: FilterSpec,
    pub beamform: BeamformConfig,
}

impl EngConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| EngError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EngError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Validate physical parameters and the filter against the sampling rate
    pub fn validate(&self) -> Result<()> {
        self.physical.validate()?;
        self.filter.validate(self.physical.sample_rate)?;
        if let Some(delays) = &self.beamform.delays {
            if let Some(bad) = delays.iter().find(|d| !d.is_finite()) {
                return Err(EngError::InvalidParameter(format!(
                    "beamform delay must be finite, got {}",
                    bad
                )));
            }
        }
        Ok(())
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngError::InvalidParameter(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngError::InvalidParameter(format!(
            "{} must be non-negative, got {}",
            name, value
        )))
    }
}

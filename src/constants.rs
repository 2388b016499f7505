//! Fixed constants of the synthetic ENG model and numeric thresholds
//!
//! The pulse geometry is part of the simulation contract: every channel
//! carries the same Gaussian action-potential shape, only its placement
//! differs.

/// Time of the Gaussian pulse center within the canonical pulse shape, in seconds.
pub const PULSE_CENTER_SECS: f64 = 0.005;

/// Standard deviation of the Gaussian pulse, in seconds.
pub const PULSE_WIDTH_SECS: f64 = 0.0005;

/// Sample offset at which the pulse shape is placed on the proximal channel.
pub const PROXIMAL_ONSET_SAMPLE: usize = 100;

/// Minimum noise power for a meaningful peak-to-noise ratio.
/// Below this the series is treated as noise-free and no ratio is reported.
pub const MIN_POWER_THRESHOLD: f64 = 1e-20;

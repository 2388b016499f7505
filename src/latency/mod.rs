//! Inter-electrode conduction latency: channel combination and delay estimation

pub mod beamform;
pub mod estimator;

pub use beamform::beamform;
pub use estimator::{cross_correlate_full, estimate_lag_samples, estimate_latency};

pub mod filters;
pub mod math;

pub use filters::{ZeroPhaseBandpass, bandpass, bandpass_recording};
pub use math::{argmax, peak_to_noise_db, rotate_backward, seconds_to_samples};

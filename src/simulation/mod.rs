mod noise;
mod signal;

pub use noise::{add_gaussian_noise, create_rng, signal_power};
pub use signal::{place_pulse, pulse_shape, synthesize, time_axis};

pub mod config;
pub mod constants;
pub mod error;
pub mod latency;
pub mod output;
pub mod pipeline;
pub mod recording;
pub mod signal_processing;
pub mod simulation;
pub mod wav;

pub use config::{EngConfig, FilterSpec, PhysicalParams};
pub use error::{EngError, Result};
pub use latency::{beamform, estimate_latency};
pub use pipeline::{LatencyPipeline, LatencyReport, PipelineOutput};
pub use recording::Recording;
pub use signal_processing::{bandpass, bandpass_recording};
pub use simulation::synthesize;
pub use wav::save_wav;

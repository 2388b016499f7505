use hound::{WavSpec, WavWriter};
use std::path::Path;

use crate::recording::Recording;

/// Write a recording as an interleaved 32-bit float WAV file
///
/// One WAV channel per recording channel. WAV stores an integer sample
/// rate, so the recording's rate is rounded.
pub fn save_wav(path: &Path, recording: &Recording) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: recording.num_channels() as u16,
        sample_rate: recording.sample_rate().round() as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for i in 0..recording.len() {
        for channel in recording.channels() {
            writer.write_sample(channel[i] as f32)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

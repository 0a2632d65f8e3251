//! Output writing
//!
//! Writes the normalized signal as a mono 16-bit PCM WAV file at the
//! working sample rate.

use crate::error::VocoderError;

/// Write samples to a mono 16-bit PCM WAV file
///
/// Samples are clamped to [-1, 1] before quantization; the pipeline
/// normalizes first, so clamping only guards against rounding.
///
/// # Errors
///
/// Returns `Output` if the destination path cannot be created or written.
pub fn write_wav(path: &str, samples: &[f32], sample_rate: u32) -> Result<(), VocoderError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| VocoderError::Output(format!("cannot create {}: {}", path, e)))?;

    for &sample in samples {
        let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(quantized)
            .map_err(|e| VocoderError::Output(format!("cannot write {}: {}", path, e)))?;
    }

    writer
        .finalize()
        .map_err(|e| VocoderError::Output(format!("cannot finalize {}: {}", path, e)))?;

    log::debug!("Wrote {} samples to {} at {} Hz", samples.len(), path, sample_rate);
    Ok(())
}

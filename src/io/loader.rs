//! Modulator loading
//!
//! Decodes any container/codec Symphonia supports, mixes the channels
//! down to mono by averaging, and resamples to the working rate by
//! linear interpolation.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::VocoderError;

/// Load the modulator as mono samples at the target sample rate
///
/// # Arguments
///
/// * `path` - Path to the modulator audio file
/// * `target_sample_rate` - Working sample rate in Hz
///
/// # Returns
///
/// Mono samples in [-1, 1] at `target_sample_rate`.
///
/// # Errors
///
/// Returns `Input` if the file is missing, unreadable, has no decodable
/// audio track, or decodes to zero samples.
pub fn load_modulator(path: &str, target_sample_rate: u32) -> Result<Vec<f32>, VocoderError> {
    log::debug!("Loading modulator: {}", path);

    let src = File::open(path)
        .map_err(|e| VocoderError::Input(format!("cannot open {}: {}", path, e)))?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = Path::new(path).extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| VocoderError::Input(format!("cannot probe {}: {}", path, e)))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| {
            VocoderError::Input(format!("{}: no decodable audio track", path))
        })?;
    let track_id = track.id;
    let source_rate = track.codec_params.sample_rate.unwrap_or(target_sample_rate);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| VocoderError::Input(format!("cannot decode {}: {}", path, e)))?;

    let mut samples: Vec<f32> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(_) => break,
        };
        if packet.track_id() != track_id {
            continue;
        }
        match decoder.decode(&packet) {
            Ok(decoded) => mix_to_mono(&decoded, &mut samples)?,
            Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
            Err(e) => {
                return Err(VocoderError::Input(format!(
                    "decode failure in {}: {}",
                    path, e
                )))
            }
        }
    }

    if samples.is_empty() {
        return Err(VocoderError::Input(format!(
            "{}: decoded no audio samples",
            path
        )));
    }

    log::debug!(
        "Decoded {} mono samples at {} Hz (target {} Hz)",
        samples.len(),
        source_rate,
        target_sample_rate
    );

    Ok(resample_linear(&samples, source_rate, target_sample_rate))
}

/// Average a decoded buffer's channels into the output vector
fn mix_to_mono(decoded: &AudioBufferRef<'_>, out: &mut Vec<f32>) -> Result<(), VocoderError> {
    match decoded {
        AudioBufferRef::F32(buf) => mix_buffer(buf, out, |s| s),
        AudioBufferRef::F64(buf) => mix_buffer(buf, out, |s| s as f32),
        AudioBufferRef::U8(buf) => mix_buffer(buf, out, |s| (s as f32 - 128.0) / 128.0),
        AudioBufferRef::S16(buf) => mix_buffer(buf, out, |s| s as f32 / 32768.0),
        AudioBufferRef::S24(buf) => {
            mix_buffer(buf, out, |s| s.inner() as f32 / 8_388_608.0)
        }
        AudioBufferRef::S32(buf) => mix_buffer(buf, out, |s| s as f32 / 2_147_483_648.0),
        _ => {
            return Err(VocoderError::Input(
                "unsupported sample format in modulator".to_string(),
            ))
        }
    }
    Ok(())
}

fn mix_buffer<S: Copy>(buf: &AudioBuffer<S>, out: &mut Vec<f32>, to_f32: impl Fn(S) -> f32)
where
    S: symphonia::core::sample::Sample,
{
    let channels = buf.spec().channels.count();
    if channels == 1 {
        out.extend(buf.chan(0).iter().map(|&s| to_f32(s)));
    } else {
        for frame in 0..buf.frames() {
            let sum: f32 = (0..channels).map(|ch| to_f32(buf.chan(ch)[frame])).sum();
            out.push(sum / channels as f32);
        }
    }
}

/// Linear-interpolation resampling
pub(crate) fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if samples.is_empty() || from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_pos = i as f64 * ratio;
        let src_idx = src_pos.floor() as usize;
        let frac = (src_pos - src_idx as f64) as f32;
        let sample = if src_idx + 1 < samples.len() {
            samples[src_idx] * (1.0 - frac) + samples[src_idx + 1] * frac
        } else {
            samples[samples.len() - 1]
        };
        output.push(sample);
    }
    output
}

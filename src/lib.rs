//! # Vocode DSP
//!
//! An offline channel vocoder: imposes the spectral envelope of a recorded
//! voice (the modulator) onto a synthetic harmonic sawtooth carrier,
//! producing the classic robotic vocoded sound.
//!
//! ## Pipeline
//!
//! ```text
//! Loader → Carrier Generator → Band Analyzer → Band Synthesizer → Normalizer/Writer
//! ```
//!
//! One linear transform, five ordered stages:
//!
//! - **Loader**: decode the modulator, mix to mono, resample to the
//!   working rate
//! - **Carrier**: sum of sawtooth partials spanning the modulator's length
//! - **Analyzer**: split the modulator into N linearly spaced bands and
//!   extract each band's amplitude envelope (zero-phase band-pass +
//!   analytic-signal magnitude)
//! - **Synthesizer**: filter the carrier through the same bands, scale by
//!   the envelopes, sum
//! - **Normalizer/Writer**: peak-normalize to 1.0 and write a mono WAV
//!
//! ## Quick Start
//!
//! ```no_run
//! use vocode_dsp::{vocode_file, VocoderConfig};
//!
//! let report = vocode_file("voice.wav", "vocoded.wav", &VocoderConfig::default())?;
//! println!("Vocoded {:.2}s across {} bands", report.duration_seconds, report.num_bands);
//! # Ok::<(), vocode_dsp::VocoderError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod bands;
pub mod carrier;
pub mod config;
pub mod dsp;
pub mod error;
pub mod io;
pub mod normalize;
pub mod synthesis;

pub use config::{CarrierHarmonic, VocoderConfig};
pub use error::VocoderError;

/// Summary of a completed file-to-file vocoder run
#[derive(Debug, Clone)]
pub struct VocodeReport {
    /// Modulator duration after resampling, in seconds
    pub duration_seconds: f32,
    /// Working sample rate in Hz
    pub sample_rate: u32,
    /// Number of filterbank bands
    pub num_bands: usize,
    /// Peak absolute amplitude of the accumulated signal before
    /// normalization
    pub pre_normalization_peak: f32,
    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f32,
}

/// Vocode a modulator signal in memory
///
/// Runs carrier generation, band analysis, band synthesis, and peak
/// normalization over the given mono samples. Deterministic: identical
/// inputs produce identical output.
///
/// # Arguments
///
/// * `modulator` - Mono modulator samples at `config.sample_rate`
/// * `config` - Sample rate, band count, and carrier harmonic table
///
/// # Returns
///
/// Vocoded signal, same length as the modulator, peak-normalized to 1.0.
///
/// # Errors
///
/// * `InvalidInput` - empty modulator, zero sample rate, or empty
///   harmonic table
/// * `FilterDesign` - band configuration yields an unstable filter
/// * `SilentSignal` - the accumulated output has zero peak
///
/// # Example
///
/// ```no_run
/// use vocode_dsp::{vocode, VocoderConfig};
///
/// let samples = vec![0.5f32; 44100];
/// let vocoded = vocode(&samples, &VocoderConfig::default())?;
/// # Ok::<(), vocode_dsp::VocoderError>(())
/// ```
pub fn vocode(modulator: &[f32], config: &VocoderConfig) -> Result<Vec<f32>, VocoderError> {
    let (output, _peak) = run_pipeline(modulator, config)?;
    Ok(output)
}

/// Vocode a modulator file to an output WAV file
///
/// Loads and resamples the modulator, runs the in-memory pipeline, and
/// writes the normalized result to `output_path` at the working sample
/// rate.
///
/// # Errors
///
/// Everything `vocode` can return, plus `Input` (modulator missing or
/// undecodable) and `Output` (destination unwritable).
pub fn vocode_file(
    modulator_path: &str,
    output_path: &str,
    config: &VocoderConfig,
) -> Result<VocodeReport, VocoderError> {
    use std::time::Instant;
    let start_time = Instant::now();

    let modulator = io::loader::load_modulator(modulator_path, config.sample_rate)?;
    let (output, peak) = run_pipeline(&modulator, config)?;
    io::writer::write_wav(output_path, &output, config.sample_rate)?;

    let report = VocodeReport {
        duration_seconds: modulator.len() as f32 / config.sample_rate as f32,
        sample_rate: config.sample_rate,
        num_bands: config.num_bands,
        pre_normalization_peak: peak,
        processing_time_ms: start_time.elapsed().as_secs_f32() * 1000.0,
    };

    log::debug!(
        "Vocoded {} -> {}: {:.2}s, {} bands, {:.2} ms",
        modulator_path,
        output_path,
        report.duration_seconds,
        report.num_bands,
        report.processing_time_ms
    );

    Ok(report)
}

fn run_pipeline(
    modulator: &[f32],
    config: &VocoderConfig,
) -> Result<(Vec<f32>, f32), VocoderError> {
    log::debug!(
        "Starting vocoder run: {} samples at {} Hz, {} bands",
        modulator.len(),
        config.sample_rate,
        config.num_bands
    );

    if modulator.is_empty() {
        return Err(VocoderError::InvalidInput(
            "empty modulator signal".to_string(),
        ));
    }
    if config.sample_rate == 0 {
        return Err(VocoderError::InvalidInput(
            "sample rate must be positive".to_string(),
        ));
    }
    if config.harmonics.is_empty() {
        return Err(VocoderError::InvalidInput(
            "carrier harmonic table is empty".to_string(),
        ));
    }

    // One edge set feeds both passes; recomputing per pass would let the
    // envelope-to-band correspondence drift.
    let edges = bands::compute_band_edges(config.sample_rate, config.num_bands)?;

    let carrier = carrier::generate_carrier(modulator.len(), config.sample_rate, &config.harmonics);
    let envelopes = analysis::extract_envelopes(modulator, &edges, config.sample_rate)?;
    let mut output = synthesis::synthesize(&carrier, &envelopes, &edges, config.sample_rate)?;
    let peak = normalize::normalize_peak(&mut output)?;

    Ok((output, peak))
}

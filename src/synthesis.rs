//! Band synthesis: envelope application and accumulation
//!
//! Filters the carrier through the same filterbank used for analysis,
//! scales each carrier band sample-wise by the matching modulator
//! envelope, and sums the bands into one signal. Band filtering runs in
//! parallel; the final sum is accumulated sequentially in band order so
//! the output is bit-identical across runs.

use rayon::prelude::*;

use crate::dsp::butterworth::design_bandpass;
use crate::dsp::filtfilt::filtfilt;
use crate::error::VocoderError;

/// Apply the band envelopes to the carrier and sum the bands
///
/// The edge set must be the one the envelopes were extracted with;
/// mixing edge sets silently misaligns envelopes and carrier bands.
///
/// # Arguments
///
/// * `carrier` - Carrier signal, same length as the modulator
/// * `envelopes` - One envelope per band from `analysis::extract_envelopes`
/// * `edges` - The shared `num_bands + 1` band edges in Hz
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// Accumulated vocoded signal, same length as the carrier, unnormalized.
///
/// # Errors
///
/// Returns `InvalidInput` if the envelope count does not match the edge
/// set or any envelope length differs from the carrier, and
/// `FilterDesign` if a band filter cannot be designed.
pub fn synthesize(
    carrier: &[f32],
    envelopes: &[Vec<f32>],
    edges: &[f64],
    sample_rate: u32,
) -> Result<Vec<f32>, VocoderError> {
    if edges.len() < 2 || envelopes.len() != edges.len() - 1 {
        return Err(VocoderError::InvalidInput(format!(
            "got {} envelopes for {} band edges",
            envelopes.len(),
            edges.len()
        )));
    }
    for (i, env) in envelopes.iter().enumerate() {
        if env.len() != carrier.len() {
            return Err(VocoderError::InvalidInput(format!(
                "band {} envelope has {} samples, carrier has {}",
                i,
                env.len(),
                carrier.len()
            )));
        }
    }

    log::debug!(
        "Synthesizing {} bands over {} samples",
        envelopes.len(),
        carrier.len()
    );

    let bands: Vec<Vec<f32>> = (0..envelopes.len())
        .into_par_iter()
        .map(|band| {
            let filter = design_bandpass(edges[band], edges[band + 1], sample_rate)?;
            let filtered = filtfilt(&filter, carrier)?;
            Ok(filtered
                .iter()
                .zip(envelopes[band].iter())
                .map(|(&c, &e)| c * e)
                .collect::<Vec<f32>>())
        })
        .collect::<Result<_, VocoderError>>()?;

    let mut output = vec![0.0f32; carrier.len()];
    for band in &bands {
        for (out, &s) in output.iter_mut().zip(band.iter()) {
            *out += s;
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::compute_band_edges;

    #[test]
    fn test_output_length_matches_carrier() {
        let edges = compute_band_edges(44100, 4).unwrap();
        let carrier: Vec<f32> = (0..4410).map(|i| ((i % 100) as f32 / 50.0) - 1.0).collect();
        let envelopes = vec![vec![0.5f32; carrier.len()]; 4];
        let out = synthesize(&carrier, &envelopes, &edges, 44100).unwrap();
        assert_eq!(out.len(), carrier.len());
    }

    #[test]
    fn test_zero_envelopes_silence_output() {
        let edges = compute_band_edges(44100, 4).unwrap();
        let carrier: Vec<f32> = (0..4410).map(|i| ((i % 100) as f32 / 50.0) - 1.0).collect();
        let envelopes = vec![vec![0.0f32; carrier.len()]; 4];
        let out = synthesize(&carrier, &envelopes, &edges, 44100).unwrap();
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_envelope_count_mismatch_rejected() {
        let edges = compute_band_edges(44100, 4).unwrap();
        let carrier = vec![0.1f32; 1024];
        let envelopes = vec![vec![0.5f32; 1024]; 3];
        assert!(matches!(
            synthesize(&carrier, &envelopes, &edges, 44100),
            Err(VocoderError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_envelope_length_mismatch_rejected() {
        let edges = compute_band_edges(44100, 2).unwrap();
        let carrier = vec![0.1f32; 1024];
        let envelopes = vec![vec![0.5f32; 1024], vec![0.5f32; 512]];
        assert!(matches!(
            synthesize(&carrier, &envelopes, &edges, 44100),
            Err(VocoderError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_deterministic_accumulation() {
        let edges = compute_band_edges(44100, 8).unwrap();
        let carrier: Vec<f32> = (0..4410)
            .map(|i| (2.0 * std::f32::consts::PI * 300.0 * i as f32 / 44100.0).sin())
            .collect();
        let envelopes: Vec<Vec<f32>> = (0..8)
            .map(|b| vec![0.1 * (b + 1) as f32; carrier.len()])
            .collect();
        let a = synthesize(&carrier, &envelopes, &edges, 44100).unwrap();
        let b = synthesize(&carrier, &envelopes, &edges, 44100).unwrap();
        assert_eq!(a, b);
    }
}

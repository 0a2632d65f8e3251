//! Band analysis: modulator envelope extraction
//!
//! Splits the modulator into the filterbank's bands and extracts each
//! band's amplitude envelope. Bands only read shared immutable inputs and
//! write their own slot, so they run in parallel with no locking.

use rayon::prelude::*;

use crate::dsp::butterworth::design_bandpass;
use crate::dsp::filtfilt::filtfilt;
use crate::dsp::hilbert;
use crate::error::VocoderError;

/// Extract one amplitude envelope per band from the modulator
///
/// For each band: design the band-pass filter at the band's edges, apply
/// it with zero-phase filtering, then take the analytic-signal magnitude.
/// The same edge set must be handed to `synthesis::synthesize` or the
/// envelope-to-band correspondence breaks.
///
/// # Arguments
///
/// * `modulator` - Mono modulator signal
/// * `edges` - `num_bands + 1` band edges in Hz from `compute_band_edges`
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// `num_bands` envelopes, each the same length as the modulator.
///
/// # Errors
///
/// Returns `FilterDesign` if any band cannot be designed, or
/// `InvalidInput` if the modulator is too short to filter.
pub fn extract_envelopes(
    modulator: &[f32],
    edges: &[f64],
    sample_rate: u32,
) -> Result<Vec<Vec<f32>>, VocoderError> {
    if edges.len() < 2 {
        return Err(VocoderError::InvalidInput(
            "band edge set must contain at least two edges".to_string(),
        ));
    }

    let num_bands = edges.len() - 1;
    log::debug!(
        "Extracting {} band envelopes from {} samples",
        num_bands,
        modulator.len()
    );

    (0..num_bands)
        .into_par_iter()
        .map(|band| {
            let filter = design_bandpass(edges[band], edges[band + 1], sample_rate)?;
            let filtered = filtfilt(&filter, modulator)?;
            Ok(hilbert::envelope(&filtered))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::compute_band_edges;

    fn sine(freq: f32, amplitude: f32, length: usize, sample_rate: f32) -> Vec<f32> {
        (0..length)
            .map(|i| {
                let t = i as f32 / sample_rate;
                amplitude * (2.0 * std::f32::consts::PI * freq * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_envelope_count_and_length() {
        let edges = compute_band_edges(44100, 8).unwrap();
        let modulator = sine(440.0, 0.5, 4410, 44100.0);
        let envelopes = extract_envelopes(&modulator, &edges, 44100).unwrap();
        assert_eq!(envelopes.len(), 8);
        for env in &envelopes {
            assert_eq!(env.len(), modulator.len());
        }
    }

    #[test]
    fn test_tone_energizes_only_its_band() {
        let edges = compute_band_edges(44100, 20).unwrap();
        let modulator = sine(440.0, 0.5, 44100, 44100.0);
        let envelopes = extract_envelopes(&modulator, &edges, 44100).unwrap();

        // 440 Hz falls in the first band (edges[0]..edges[1] covers
        // 20..~1119 Hz at these parameters).
        assert!(440.0 > edges[0] && 440.0 < edges[1]);

        let mean = |env: &[f32]| env.iter().sum::<f32>() / env.len() as f32;
        let active = mean(&envelopes[0]);
        assert!(active > 0.4, "in-band envelope mean {:.3}", active);
        for (i, env) in envelopes.iter().enumerate().skip(2) {
            assert!(
                mean(env) < 0.01,
                "band {} envelope should be near zero, got {:.4}",
                i,
                mean(env)
            );
        }
    }

    #[test]
    fn test_envelopes_nonnegative() {
        let edges = compute_band_edges(44100, 4).unwrap();
        let modulator = sine(1000.0, 0.8, 8820, 44100.0);
        for env in extract_envelopes(&modulator, &edges, 44100).unwrap() {
            assert!(env.iter().all(|&e| e >= 0.0));
        }
    }

    #[test]
    fn test_narrow_bands_rejected() {
        // 50k bands over ~22 kHz leaves each band well under the minimum
        // stable bandwidth.
        let edges = compute_band_edges(44100, 50_000).unwrap();
        let modulator = sine(440.0, 0.5, 2048, 44100.0);
        let err = extract_envelopes(&modulator, &edges, 44100).unwrap_err();
        assert!(matches!(err, VocoderError::FilterDesign(_)));
    }
}

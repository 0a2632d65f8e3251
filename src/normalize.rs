//! Peak normalization
//!
//! Scales the accumulated signal so its maximum absolute amplitude is
//! exactly 1.0. A silent signal has no defined scale factor, so it is
//! surfaced as an error instead of dividing by zero.

use crate::error::VocoderError;

/// Numerical silence threshold
const EPSILON: f32 = 1e-10;

/// Peak-normalize a signal in place
///
/// # Arguments
///
/// * `samples` - Signal to normalize (modified in place)
///
/// # Returns
///
/// The peak absolute amplitude found before normalization.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty slice and `SilentSignal` when the
/// peak is below the silence threshold.
pub fn normalize_peak(samples: &mut [f32]) -> Result<f32, VocoderError> {
    if samples.is_empty() {
        return Err(VocoderError::InvalidInput(
            "cannot normalize an empty signal".to_string(),
        ));
    }

    let peak = samples.iter().map(|&s| s.abs()).fold(0.0f32, f32::max);
    if peak <= EPSILON {
        return Err(VocoderError::SilentSignal(format!(
            "peak amplitude {:.3e} is below the silence threshold; \
             the modulator carries no band energy",
            peak
        )));
    }

    let gain = 1.0 / peak;
    for sample in samples.iter_mut() {
        *sample *= gain;
    }

    log::debug!(
        "Peak normalization: peak={:.2} dB, gain={:.2} dB",
        20.0 * peak.log10(),
        20.0 * gain.log10()
    );

    Ok(peak)
}

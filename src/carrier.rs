//! Carrier synthesis
//!
//! The carrier is a bank of rising sawtooth oscillators summed together.
//! Sawtooths are harmonically dense, which gives the filterbank something
//! to carve in every band; the default table is four partials at 400, 200,
//! 300, and 100 Hz with amplitudes 1.0, 0.5, 0.25, and 0.125.

use crate::config::CarrierHarmonic;

/// Rising sawtooth: ramps from -1 to 1 once per cycle
///
/// `phase` is in cycles; integer phases sit at the -1 reset point.
fn sawtooth(phase: f64) -> f64 {
    2.0 * (phase - phase.floor()) - 1.0
}

/// Generate the harmonic sawtooth carrier
///
/// Pure function of its arguments: the same (length, rate, table) always
/// produces the same signal. The output is unnormalized and may exceed
/// [-1, 1]; the pipeline peak-normalizes after synthesis.
///
/// # Arguments
///
/// * `num_samples` - Carrier length in samples (matches the modulator)
/// * `sample_rate` - Sample rate in Hz
/// * `harmonics` - Oscillator table (frequency, relative amplitude)
///
/// # Returns
///
/// Carrier signal of exactly `num_samples` samples.
pub fn generate_carrier(
    num_samples: usize,
    sample_rate: u32,
    harmonics: &[CarrierHarmonic],
) -> Vec<f32> {
    log::debug!(
        "Generating carrier: {} samples at {} Hz, {} partials",
        num_samples,
        sample_rate,
        harmonics.len()
    );

    let rate = sample_rate as f64;
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / rate;
            harmonics
                .iter()
                .map(|h| h.relative_amplitude as f64 * sawtooth(h.frequency_hz as f64 * t))
                .sum::<f64>() as f32
        })
        .collect()
}

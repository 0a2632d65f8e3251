//! Configuration parameters for the vocoder

/// One partial of the synthetic carrier
///
/// The carrier is a sum of sawtooth oscillators; each entry describes one
/// oscillator's frequency and its amplitude relative to the loudest partial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierHarmonic {
    /// Oscillator frequency in Hz
    pub frequency_hz: f32,

    /// Amplitude relative to the loudest partial (1.0 = full scale)
    pub relative_amplitude: f32,
}

/// Vocoder configuration parameters
#[derive(Debug, Clone)]
pub struct VocoderConfig {
    /// Working sample rate in Hz (default: 44100)
    ///
    /// The modulator is resampled to this rate on load, and the output file
    /// is written at this rate.
    pub sample_rate: u32,

    /// Number of frequency bands (default: 20)
    ///
    /// Band edges are spaced linearly between 20 Hz and Nyquist - 50 Hz.
    pub num_bands: usize,

    /// Carrier harmonic table (default: four sawtooth partials)
    ///
    /// Defaults to {400 Hz, 1.0}, {200 Hz, 0.5}, {300 Hz, 0.25},
    /// {100 Hz, 0.125}.
    pub harmonics: Vec<CarrierHarmonic>,
}

impl Default for VocoderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            num_bands: 20,
            harmonics: vec![
                CarrierHarmonic { frequency_hz: 400.0, relative_amplitude: 1.0 },
                CarrierHarmonic { frequency_hz: 200.0, relative_amplitude: 0.5 },
                CarrierHarmonic { frequency_hz: 300.0, relative_amplitude: 0.25 },
                CarrierHarmonic { frequency_hz: 100.0, relative_amplitude: 0.125 },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VocoderConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.num_bands, 20);
        assert_eq!(config.harmonics.len(), 4);
        assert_eq!(config.harmonics[0].frequency_hz, 400.0);
        assert_eq!(config.harmonics[0].relative_amplitude, 1.0);
        assert_eq!(config.harmonics[3].frequency_hz, 100.0);
        assert_eq!(config.harmonics[3].relative_amplitude, 0.125);
    }
}

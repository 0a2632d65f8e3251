//! Error types for the vocoder pipeline

use std::fmt;

/// Errors that can occur during a vocoder run
#[derive(Debug, Clone)]
pub enum VocoderError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Modulator file missing, unreadable, or undecodable
    Input(String),

    /// Band edge configuration produces an invalid or unstable filter
    FilterDesign(String),

    /// Accumulated output has zero peak amplitude; normalization is undefined
    SilentSignal(String),

    /// Destination path unwritable
    Output(String),
}

impl fmt::Display for VocoderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocoderError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            VocoderError::Input(msg) => write!(f, "Input error: {}", msg),
            VocoderError::FilterDesign(msg) => write!(f, "Filter design error: {}", msg),
            VocoderError::SilentSignal(msg) => write!(f, "Silent signal: {}", msg),
            VocoderError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for VocoderError {}

//! Audio file I/O
//!
//! Modulator decoding via Symphonia and WAV output via hound.

pub mod loader;
pub mod writer;

//! Signal-processing primitives
//!
//! - Butterworth band-pass design (zpk pipeline)
//! - Zero-phase forward-backward filtering
//! - Analytic-signal envelope extraction

pub mod butterworth;
pub mod filtfilt;
pub mod hilbert;

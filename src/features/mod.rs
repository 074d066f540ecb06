//! Feature extraction modules
//!
//! This module contains the spectral stages of the pipeline:
//! - Spectrum (STFT, band limiting, temporal averaging)
//! - Prominence-based peak detection
//! - Pitch mapping (note names, octave folding)

pub mod peaks;
pub mod pitch;
pub mod spectrum;

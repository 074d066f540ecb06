//! Spectral analysis modules
//!
//! Turn a signal into one averaged magnitude per frequency bin:
//! - STFT magnitude spectrogram
//! - Band limiting of the frequency axis
//! - Temporal averaging

pub mod aggregate;
pub mod band;
pub mod stft;

pub use aggregate::{average_over_time, AveragedSpectrum};
pub use band::{band_range, filter_band, BandRange};
pub use stft::{compute_stft, FrequencyAxis, Spectrogram};

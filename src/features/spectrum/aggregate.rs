//! Temporal averaging of a magnitude spectrogram

use super::stft::{FrequencyAxis, Spectrogram};

/// One time-averaged magnitude per frequency bin
#[derive(Debug, Clone, PartialEq)]
pub struct AveragedSpectrum {
    frequencies: Vec<f64>,
    magnitudes: Vec<f32>,
}

impl AveragedSpectrum {
    /// Build from matching frequency and magnitude vectors
    ///
    /// Returns `None` when the lengths differ.
    pub fn new(frequencies: Vec<f64>, magnitudes: Vec<f32>) -> Option<Self> {
        if frequencies.len() != magnitudes.len() {
            return None;
        }
        Some(Self {
            frequencies,
            magnitudes,
        })
    }

    /// Bin-center frequencies in Hz
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Mean magnitude of each bin
    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// True when there are no bins
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }
}

/// Arithmetic mean of each bin across all frames
///
/// Sums are accumulated in `f64` in frame order. A spectrogram without frames
/// averages to zero.
pub fn average_over_time(axis: &FrequencyAxis, spectrogram: &Spectrogram) -> AveragedSpectrum {
    let bins = spectrogram.bin_count();
    let mut sums = vec![0.0f64; bins];

    for frame in spectrogram.frames() {
        for (sum, &m) in sums.iter_mut().zip(frame) {
            *sum += m as f64;
        }
    }

    let n = spectrogram.frame_count();
    let magnitudes = sums
        .into_iter()
        .map(|s| if n == 0 { 0.0 } else { (s / n as f64) as f32 })
        .collect();

    log::debug!("Averaged {} bins over {} frames", bins, n);

    AveragedSpectrum {
        frequencies: axis.frequencies().to_vec(),
        magnitudes,
    }
}

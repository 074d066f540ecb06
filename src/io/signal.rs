//! Immutable mono signal handed to the extraction pipeline

use crate::error::LoadError;

/// Largest accepted sample magnitude
///
/// Full scale is `[-1.0, 1.0]`. Float sources may overshoot it slightly, but
/// values this large are corrupt and would overflow the spectral sums.
pub const MAX_SAMPLE_MAGNITUDE: f32 = 1.0e6;

/// Mono audio samples with their sample rate
///
/// Construction guarantees a non-empty, finite sample sequence bounded by
/// [`MAX_SAMPLE_MAGNITUDE`] and a non-zero sample rate. The samples cannot be
/// modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Signal {
    /// Create a signal from mono samples
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Empty` for no samples, `LoadError::InvalidSampleRate`
    /// for a zero rate, `LoadError::NonFiniteSample` if any sample is NaN or infinite
    /// and `LoadError::SampleOutOfRange` if any sample exceeds [`MAX_SAMPLE_MAGNITUDE`]
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, LoadError> {
        if samples.is_empty() {
            return Err(LoadError::Empty);
        }

        if sample_rate == 0 {
            return Err(LoadError::InvalidSampleRate(sample_rate));
        }

        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(LoadError::NonFiniteSample { index });
        }

        if let Some(index) = samples.iter().position(|s| s.abs() > MAX_SAMPLE_MAGNITUDE) {
            return Err(LoadError::SampleOutOfRange {
                index,
                value: samples[index],
            });
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Sample values
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when there are no samples (never for a constructed signal)
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

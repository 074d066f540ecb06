//! Configuration parameters for note extraction

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Extraction configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of notes to return (default: 12)
    pub top_n: usize,

    // STFT parameters
    /// FFT window size in samples, ideally a power of two (default: 2048)
    pub frame_size: usize,

    /// Samples between successive frames (default: 512)
    /// Must satisfy `0 < hop_length <= frame_size`
    pub hop_length: usize,

    /// Sample rate to analyze at (default: None = native rate of the file)
    /// When set, the loader resamples the decoded audio to this rate
    pub sample_rate: Option<u32>,

    // Band limits
    /// Lowest frequency kept, inclusive (default: 20.0 Hz)
    pub freq_min: f64,

    /// Highest frequency kept, inclusive (default: 20000.0 Hz)
    /// A `freq_min` above `freq_max` is accepted and yields no notes
    pub freq_max: f64,

    // Peak picking
    /// Prominence threshold as a fraction of the loudest averaged bin (default: 0.01)
    pub prominence_factor: f32,

    /// Fold every note into the octave starting at this note (default: None)
    /// e.g. "C4" constrains results to C4-B4
    pub octave_anchor_note: Option<String>,

    /// Transform STFT frames on the rayon pool (default: false)
    /// Results are identical to the sequential path
    pub parallel: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            top_n: 12,
            frame_size: 2048,
            hop_length: 512,
            sample_rate: None,
            freq_min: 20.0,
            freq_max: 20000.0,
            prominence_factor: 0.01,
            octave_anchor_note: None,
            parallel: false,
        }
    }
}

impl ExtractionConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidConfig` describing the first bad parameter
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.frame_size == 0 {
            return Err(ExtractionError::InvalidConfig(
                "Frame size must be > 0".to_string(),
            ));
        }

        if self.hop_length == 0 || self.hop_length > self.frame_size {
            return Err(ExtractionError::InvalidConfig(format!(
                "Hop length must be in 1..={}, got {}",
                self.frame_size, self.hop_length
            )));
        }

        if !(self.prominence_factor.is_finite() && self.prominence_factor > 0.0) {
            return Err(ExtractionError::InvalidConfig(format!(
                "Prominence factor must be finite and > 0, got {}",
                self.prominence_factor
            )));
        }

        if self.sample_rate == Some(0) {
            return Err(ExtractionError::InvalidConfig(
                "Sample rate override must be > 0".to_string(),
            ));
        }

        if self.freq_min.is_nan() || self.freq_max.is_nan() {
            return Err(ExtractionError::InvalidConfig(
                "Frequency bounds must not be NaN".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_n, 12);
        assert_eq!(config.frame_size, 2048);
        assert_eq!(config.hop_length, 512);
        assert_eq!(config.sample_rate, None);
        assert_eq!(config.freq_min, 20.0);
        assert_eq!(config.freq_max, 20000.0);
        assert!((config.prominence_factor - 0.01).abs() < 1e-9);
        assert!(config.octave_anchor_note.is_none());
    }

    #[test]
    fn test_invalid_hop_length() {
        let config = ExtractionConfig {
            hop_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExtractionConfig {
            hop_length: 4096,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_prominence_factor() {
        for factor in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            let config = ExtractionConfig {
                prominence_factor: factor,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "factor {} should be rejected", factor);
        }
    }

    #[test]
    fn test_inverted_band_is_allowed() {
        let config = ExtractionConfig {
            freq_min: 5000.0,
            freq_max: 100.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{ "top_n": 5, "octave_anchor_note": "C4" }"#;
        let config: ExtractionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.octave_anchor_note.as_deref(), Some("C4"));
        assert_eq!(config.frame_size, 2048);
    }
}

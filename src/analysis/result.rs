//! Extraction result types

use serde::{Deserialize, Serialize};

use crate::io::output::note_names_to_json;

/// A detected note with the spectral evidence behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchCandidate {
    /// Note name in scientific pitch notation with sharps (e.g., "C4", "F♯2")
    pub note_name: String,

    /// Pitch number the name was produced from (after any octave fold)
    pub pitch: u8,

    /// Time-averaged STFT magnitude of the peak bin
    pub magnitude: f32,

    /// Center frequency of the peak bin in Hz (before any octave fold)
    pub frequency: f64,
}

/// Non-fatal conditions encountered during extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExtractionWarning {
    /// The octave anchor note could not be resolved; notes were left unfolded
    InvalidAnchor {
        /// The anchor note as given
        note: String,
        /// Why it could not be parsed
        reason: String,
    },
    /// No frequency bin falls inside the requested band
    EmptyBand {
        /// Lower band limit in Hz
        freq_min: f64,
        /// Upper band limit in Hz
        freq_max: f64,
    },
    /// The averaged spectrum has no peak above the prominence threshold
    NoPeaks,
}

/// Extraction metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Audio duration in seconds
    pub duration_seconds: f32,

    /// Analysis sample rate in Hz
    pub sample_rate: u32,

    /// Number of STFT frames averaged
    pub frame_count: usize,

    /// Number of frequency bins inside the band
    pub bins_in_band: usize,

    /// Number of peaks above the prominence threshold
    pub peaks_detected: usize,

    /// Peaks dropped for lacking a note name (pitch outside 0..=127)
    pub dropped_out_of_range: usize,

    /// Resolved octave anchor pitch, if folding was applied
    pub octave_anchor: Option<i32>,

    /// Non-fatal conditions, in the order they occurred
    pub warnings: Vec<ExtractionWarning>,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,
}

impl Default for ExtractionMetadata {
    fn default() -> Self {
        Self {
            duration_seconds: 0.0,
            sample_rate: 0,
            frame_count: 0,
            bins_in_band: 0,
            peaks_detected: 0,
            dropped_out_of_range: 0,
            octave_anchor: None,
            warnings: vec![],
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Complete extraction result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Selected notes, ascending by pitch
    pub notes: Vec<PitchCandidate>,

    /// Extraction metadata
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// Note names, ascending by pitch
    pub fn note_names(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.note_name.clone()).collect()
    }

    /// True when no notes were selected
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Note names as a pretty-printed JSON array
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        note_names_to_json(&self.note_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, pitch: u8) -> PitchCandidate {
        PitchCandidate {
            note_name: name.to_string(),
            pitch,
            magnitude: 1.0,
            frequency: 440.0,
        }
    }

    #[test]
    fn test_note_names_and_json() {
        let result = ExtractionResult {
            notes: vec![candidate("C4", 60), candidate("A4", 69)],
            metadata: ExtractionMetadata::default(),
        };
        assert_eq!(result.note_names(), vec!["C4", "A4"]);
        assert!(!result.is_empty());

        let parsed: Vec<String> = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(parsed, vec!["C4", "A4"]);
    }

    #[test]
    fn test_empty_result_serializes_to_empty_array() {
        let result = ExtractionResult {
            notes: vec![],
            metadata: ExtractionMetadata::default(),
        };
        assert!(result.is_empty());
        assert_eq!(result.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_metadata_version() {
        let metadata = ExtractionMetadata::default();
        assert_eq!(metadata.algorithm_version, env!("CARGO_PKG_VERSION"));
        assert!(metadata.warnings.is_empty());
    }

    #[test]
    fn test_warning_serialization() {
        let warning = ExtractionWarning::InvalidAnchor {
            note: "H9".to_string(),
            reason: "Invalid note letter 'H'".to_string(),
        };
        let json = serde_json::to_string(&warning).unwrap();
        let back: ExtractionWarning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, warning);
    }
}

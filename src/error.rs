//! Error types for the note extraction pipeline

use thiserror::Error;

/// Errors raised while loading an audio resource into a [`Signal`](crate::io::signal::Signal)
///
/// A `LoadError` is the only failure that aborts an extraction call.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource could not be opened or read
    #[error("Failed to read audio resource: {0}")]
    Io(#[from] std::io::Error),

    /// The container or codec could not be decoded
    #[error("Failed to decode audio: {0}")]
    Decode(#[from] symphonia::core::errors::Error),

    /// The container holds no decodable audio track
    #[error("No supported audio tracks found")]
    NoAudioTrack,

    /// The track decoded to a layout this loader cannot handle
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// The resource decoded to zero samples
    #[error("Audio contains no samples")]
    Empty,

    /// Sample rate of zero, either decoded or requested
    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    /// A decoded sample is NaN or infinite
    #[error("Non-finite sample at index {index}")]
    NonFiniteSample {
        /// Position of the first offending sample
        index: usize,
    },

    /// A sample lies far outside the full-scale range
    #[error("Sample {value} at index {index} exceeds the maximum magnitude")]
    SampleOutOfRange {
        /// Position of the first offending sample
        index: usize,
        /// The offending value
        value: f32,
    },
}

/// Errors raised when a note name cannot be resolved to a pitch number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteNameError {
    /// Nothing left after trimming whitespace
    #[error("Empty note name")]
    Empty,

    /// The first character is not a note letter A-G
    #[error("Invalid note letter '{0}'")]
    InvalidLetter(char),

    /// Octave digits could not be parsed
    #[error("Invalid octave in note name '{0}'")]
    InvalidOctave(String),

    /// Cents suffix could not be parsed
    #[error("Invalid cents offset in note name '{0}'")]
    InvalidCents(String),

    /// Characters remain after a complete note name
    #[error("Unexpected trailing characters in note name '{0}'")]
    TrailingCharacters(String),
}

/// Errors returned by the reporting extraction APIs
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The audio resource could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration parameters are out of their valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

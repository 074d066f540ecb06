//! # Prominent Notes
//!
//! Extract the most prominent musical pitches of an audio recording and
//! report them as note names in scientific pitch notation.
//!
//! ## Features
//!
//! - **Decoding**: WAV, FLAC, MP3, AAC, ALAC and more through Symphonia, downmixed to mono
//! - **Spectrum**: Centered Hann-windowed STFT, band limiting and temporal averaging
//! - **Peak Picking**: Topographic prominence relative to the loudest bin
//! - **Pitch Mapping**: Equal-tempered note names with optional octave folding
//!
//! ## Quick Start
//!
//! ```no_run
//! use prominent_notes::{extract_prominent_notes, ExtractionConfig};
//!
//! let config = ExtractionConfig {
//!     top_n: 5,
//!     ..ExtractionConfig::default()
//! };
//!
//! let notes = extract_prominent_notes("recording.wav", &config);
//! for note in &notes {
//!     println!("{} ({:.1} Hz, magnitude {:.2})", note.note_name, note.frequency, note.magnitude);
//! }
//! ```
//!
//! ## Architecture
//!
//! The extraction pipeline follows this flow:
//!
//! ```text
//! Audio Input → Mono Signal → STFT → Band Filter → Time Average → Peaks → Pitches → Selection
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

use std::path::Path;
use std::time::Instant;

// Re-export main types
pub use analysis::result::{ExtractionMetadata, ExtractionResult, ExtractionWarning, PitchCandidate};
pub use config::ExtractionConfig;
pub use error::{ExtractionError, LoadError, NoteNameError};
pub use io::signal::Signal;

use analysis::selection::select_top_notes;
use features::peaks::detect_peaks;
use features::pitch::{map_peaks, resolve_anchor};
use features::spectrum::{average_over_time, compute_stft, filter_band};
use io::decoder::load_signal;

/// Extract the most prominent notes of a decoded signal
///
/// Runs the full pipeline on an in-memory signal: STFT, band filter,
/// temporal mean, prominence peaks, pitch mapping and selection.
///
/// # Arguments
///
/// * `signal` - Mono signal at its analysis sample rate
/// * `config` - Extraction configuration parameters
///
/// # Returns
///
/// `ExtractionResult` with at most `config.top_n` notes in ascending pitch order.
/// An unparsable octave anchor, an empty band and a peakless spectrum are not
/// errors; they are reported in `metadata.warnings`.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidConfig` if the configuration is out of range
///
/// # Example
///
/// ```
/// use prominent_notes::{analyze_signal, ExtractionConfig, Signal};
///
/// let sample_rate = 22050;
/// let samples = (0..sample_rate)
///     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin())
///     .collect();
/// let signal = Signal::new(samples, sample_rate)?;
///
/// let result = analyze_signal(&signal, &ExtractionConfig { top_n: 1, ..Default::default() })?;
/// assert_eq!(result.note_names(), vec!["A4"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn analyze_signal(
    signal: &Signal,
    config: &ExtractionConfig,
) -> Result<ExtractionResult, ExtractionError> {
    let start_time = Instant::now();

    log::debug!(
        "Starting note extraction: {} samples at {} Hz",
        signal.len(),
        signal.sample_rate()
    );

    config.validate()?;

    let mut metadata = ExtractionMetadata {
        duration_seconds: signal.duration_seconds(),
        sample_rate: signal.sample_rate(),
        ..ExtractionMetadata::default()
    };

    // 1. STFT
    let (spectrogram, axis) =
        compute_stft(signal, config.frame_size, config.hop_length, config.parallel)?;
    metadata.frame_count = spectrogram.frame_count();

    // 2. Octave anchor (an unparsable anchor disables folding)
    let anchor = match config.octave_anchor_note.as_deref() {
        Some(note) => match resolve_anchor(note) {
            Ok(pitch) => Some(pitch),
            Err(e) => {
                log::warn!("Ignoring octave anchor '{}': {}", note, e);
                metadata.warnings.push(ExtractionWarning::InvalidAnchor {
                    note: note.to_string(),
                    reason: e.to_string(),
                });
                None
            }
        },
        None => None,
    };
    metadata.octave_anchor = anchor;

    // 3. Band filter
    let (band_axis, band_spectrogram) =
        filter_band(&axis, &spectrogram, config.freq_min, config.freq_max);
    metadata.bins_in_band = band_axis.len();

    if band_axis.is_empty() {
        log::warn!(
            "No frequency bins in [{:.1}, {:.1}] Hz",
            config.freq_min,
            config.freq_max
        );
        metadata.warnings.push(ExtractionWarning::EmptyBand {
            freq_min: config.freq_min,
            freq_max: config.freq_max,
        });
        return Ok(finish(vec![], metadata, start_time));
    }

    // 4. Temporal mean
    let averaged = average_over_time(&band_axis, &band_spectrogram);

    // 5. Peaks
    let peaks = detect_peaks(&averaged, config.prominence_factor);
    metadata.peaks_detected = peaks.len();

    if peaks.is_empty() {
        log::debug!("No peaks above prominence threshold");
        metadata.warnings.push(ExtractionWarning::NoPeaks);
        return Ok(finish(vec![], metadata, start_time));
    }

    // 6. Pitch mapping
    let mapping = map_peaks(&peaks, anchor);
    metadata.dropped_out_of_range = mapping.dropped;

    // 7. Selection
    let notes = select_top_notes(mapping.candidates, config.top_n);

    Ok(finish(notes, metadata, start_time))
}

fn finish(
    notes: Vec<PitchCandidate>,
    mut metadata: ExtractionMetadata,
    start_time: Instant,
) -> ExtractionResult {
    metadata.processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Extraction complete: {} notes in {:.2} ms",
        notes.len(),
        metadata.processing_time_ms
    );

    ExtractionResult { notes, metadata }
}

/// Extract the most prominent notes of an audio file, reporting failures
///
/// Decodes `path` (resampling to `config.sample_rate` when set) and runs
/// [`analyze_signal`].
///
/// # Errors
///
/// Returns `ExtractionError::InvalidConfig` for an out-of-range configuration
/// and `ExtractionError::Load` if the file cannot be decoded into a signal
pub fn try_extract_prominent_notes(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionResult, ExtractionError> {
    config.validate()?;

    let path = path.as_ref();
    let signal = load_signal(path, config.sample_rate)?;

    analyze_signal(&signal, config)
}

/// Extract the most prominent notes of an audio file
///
/// Never fails: any error is logged and yields an empty list.
///
/// # Returns
///
/// At most `config.top_n` candidates in ascending pitch order
pub fn extract_prominent_notes(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Vec<PitchCandidate> {
    let path = path.as_ref();
    match try_extract_prominent_notes(path, config) {
        Ok(result) => result.notes,
        Err(e) => {
            log::error!("Note extraction failed for {}: {}", path.display(), e);
            vec![]
        }
    }
}

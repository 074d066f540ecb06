//! Map spectral peaks to pitch candidates

use crate::analysis::result::PitchCandidate;
use crate::features::peaks::Peak;

use super::conversion::{frequency_to_pitch, pitch_to_note_name, round_pitch};
use super::octave::fold_into_octave;

/// Candidates produced from a set of peaks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PitchMapping {
    /// One candidate per surviving peak, in peak order
    pub candidates: Vec<PitchCandidate>,
    /// Peaks without a valid note name (non-positive frequency or pitch outside 0..=127)
    pub dropped: usize,
}

/// Map one peak to a pitch candidate
///
/// The peak frequency is converted to the nearest pitch number, folded into
/// the anchor octave when an anchor is given, then named. Returns `None` for
/// a non-positive frequency or a (folded) pitch outside `0..=127`.
pub fn map_peak(peak: &Peak, anchor: Option<i32>) -> Option<PitchCandidate> {
    if peak.frequency <= 0.0 {
        return None;
    }

    let pitch = round_pitch(frequency_to_pitch(peak.frequency));
    let pitch = match anchor {
        Some(anchor) => fold_into_octave(pitch, anchor),
        None => i64::from(pitch),
    };

    let pitch = i32::try_from(pitch).ok()?;
    let note_name = pitch_to_note_name(pitch)?;

    Some(PitchCandidate {
        note_name,
        pitch: pitch as u8,
        magnitude: peak.magnitude,
        frequency: peak.frequency,
    })
}

/// Map every peak, counting the ones that have no note name
pub fn map_peaks(peaks: &[Peak], anchor: Option<i32>) -> PitchMapping {
    let mut mapping = PitchMapping::default();

    for peak in peaks {
        match map_peak(peak, anchor) {
            Some(candidate) => mapping.candidates.push(candidate),
            None => {
                log::debug!(
                    "Dropping peak at {:.2} Hz (bin {}): no note name",
                    peak.frequency,
                    peak.bin
                );
                mapping.dropped += 1;
            }
        }
    }

    log::debug!(
        "Mapped {} peaks to {} candidates ({} dropped, anchor={:?})",
        peaks.len(),
        mapping.candidates.len(),
        mapping.dropped,
        anchor
    );

    mapping
}

//! Octave folding
//!
//! Folding wraps a pitch number into the 12-semitone window `[anchor, anchor + 11]`
//! while keeping its pitch class. It is a modular wrap, not a clamp: a pitch
//! may move up or down by any number of octaves.

use crate::error::NoteNameError;

use super::conversion::note_name_to_pitch;

/// Wrap `pitch` into `[anchor, anchor + 11]`
///
/// Computes `((pitch - anchor) mod 12 + 12) mod 12 + anchor` in `i64`, so any
/// pair of `i32` inputs folds without overflow. The window may reach past
/// `i32::MAX` for an anchor near the top of the range.
///
/// # Example
///
/// ```
/// use prominent_notes::features::pitch::octave::fold_into_octave;
///
/// assert_eq!(fold_into_octave(72, 60), 60); // C5 -> C4
/// assert_eq!(fold_into_octave(59, 60), 71); // B3 -> B4
/// ```
pub fn fold_into_octave(pitch: i32, anchor: i32) -> i64 {
    let anchor = i64::from(anchor);
    (i64::from(pitch) - anchor).rem_euclid(12) + anchor
}

/// Resolve the anchor pitch from a note name such as "C4"
///
/// # Errors
///
/// Returns `NoteNameError` if the name cannot be parsed
pub fn resolve_anchor(note: &str) -> Result<i32, NoteNameError> {
    note_name_to_pitch(note)
}

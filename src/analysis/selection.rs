//! Candidate selection and ordering
//!
//! Selection happens in two independent passes that must not be merged into
//! a single comparator:
//! 1. Rank by magnitude (loudest first) and keep the first `top_n`
//! 2. Re-order the survivors by pitch number, recovered from each note name
//!
//! Callers therefore only ever observe pitch order, while the loudness
//! ranking decides membership.

use std::cmp::Ordering;

use crate::features::pitch::conversion::note_name_to_pitch;

use super::result::PitchCandidate;

/// Sort candidates loudest first
///
/// The sort is stable: candidates with equal magnitude keep their input order.
pub fn rank_by_magnitude(candidates: &mut [PitchCandidate]) {
    candidates.sort_by(|a, b| b.magnitude.partial_cmp(&a.magnitude).unwrap_or(Ordering::Equal));
}

/// Sort candidates by ascending pitch number parsed from their note names
///
/// The sort is stable: candidates with the same pitch keep their input order.
pub fn order_by_pitch(candidates: &mut [PitchCandidate]) {
    candidates.sort_by_key(|c| note_name_to_pitch(&c.note_name).unwrap_or(i32::MAX));
}

/// Keep the `top_n` loudest candidates, returned in ascending pitch order
///
/// # Example
///
/// ```
/// use prominent_notes::analysis::result::PitchCandidate;
/// use prominent_notes::analysis::selection::select_top_notes;
///
/// let candidate = |name: &str, pitch: u8, magnitude: f32| PitchCandidate {
///     note_name: name.to_string(),
///     pitch,
///     magnitude,
///     frequency: 0.0,
/// };
/// let selected = select_top_notes(
///     vec![candidate("A4", 69, 3.0), candidate("C2", 36, 1.0), candidate("E3", 52, 2.0)],
///     2,
/// );
/// let names: Vec<&str> = selected.iter().map(|c| c.note_name.as_str()).collect();
/// assert_eq!(names, ["E3", "A4"]);
/// ```
pub fn select_top_notes(mut candidates: Vec<PitchCandidate>, top_n: usize) -> Vec<PitchCandidate> {
    let total = candidates.len();

    rank_by_magnitude(&mut candidates);
    candidates.truncate(top_n);
    order_by_pitch(&mut candidates);

    log::debug!("Selected {} of {} candidates (top_n={})", candidates.len(), total, top_n);

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, magnitude: f32) -> PitchCandidate {
        PitchCandidate {
            note_name: name.to_string(),
            pitch: note_name_to_pitch(name).unwrap() as u8,
            magnitude,
            frequency: 0.0,
        }
    }

    fn names(candidates: &[PitchCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.note_name.as_str()).collect()
    }

    #[test]
    fn test_rank_by_magnitude_stable() {
        let mut candidates = vec![
            candidate("C4", 1.0),
            candidate("D4", 3.0),
            candidate("E4", 1.0),
            candidate("F4", 3.0),
        ];
        rank_by_magnitude(&mut candidates);
        assert_eq!(names(&candidates), vec!["D4", "F4", "C4", "E4"]);
    }

    #[test]
    fn test_order_by_pitch() {
        let mut candidates = vec![
            candidate("A4", 1.0),
            candidate("C♯2", 1.0),
            candidate("B3", 1.0),
            candidate("C4", 1.0),
        ];
        order_by_pitch(&mut candidates);
        assert_eq!(names(&candidates), vec!["C♯2", "B3", "C4", "A4"]);
    }

    #[test]
    fn test_selection_is_loudness_then_pitch() {
        // The quietest note is the lowest; it must be cut, not kept for its pitch
        let candidates = vec![
            candidate("C2", 0.1),
            candidate("G4", 5.0),
            candidate("E3", 4.0),
            candidate("A5", 3.0),
        ];
        let selected = select_top_notes(candidates, 3);
        assert_eq!(names(&selected), vec!["E3", "G4", "A5"]);
    }

    #[test]
    fn test_top_n_bounds() {
        let candidates = vec![candidate("C4", 1.0), candidate("D4", 2.0)];
        assert_eq!(select_top_notes(candidates.clone(), 10).len(), 2);
        assert!(select_top_notes(candidates.clone(), 0).is_empty());
        assert!(select_top_notes(vec![], 5).is_empty());
    }

    #[test]
    fn test_loudness_tie_at_cutoff_keeps_earlier() {
        let candidates = vec![
            candidate("B4", 2.0),
            candidate("C4", 2.0),
            candidate("D4", 5.0),
        ];
        let selected = select_top_notes(candidates, 2);
        assert_eq!(names(&selected), vec!["B4", "D4"]);
    }

    #[test]
    fn test_duplicate_names_kept() {
        // Two peaks folding onto the same note both survive selection
        let candidates = vec![candidate("C4", 1.0), candidate("C4", 2.0), candidate("A3", 0.5)];
        let selected = select_top_notes(candidates, 3);
        assert_eq!(names(&selected), vec!["A3", "C4", "C4"]);
        assert_eq!(selected[1].magnitude, 2.0);
    }
}

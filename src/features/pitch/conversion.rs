//! Frequency, pitch number and note name conversion
//!
//! Pitch numbers follow the MIDI convention: 12 equal-tempered semitones per
//! octave, A4 = 440 Hz = 69, C4 = 60. Note names are spelled with the
//! sharp sign `♯` and place octave boundaries at C, so pitch 0 is "C-1",
//! pitch 61 is "C♯4" and pitch 127 is "G9".

use crate::error::NoteNameError;

/// Reference frequency of A4 in Hz
pub const A4_FREQUENCY: f64 = 440.0;

/// Pitch number of A4
pub const A4_PITCH: f64 = 69.0;

/// Lowest pitch number with a note name
pub const MIN_PITCH: i32 = 0;

/// Highest pitch number with a note name
pub const MAX_PITCH: i32 = 127;

const NOTE_NAMES: [&str; 12] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];

/// Continuous pitch number of a frequency
///
/// `69 + 12 * log2(frequency / 440)`. Non-positive frequencies map to the
/// sentinel 0.0.
///
/// # Example
///
/// ```
/// use prominent_notes::features::pitch::conversion::frequency_to_pitch;
///
/// assert_eq!(frequency_to_pitch(440.0), 69.0);
/// assert!((frequency_to_pitch(261.63) - 60.0).abs() < 0.01);
/// assert_eq!(frequency_to_pitch(0.0), 0.0);
/// ```
pub fn frequency_to_pitch(frequency: f64) -> f64 {
    if frequency <= 0.0 {
        return 0.0;
    }
    A4_PITCH + 12.0 * (frequency / A4_FREQUENCY).log2()
}

/// Round a continuous pitch to the nearest integer, ties to even
pub fn round_pitch(pitch: f64) -> i32 {
    pitch.round_ties_even() as i32
}

/// Note name of an integer pitch number, `None` outside `0..=127`
///
/// # Example
///
/// ```
/// use prominent_notes::features::pitch::conversion::pitch_to_note_name;
///
/// assert_eq!(pitch_to_note_name(60).as_deref(), Some("C4"));
/// assert_eq!(pitch_to_note_name(70).as_deref(), Some("A♯4"));
/// assert_eq!(pitch_to_note_name(128), None);
/// ```
pub fn pitch_to_note_name(pitch: i32) -> Option<String> {
    if !(MIN_PITCH..=MAX_PITCH).contains(&pitch) {
        return None;
    }
    let octave = pitch.div_euclid(12) - 1;
    let class = pitch.rem_euclid(12) as usize;
    Some(format!("{}{}", NOTE_NAMES[class], octave))
}

/// Pitch number of a note name
///
/// Accepts a letter `A`-`G` (either case), any run of accidentals
/// (`#`, `♯`, `𝄪`, `b`, `!`, `♭`, `𝄫`, `♮`, `n`; their offsets add up), an
/// optional signed octave (default 0) and an optional signed cents offset,
/// e.g. `"C4"`, `"Bb3"`, `"f##2"`, `"A4+30"`, `"C-1"`. The result is rounded
/// to the nearest pitch number, ties to even. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `NoteNameError` if the name does not follow this grammar, or if its
/// octave puts the pitch number outside the `i32` range
///
/// # Example
///
/// ```
/// use prominent_notes::features::pitch::conversion::note_name_to_pitch;
///
/// assert_eq!(note_name_to_pitch("C4"), Ok(60));
/// assert_eq!(note_name_to_pitch("Bb3"), Ok(58));
/// assert!(note_name_to_pitch("H2").is_err());
/// ```
pub fn note_name_to_pitch(name: &str) -> Result<i32, NoteNameError> {
    let name = name.trim();
    let mut chars = name.chars().peekable();

    let letter = chars.next().ok_or(NoteNameError::Empty)?;
    let semitone = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(NoteNameError::InvalidLetter(letter)),
    };

    let mut accidental = 0;
    while let Some(&c) = chars.peek() {
        accidental += match c {
            '#' | '♯' => 1,
            '𝄪' => 2,
            'b' | '!' | '♭' => -1,
            '𝄫' => -2,
            '♮' | 'n' => 0,
            _ => break,
        };
        chars.next();
    }

    let rest: String = chars.collect();

    let (octave, rest) = if rest.is_empty() {
        (0, rest.as_str())
    } else {
        match take_signed_int(&rest, false) {
            Some(parsed) => parsed,
            None if rest.starts_with(|c: char| c == '+' || c == '-' || c.is_ascii_digit()) => {
                return Err(NoteNameError::InvalidOctave(name.to_string()));
            }
            None => return Err(NoteNameError::TrailingCharacters(name.to_string())),
        }
    };

    let (cents, rest) = if rest.is_empty() {
        (0, rest)
    } else {
        take_signed_int(rest, true).ok_or_else(|| NoteNameError::InvalidCents(name.to_string()))?
    };

    if !rest.is_empty() {
        return Err(NoteNameError::TrailingCharacters(name.to_string()));
    }

    let value = (12.0 * (octave as f64 + 1.0)
        + (semitone + accidental) as f64
        + cents as f64 / 100.0)
        .round_ties_even();

    if !(i32::MIN as f64..=i32::MAX as f64).contains(&value) {
        return Err(NoteNameError::InvalidOctave(name.to_string()));
    }

    Ok(value as i32)
}

/// Parse a leading (optionally signed) integer, returning it with the remainder
fn take_signed_int(s: &str, sign_required: bool) -> Option<(i32, &str)> {
    let sign_len = usize::from(s.starts_with(|c: char| c == '+' || c == '-'));
    if sign_required && sign_len == 0 {
        return None;
    }

    let digits = s[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }

    let end = sign_len + digits;
    let value = s[..end].parse::<i32>().ok()?;
    Some((value, &s[end..]))
}

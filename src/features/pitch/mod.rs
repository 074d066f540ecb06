//! Pitch mapping modules
//!
//! Map spectral peaks to musical notes:
//! - Frequency / pitch number / note name conversion
//! - Octave folding around an anchor note
//! - Per-peak mapping into pitch candidates

pub mod conversion;
pub mod mapper;
pub mod octave;

pub use conversion::{frequency_to_pitch, note_name_to_pitch, pitch_to_note_name, round_pitch};
pub use mapper::{map_peak, map_peaks, PitchMapping};
pub use octave::{fold_into_octave, resolve_anchor};

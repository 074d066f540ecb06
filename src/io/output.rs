//! JSON output of note-name lists
//!
//! Note lists are written as a plain JSON array of strings, indented with
//! four spaces. An empty result is written as `[]`, never as an error payload.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Serialize note names as a pretty-printed JSON array
///
/// # Example
///
/// ```
/// use prominent_notes::io::output::note_names_to_json;
///
/// let json = note_names_to_json(&["C4".to_string(), "A4".to_string()]).unwrap();
/// assert_eq!(json, "[\n    \"C4\",\n    \"A4\"\n]");
/// ```
pub fn note_names_to_json(names: &[String]) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    write_pretty(&mut buf, names)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

/// Write note names to a JSON file, replacing any existing content
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written
pub fn write_note_names_json(path: &Path, names: &[String]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_pretty(&mut writer, names)?;
    writer.flush()?;

    log::debug!("Wrote {} note names to {}", names.len(), path.display());
    Ok(())
}

fn write_pretty<W: Write>(writer: W, names: &[String]) -> Result<(), serde_json::Error> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(writer, formatter);
    names.serialize(&mut ser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_ascii_names_kept_verbatim() {
        let json = note_names_to_json(&["F♯2".to_string(), "A♯4".to_string()]).unwrap();
        assert_eq!(json, "[\n    \"F♯2\",\n    \"A♯4\"\n]");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(note_names_to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_sharp_names_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let names = vec!["C♯4".to_string(), "G4".to_string()];

        write_note_names_json(&path, &names).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, names);
        // Written as raw UTF-8, not as a \u escape
        assert!(text.contains("\n    \"C♯4\""));
    }
}

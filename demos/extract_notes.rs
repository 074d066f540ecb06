//! Example: Extract the most prominent notes of an audio file
//!
//! Usage:
//!   cargo run --release --example extract_notes -- <audio_file> [-n 12] [-o notes.json]
//!                                                  [--constrain-octave-start-note C4]
//!
//! Prints the note names (ascending by pitch) as a JSON array, or writes them
//! to a file with `-o`. Set `RUST_LOG=debug` to trace each pipeline stage.

use std::path::PathBuf;

use clap::Parser;
use prominent_notes::io::output::{note_names_to_json, write_note_names_json};
use prominent_notes::{extract_prominent_notes, ExtractionConfig};

#[derive(Parser, Debug)]
#[command(
    name = "extract_notes",
    about = "Extract prominent frequencies, map them to notes and output the note names as JSON"
)]
struct Args {
    /// Path to the input audio file
    audio_file: PathBuf,

    /// Number of most prominent notes to extract
    #[arg(short = 'n', long, default_value_t = 12)]
    top_n: usize,

    /// FFT window size in samples, ideally a power of two
    #[arg(long, default_value_t = 2048)]
    frame_size: usize,

    /// Number of samples between successive frames
    #[arg(long, default_value_t = 512)]
    hop_length: usize,

    /// Analysis sample rate in Hz (default: native rate of the file)
    #[arg(long)]
    sr: Option<u32>,

    /// Lowest frequency to consider, in Hz
    #[arg(long, default_value_t = 20.0)]
    freq_min: f64,

    /// Highest frequency to consider, in Hz
    #[arg(long, default_value_t = 20000.0)]
    freq_max: f64,

    /// Peak prominence threshold as a fraction of the loudest bin
    #[arg(long, default_value_t = 0.01)]
    prominence_factor: f32,

    /// Write the note names to this JSON file instead of the console
    #[arg(short = 'o', long)]
    output_json: Option<PathBuf>,

    /// Fold every note into the octave starting at this note (e.g. "C4" for C4-B4)
    #[arg(long)]
    constrain_octave_start_note: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let config = ExtractionConfig {
        top_n: args.top_n,
        frame_size: args.frame_size,
        hop_length: args.hop_length,
        sample_rate: args.sr,
        freq_min: args.freq_min,
        freq_max: args.freq_max,
        prominence_factor: args.prominence_factor,
        octave_anchor_note: args.constrain_octave_start_note.clone(),
        ..ExtractionConfig::default()
    };

    let notes = extract_prominent_notes(&args.audio_file, &config);
    let names: Vec<String> = notes.into_iter().map(|n| n.note_name).collect();

    if names.is_empty() {
        println!("No prominent notes found in the given range, or the audio file could not be processed.");
        if let Some(path) = &args.output_json {
            match write_note_names_json(path, &names) {
                Ok(()) => println!("Empty note list saved to {}", path.display()),
                Err(e) => {
                    eprintln!("Failed to save JSON to {}: {}", path.display(), e);
                    println!("[]");
                }
            }
        }
        return Ok(());
    }

    let json = note_names_to_json(&names)?;

    match &args.output_json {
        Some(path) => match write_note_names_json(path, &names) {
            Ok(()) => println!("Note names saved to {}", path.display()),
            Err(e) => {
                eprintln!("Failed to save JSON to {}: {}", path.display(), e);
                println!("\nFalling back to console output:");
                println!("{}", json);
            }
        },
        None => {
            println!("Top {} most prominent notes (ascending pitch):", args.top_n);
            if let Some(anchor) = &args.constrain_octave_start_note {
                println!("  (Constrained to the octave starting at {})", anchor);
            }
            println!("------------------------------------------------");
            println!("{}", json);
        }
    }

    Ok(())
}

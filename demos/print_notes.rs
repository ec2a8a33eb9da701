//! Parse a SUS file and print its note timeline in seconds.
//!
//! Usage:
//!   cargo run --example `print_notes` -- <`file_path`>
//!
//! Example:
//!   cargo run --example `print_notes` -- `tests/files/tempo_changes.sus`

use std::path::PathBuf;

use clap::Parser;
use sus_rs::{
    SusOutput,
    diagnostics::{emit_sus_error, emit_sus_warnings},
    model::notes::Note,
    parse::{default_config, prompt::AlwaysWarnAndUseNewer},
    parse_sus_with_config,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "print_notes")]
#[command(about = "Prints the notes of a SUS chart in seconds", long_about = None)]
struct Args {
    /// Chart file path
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Also prints the tempo changes
    #[arg(long)]
    bpm: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let name = args.path.display().to_string();
    let source = std::fs::read_to_string(&args.path)?;

    let config = default_config().prompter(AlwaysWarnAndUseNewer);
    let SusOutput { song, warnings } = match parse_sus_with_config(&source, config) {
        Ok(output) => output,
        Err(err) => {
            emit_sus_error(&name, &source, &err);
            return Err(err.into());
        }
    };
    emit_sus_warnings(&name, &source, &warnings);

    if let Some(title) = &song.info.title {
        println!("{title}");
    }
    if args.bpm {
        for anchor in song.bpm_anchors() {
            println!("BPM {:>8.3} at {:>10.4}s", anchor.bpm.as_f64(), anchor.seconds);
        }
    }
    for note in &song.notes {
        match note {
            Note::Tap(tap) => println!("{:.4}", tap.point.seconds),
            Note::Slide(slide) => println!("{:.4} : {:.4}", slide.start.seconds, slide.end.seconds),
            _ => {}
        }
    }
    Ok(())
}

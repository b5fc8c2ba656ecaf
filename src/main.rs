//! # Mood Memo CLI
//!
//! Drives the desk toy without a screen.
//!
//! ## Usage
//!
//! ```bash
//! # Print one mood and save the note as a PNG in the current directory
//! mood-memo print "feeling great"
//!
//! # Same, into a directory, with a reproducible color and tilt
//! mood-memo print --out memos --seed 7 "feeling great"
//!
//! # Replay a recorded session, saving every downloaded image
//! mood-memo replay session.json --out memos
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use tracing::Level;

use mood_memo::{
    MemoConfig, MemoError, MoodMemo,
    app::{Effect, Event},
    geometry::{Point, StaticLayout},
    random,
    router::{Button, PointerEvent, Target},
    script::Script,
};

/// Mood Memo - desk-toy receipt printer
#[derive(Parser, Debug)]
#[command(name = "mood-memo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every state transition
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one note, take it from the exit and save it as PNG
    Print {
        /// What to print (at most 150 characters are kept)
        text: String,

        /// Directory for the exported image
        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,

        /// Seed for paper color and tilt
        #[arg(long)]
        seed: Option<u64>,

        /// JSON config overriding the defaults
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Replay a JSON session script
    Replay {
        /// Script file
        script: PathBuf,

        /// Directory for downloaded images
        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,

        /// Seed for paper colors and tilts
        #[arg(long)]
        seed: Option<u64>,

        /// JSON config overriding the defaults
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), MemoError> {
    match command {
        Commands::Print {
            text,
            out,
            seed,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let mut memo = build(config, seed);
            print_one(&mut memo, &text, &out)
        }
        Commands::Replay {
            script,
            out,
            seed,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let script = Script::from_json_file(&script)?;
            let mut memo = build(config, seed);
            replay(&mut memo, &script, &out)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<MemoConfig, MemoError> {
    match path {
        Some(path) => MemoConfig::from_json_file(path),
        None => Ok(MemoConfig::DEFAULT),
    }
}

fn build(config: MemoConfig, seed: Option<u64>) -> MoodMemo<StaticLayout, StdRng> {
    let rng = match seed {
        Some(seed) => random::seeded(seed),
        None => random::from_os(),
    };
    MoodMemo::new(config, StaticLayout::DESKTOP, rng)
}

/// Type, print, wait, take the note and save it.
fn print_one(
    memo: &mut MoodMemo<StaticLayout, StdRng>,
    text: &str,
    out: &Path,
) -> Result<(), MemoError> {
    let mut now = Duration::ZERO;
    memo.handle(Event::Type { text: text.to_string() }, now);
    memo.handle(Event::PressPrint, now);
    if !memo.is_printing() {
        return Err(MemoError::NothingToPrint);
    }
    println!("{}", memo.lcd().text());

    now += memo.config().print_duration();
    memo.handle(Event::Tick, now);
    println!("{}", memo.lcd().text());

    let grab = StaticLayout::DESKTOP
        .slot
        .map(|slot| Point::new(slot.left + slot.width / 2.0, slot.top - 40.0))
        .unwrap_or_default();
    memo.handle(
        Event::Pointer(PointerEvent::Down {
            at: grab,
            button: Button::Primary,
            target: Target::Exit,
        }),
        now,
    );
    memo.handle(Event::Pointer(PointerEvent::Up { at: grab }), now);

    let Some(note) = memo.notes().last() else {
        return Err(MemoError::NothingToPrint);
    };
    let image = memo.export(note.id)?;
    std::fs::create_dir_all(out)?;
    let path = image.save(out)?;
    println!(
        "Saved {} ({}x{}, paper {})",
        path.display(),
        image.width,
        image.height,
        note.color
    );
    Ok(())
}

fn replay(
    memo: &mut MoodMemo<StaticLayout, StdRng>,
    script: &Script,
    out: &Path,
) -> Result<(), MemoError> {
    for (at, effect) in script.replay(memo) {
        match effect {
            Effect::Download(image) => {
                std::fs::create_dir_all(out)?;
                let path = image.save(out)?;
                println!("[{:>6} ms] saved {}", at.as_millis(), path.display());
            }
            Effect::Notice(notice) => println!("[{:>6} ms] {}", at.as_millis(), notice),
            Effect::SuppressDefault => {}
        }
    }

    let summary = serde_json::to_string_pretty(memo.notes())
        .map_err(|e| MemoError::Script(e.to_string()))?;
    println!("{}", summary);
    Ok(())
}

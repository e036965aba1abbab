mod capture;
mod layout;
mod replay;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use std::fs;
use std::path::PathBuf;

use cardputer_keymap::{lookup, matrix_position, KeyEvent, Label, ModifierLatches};

use replay::{Mode, PollReport};

#[derive(Parser)]
#[command(name = "cardputer-kb")]
#[command(about = "Cardputer keyboard keymap and event tools")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the three keymap layers as an HTML page
    Layout {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Explain raw TCA8418 event bytes
    Decode {
        /// Event bytes in hex, e.g. 8D or 0x07
        #[arg(required = true)]
        bytes: Vec<String>,
    },
    /// Run a recorded event capture through the keyboard driver
    Replay {
        /// Capture file, one poll per line
        capture: PathBuf,
        /// Report only newly seen keys, as get_new_keys does
        #[arg(long)]
        new_keys: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Command::Layout { output } => {
            let html = layout::generate_html();
            match output {
                Some(path) => {
                    fs::write(&path, html)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Layout written to {}", path.display());
                }
                None => print!("{}", html),
            }
        }
        Command::Decode { bytes } => {
            for token in &bytes {
                let raw = capture::parse_byte(token)?;
                println!("{}", describe_event(raw));
            }
        }
        Command::Replay { capture, new_keys } => {
            let contents = fs::read_to_string(&capture)
                .with_context(|| format!("reading {}", capture.display()))?;
            let polls = capture::parse_capture(&contents).context("parsing event capture")?;
            debug!("replaying {} polls from {}", polls.len(), capture.display());

            let mode = if new_keys { Mode::New } else { Mode::Pressed };
            for (index, report) in replay::replay(&polls, mode).iter().enumerate() {
                println!("poll {:>3}: {}", index + 1, format_report(report));
            }
        }
    }

    Ok(())
}

fn describe_event(raw: u8) -> String {
    if raw == 0 {
        return "0x00  end of queue".to_string();
    }

    let event = KeyEvent::decode(raw);
    let action = if event.pressed { "press  " } else { "release" };
    let position = match matrix_position(event.key) {
        Some((row, col)) => format!("row {} col {:>2}", row, col),
        None => "off-matrix  ".to_string(),
    };
    let layers = match lookup(event.key) {
        Some(mapping) => format!(
            "{} / {} / {}",
            slot(mapping.base),
            slot(mapping.shift),
            slot(mapping.function)
        ),
        None => "unmapped".to_string(),
    };

    format!(
        "0x{:02X}  key {:>3}  {}  {}  {}",
        raw, event.key, action, position, layers
    )
}

fn slot(label: Option<Label>) -> Label {
    label.unwrap_or("-")
}

fn format_report(report: &PollReport) -> String {
    let ModifierLatches {
        shift_held,
        function_held,
    } = report.modifiers;
    format!(
        "[{}]  shift={} fn={}",
        report.labels.join(", "),
        on_off(shift_held),
        on_off(function_held)
    )
}

fn on_off(held: bool) -> &'static str {
    if held {
        "on"
    } else {
        "off"
    }
}

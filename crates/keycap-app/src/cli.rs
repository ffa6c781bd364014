use std::path::PathBuf;

use clap::{Parser, Subcommand};
use keycap_common::OsType;

/// Keycap: record and manage global keyboard shortcuts.
#[derive(Parser, Debug)]
#[command(name = "keycap", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// OS used for key names and labels (macos, windows, linux).
    #[arg(long, global = true)]
    pub os: Option<OsType>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List bindings with their display labels.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Render a stored combination as a label.
    Format {
        combination: String,
        /// Treat the input as a GNOME accelerator (`<Control><Alt>t`).
        #[arg(long)]
        external: bool,
    },
    /// Show the canonical token for a raw key event.
    Normalize {
        /// Physical key code, e.g. `ControlLeft` or `Numpad3`.
        #[arg(long, default_value = "")]
        code: String,
        /// Logical key value, e.g. `Control` or `a`.
        #[arg(long, default_value = "")]
        key: String,
        #[arg(long, default_value_t = 0)]
        key_code: u32,
    },
    /// Record a new shortcut for a binding from a JSON event script.
    Record {
        id: String,
        #[arg(long)]
        script: PathBuf,
    },
    /// Capture a desktop-shell shortcut from a JSON event script.
    External {
        #[arg(long)]
        script: PathBuf,
    },
    /// Restore a binding's default shortcut.
    Reset { id: String },
    /// Add a user binding.
    Add,
    /// Remove a user binding.
    Remove { id: String },
    /// Print the detected desktop session.
    Probe,
    /// Print the effective settings as JSON.
    Config,
}

pub fn parse() -> Args {
    Args::parse()
}

//! `scfg`: inspect and edit scfg config files from the command line.
//!
//! # Usage
//!
//! ```text
//! scfg [--log-level <LEVEL>] <COMMAND>
//!
//! Commands:
//!   demo  <FILE>                              Write and reload a sample config
//!   check <FILE>                              Load a file and report its size
//!   dump  <FILE> [--json]                     Print a file as text or JSON
//!   get   <FILE> <GROUP> <ENTRY>              Print one value
//!   set   <FILE> <GROUP> <ENTRY> <TAG> <VALUE> Add or replace one value
//! ```
//!
//! # Logging
//!
//! Logs go to stderr.  `RUST_LOG` takes precedence; otherwise the level comes
//! from `--log-level` or the `SCFG_LOG` environment variable (default `warn`).
//! `--log-level debug` shows every group and entry the codec reads or writes.

mod commands;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit scfg config files.
#[derive(Debug, Parser)]
#[command(name = "scfg", about = "Inspect and edit scfg config files", version)]
struct Cli {
    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn", env = "SCFG_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a sample config to FILE, reload it and print it.
    Demo { file: PathBuf },

    /// Load FILE and report how many groups and entries it holds.
    Check { file: PathBuf },

    /// Print FILE in the scfg text format, or as JSON with `--json`.
    Dump {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Print the value of ENTRY in GROUP.
    Get {
        file: PathBuf,
        group: String,
        entry: String,
    },

    /// Add or replace ENTRY in GROUP, creating the file and group if needed.
    Set {
        file: PathBuf,
        group: String,
        entry: String,
        /// Type tag: i32, i64, u32, u64, f32, f64 or str.
        tag: String,
        /// The value; negative numbers are accepted as-is.
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &mut out)
}

fn run(command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Demo { file } => commands::demo(&file, out),
        Command::Check { file } => commands::check(&file, out),
        Command::Dump { file, json } => commands::dump(&file, json, out),
        Command::Get { file, group, entry } => commands::get(&file, &group, &entry, out),
        Command::Set {
            file,
            group,
            entry,
            tag,
            value,
        } => commands::set(&file, &group, &entry, &tag, &value, out),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

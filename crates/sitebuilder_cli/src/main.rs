//! CLI entry point.
//!
//! # Responsibility
//! - Provide a smoke probe for `sitebuilder_core` linkage (`info`).
//! - Export a persisted project to a zip archive without the editor UI.

use clap::{Parser, Subcommand};
use sitebuilder_core::{BuilderConfig, DocumentStore, SqliteKeyValueStore};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "sitebuilder", version, about = "Site builder core utilities")]
struct Cli {
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage and version information.
    Info,
    /// Export the stored project as a static site archive.
    Export {
        /// SQLite database holding the project slot.
        #[arg(long)]
        db: PathBuf,
        /// Directory the archive is written into.
        #[arg(long)]
        out: PathBuf,
        /// Slot key; defaults to the editor's key.
        #[arg(long)]
        key: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = sitebuilder_core::default_log_level();
        let started = log_dir_str(log_dir)
            .and_then(|log_dir| sitebuilder_core::init_logging(level, log_dir));
        if let Err(err) = started {
            eprintln!("logging disabled: {err}");
        }
    }

    match cli.command {
        Command::Info => {
            println!("sitebuilder_core ping={}", sitebuilder_core::ping());
            println!("sitebuilder_core version={}", sitebuilder_core::core_version());
            ExitCode::SUCCESS
        }
        Command::Export { db, out, key } => match export(db, out, key) {
            Ok(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("export failed: {err}");
                ExitCode::FAILURE
            }
        },
    }
}

fn export(
    db: PathBuf,
    out: PathBuf,
    key: Option<String>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut config = BuilderConfig::default();
    if let Some(key) = key {
        config.storage_key = key;
    }

    let backend = SqliteKeyValueStore::open(&db)?;
    let mut store = DocumentStore::with_config(backend, config);
    store.initialize();
    log::info!(
        "event=cli_export module=cli status=start pages={}",
        store.project().pages.len()
    );

    std::fs::create_dir_all(&out)?;
    let path = store.export()?.write_archive(&out)?;
    Ok(path)
}

fn log_dir_str(log_dir: &Path) -> Result<&str, String> {
    log_dir
        .to_str()
        .ok_or_else(|| format!("log_dir `{}` is not valid UTF-8", log_dir.display()))
}

//! Binary entry point. Reads the connection parameters, opens the guest list
//! store, then either runs one subcommand or drives the Ratatui event loop
//! until the user exits.
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use conference_attendees::cli::{run_command, Args};
use conference_attendees::{load_connection_params, run_app, App, GuestList, Store};
use directories::BaseDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_DIR_NAME: &str = ".conference-attendees";
const LOG_FILE_NAME: &str = "conference-attendees.log";
const DEFAULT_LOG_FILTER: &str = "conference_attendees=info";

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.command.is_none())?;

    let params = load_connection_params(&args.config, &args.section)?;
    let store = Store::open(&params)?;
    let guests = GuestList::new(store);

    match args.command {
        Some(command) => run_command(&guests, command, &mut io::stdout().lock()),
        None => {
            let attendees = guests.list()?;
            info!(count = attendees.len(), "starting terminal ui");
            let mut app = App::new(guests, attendees);
            run_app(&mut app)
        }
    }
}

/// Subcommands log to stderr. The terminal UI owns the screen, so its logs go
/// to a file in the home directory instead.
fn init_tracing(to_file: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if to_file {
        let path = log_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        builder.with_writer(io::stderr).init();
    }
    Ok(())
}

fn log_file_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

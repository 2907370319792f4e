//! Command-line surface. Without a subcommand the binary opens the terminal
//! UI; with one it performs a single guest list operation and prints the
//! result, which keeps the list scriptable.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_CONFIG_FILE, DEFAULT_SECTION};
use crate::export::{render_details, render_summaries, ExportFormat};
use crate::guestlist::{GuestList, Removal, SearchOutcome};
use crate::models::NewAttendee;

#[derive(Parser, Debug)]
#[command(name = "conference-attendees")]
#[command(about = "Track conference attendees and export the guest list")]
#[command(version)]
pub struct Args {
    /// INI file holding the database connection parameters
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Section of the configuration file to read
    #[arg(short, long, default_value = DEFAULT_SECTION)]
    pub section: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every attendee, oldest first
    List,
    /// Find attendees by part of their name
    Search { term: String },
    /// Add an attendee
    Add {
        first_name: String,
        last_name: String,
        city: String,
        company: String,
        email: String,
        phone: String,
    },
    /// Remove an attendee by id
    Delete { id: i64 },
    /// Export the guest list; the format follows the file extension
    Export { path: PathBuf },
}

/// Run one subcommand against `guests`, writing human-readable output to `out`.
pub fn run_command(guests: &GuestList, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::List => {
            let attendees = guests.list().context("failed to list attendees")?;
            if attendees.is_empty() {
                writeln!(out, "The guest list is empty.")?;
            }
            for line in render_summaries(&attendees) {
                writeln!(out, "{line}")?;
            }
        }
        Command::Search { term } => match guests.search(&term).context("search failed")? {
            SearchOutcome::Matches(found) => {
                for attendee in &found {
                    writeln!(out, "{}\n", render_details(attendee))?;
                }
            }
            SearchOutcome::NoMatches => writeln!(out, "No attendee matches `{term}`.")?,
            SearchOutcome::TooMany(count) => writeln!(
                out,
                "There are too many matching results ({count}). Try a more specific search."
            )?,
        },
        Command::Add {
            first_name,
            last_name,
            city,
            company,
            email,
            phone,
        } => {
            let attendee = NewAttendee::new(first_name, last_name, city, company, email, phone);
            let stored = guests.add(&attendee).context("failed to add attendee")?;
            writeln!(out, "Attendee created: {stored}")?;
        }
        Command::Delete { id } => match guests.remove(id).context("failed to remove attendee")? {
            Removal::Removed => writeln!(out, "Attendee {id} deleted.")?,
            Removal::NotFound => writeln!(out, "No attendee with id {id}.")?,
        },
        Command::Export { path } => {
            let format = ExportFormat::from_path(&path).ok_or_else(|| {
                anyhow!(
                    "cannot tell the export format of {}; use a .docx or .xlsx file name",
                    path.display()
                )
            })?;
            let report = guests
                .export(format, &path)
                .with_context(|| format!("failed to export to {}", path.display()))?;
            writeln!(out, "List successfully exported to:\n{}", report.path.display())?;
        }
    }
    Ok(())
}

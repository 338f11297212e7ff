//! Command-line interface for airline.
//!
//! This module provides the CLI structure and the interactive menu for the
//! `airline` binary.

mod commands;
mod menu;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{BookCommand, ConfigCommand, FlightsCommand};
pub use menu::{write_flight_table, Menu};

/// airline - Terminal airline reservation utility
///
/// Tracks flight inventory, records seat bookings and cancellations, and
/// writes a daily report. Runs the interactive menu when no command is given.
#[derive(Debug, Parser)]
#[command(name = "airline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive reservation menu
    Session,

    /// List flights from the flight source
    Flights(FlightsCommand),

    /// Book seats without the interactive menu
    Book(BookCommand),

    /// Write a report for the current flight source
    Report,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }

    /// The command to run, defaulting to the interactive session.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Session)
    }
}

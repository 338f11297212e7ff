//! `airline` - CLI for the airline reservation utility
//!
//! Runs the interactive reservation menu by default, plus a few one-shot
//! commands for scripting.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::{bail, Context};
use clap::Parser;

use airline::cli::{write_flight_table, BookCommand, Cli, Command, ConfigCommand, Menu};
use airline::{init_logging, Config, Session};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.into_command() {
        Command::Session => handle_session(&config),
        Command::Flights(cmd) => handle_flights(&config, cmd.json),
        Command::Book(cmd) => handle_book(&config, &cmd),
        Command::Report => handle_report(&config),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_session(config: &Config) -> anyhow::Result<()> {
    let mut session = Session::open(config)?;
    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout().lock());
    menu.run(&mut session)?;
    Ok(())
}

fn handle_flights(config: &Config, json: bool) -> anyhow::Result<()> {
    let session = Session::open(config)?;
    let flights = session.catalog().list();

    if json {
        println!("{}", serde_json::to_string_pretty(flights)?);
    } else if flights.is_empty() {
        println!("No flights available");
    } else {
        write_flight_table(&mut io::stdout().lock(), flights)?;
    }
    Ok(())
}

fn handle_book(config: &Config, cmd: &BookCommand) -> anyhow::Result<()> {
    let mut session = Session::open(config)?;
    let mut failed = 0usize;

    for flight_number in &cmd.flights {
        match session.book(flight_number) {
            Ok(booking) => println!(
                "Booked {}: {} to {}",
                booking.flight_number, booking.origin, booking.destination
            ),
            Err(err) => {
                eprintln!("{flight_number}: {err}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} bookings failed", cmd.flights.len());
    }
    Ok(())
}

fn handle_report(config: &Config) -> anyhow::Result<()> {
    let mut session = Session::open(config)?;
    session.generate_report()?;
    println!("{}", config.report_path().display());
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Files]");
                println!("  Data directory:     {}", config.data_dir().display());
                println!("  Flights:            {}", config.flights_path().display());
                println!("  Bookings:           {}", config.bookings_path().display());
                println!(
                    "  Cancellations:      {}",
                    config.cancellations_path().display()
                );
                println!("  Report:             {}", config.report_path().display());
                println!();
                println!("[Session]");
                println!("  Timestamp format:   {}", config.session.timestamp_format);
                println!("  Report title:       {}", config.session.report_title);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

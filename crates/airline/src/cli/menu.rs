//! Interactive reservation menu.
//!
//! Each menu choice runs exactly one session operation and prints its
//! outcome. The menu reads from any `BufRead` and writes to any `Write`, so
//! it runs the same against a terminal or in-memory buffers.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Flight, TripRecord};
use crate::session::Session;
use crate::storage::RecordSink;

const MENU: &str = "\n--- Airline Reservation System ---
1. Show Flights
2. Book Ticket
3. Cancel Ticket
4. Generate Report
5. Exit";

/// Write flights as a fixed-width table.
///
/// # Errors
///
/// Returns an error if writing to `output` fails.
pub fn write_flight_table<W: Write>(output: &mut W, flights: &[Flight]) -> io::Result<()> {
    writeln!(
        output,
        "{:<12}{:<12}{:<12}Available Seats",
        "Flight No.", "Origin", "Destination"
    )?;
    writeln!(output, "{}", "-".repeat(60))?;
    for flight in flights {
        writeln!(
            output,
            "{:<12}{:<12}{:<12}{}",
            flight.flight_number, flight.origin, flight.destination, flight.available_seats
        )?;
    }
    Ok(())
}

/// The interactive menu loop.
#[derive(Debug)]
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Create a menu over the given input and output.
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the menu, returning its output.
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    /// Operation failures are printed and the loop continues.
    pub fn run<S: RecordSink>(&mut self, session: &mut Session<S>) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                debug!("Input closed, leaving menu");
                break;
            };

            match choice.as_str() {
                "1" => self.show_flights(session)?,
                "2" => self.book_ticket(session)?,
                "3" => self.cancel_ticket(session)?,
                "4" => self.generate_report(session)?,
                "5" => {
                    writeln!(self.output, "Goodbye!")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid choice. Try again.")?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn show_flights<S: RecordSink>(&mut self, session: &Session<S>) -> Result<()> {
        let catalog = session.catalog();
        if catalog.is_empty() {
            writeln!(self.output, "No flights available")?;
            return Ok(());
        }

        writeln!(self.output, "\nAvailable Flights:")?;
        write_flight_table(&mut self.output, catalog.list())?;
        Ok(())
    }

    fn book_ticket<S: RecordSink>(&mut self, session: &mut Session<S>) -> Result<()> {
        let Some(flight_number) = self.prompt("Enter flight number: ")? else {
            return Ok(());
        };

        match session.book(&flight_number) {
            Ok(booking) => writeln!(
                self.output,
                "Booking successful! Flight {}: {} to {}",
                booking.flight_number, booking.origin, booking.destination
            )?,
            Err(err @ Error::SinkUnavailable { .. }) => writeln!(
                self.output,
                "Booking made, but it could not be saved: {err}"
            )?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(())
    }

    fn cancel_ticket<S: RecordSink>(&mut self, session: &mut Session<S>) -> Result<()> {
        let bookings = session.ledger().list_active();
        if bookings.is_empty() {
            writeln!(self.output, "No bookings to cancel")?;
            return Ok(());
        }

        let format = session.reporter().timestamp_format();
        writeln!(self.output, "\nYour Bookings:")?;
        for (position, booking) in bookings.iter().enumerate() {
            writeln!(
                self.output,
                "{}. Flight {}: {} to {} ({})",
                position + 1,
                booking.flight_number,
                booking.origin,
                booking.destination,
                booking.formatted_timestamp(format)
            )?;
        }

        let Some(answer) = self.prompt("Select booking to cancel (0 to cancel): ")? else {
            return Ok(());
        };
        let Ok(index) = answer.parse::<usize>() else {
            writeln!(self.output, "Invalid selection")?;
            return Ok(());
        };

        match session.cancel(index) {
            Ok(Some(booking)) => writeln!(
                self.output,
                "Cancellation successful! Flight {}: {} to {}",
                booking.flight_number, booking.origin, booking.destination
            )?,
            Ok(None) => writeln!(self.output, "Cancellation aborted")?,
            Err(Error::InvalidSelection { .. }) => writeln!(self.output, "Invalid selection")?,
            Err(err @ Error::SinkUnavailable { .. }) => writeln!(
                self.output,
                "Cancellation made, but it could not be saved: {err}"
            )?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(())
    }

    fn generate_report<S: RecordSink>(&mut self, session: &mut Session<S>) -> Result<()> {
        match session.generate_report() {
            Ok(_) => writeln!(
                self.output,
                "Report generated! Saved to {}",
                session.sink().report_location()
            )?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(())
    }

    /// Print `message` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

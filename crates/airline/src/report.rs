//! Daily report rendering.
//!
//! Rendering is a pure function of its inputs. The caller supplies the
//! generation time so the output is reproducible.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::cancellations::CancellationLog;
use crate::catalog::FlightCatalog;
use crate::ledger::BookingLedger;
use crate::model::TripRecord;
use crate::storage::format::TimestampFormat;

/// Default report heading.
pub const DEFAULT_TITLE: &str = "AIRLINE DAILY REPORT";

/// Placeholder printed for an empty section.
const EMPTY_SECTION: &str = "(none)";

/// Renders report snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGenerator {
    title: String,
    timestamp_format: TimestampFormat,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, TimestampFormat::default())
    }
}

impl ReportGenerator {
    /// Create a generator with a custom title and timestamp format.
    #[must_use]
    pub fn new(title: impl Into<String>, timestamp_format: TimestampFormat) -> Self {
        Self {
            title: title.into(),
            timestamp_format,
        }
    }

    /// The format used for timestamps.
    #[must_use]
    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    /// Render a snapshot of the catalog, active bookings and cancellations.
    #[must_use]
    pub fn render(
        &self,
        catalog: &FlightCatalog,
        ledger: &BookingLedger,
        log: &CancellationLog,
        generated_at: DateTime<Local>,
    ) -> String {
        // Writing to a String never fails
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", "=".repeat(self.title.chars().count()));
        let _ = writeln!(
            out,
            "Generated: {}",
            self.timestamp_format.render(&generated_at)
        );

        out.push_str("\nFLIGHT STATUS:\n");
        if catalog.is_empty() {
            let _ = writeln!(out, "{EMPTY_SECTION}");
        }
        for flight in catalog.list() {
            let _ = writeln!(
                out,
                "{}: {} -> {} | {} seats available",
                flight.flight_number, flight.origin, flight.destination, flight.available_seats
            );
        }

        out.push_str("\nBOOKINGS:\n");
        self.write_trips(&mut out, ledger.list_active());

        out.push_str("\nCANCELLATIONS:\n");
        self.write_trips(&mut out, log.list_all());

        let bookings = ledger.len();
        let cancellations = log.len();
        let net = i128::try_from(bookings).unwrap_or(i128::MAX)
            - i128::try_from(cancellations).unwrap_or(i128::MAX);

        out.push_str("\nSUMMARY:\n");
        let _ = writeln!(out, "Total bookings: {bookings}");
        let _ = writeln!(out, "Total cancellations: {cancellations}");
        let _ = writeln!(out, "Net tickets booked: {net}");

        out
    }

    fn write_trips<R: TripRecord>(&self, out: &mut String, records: &[R]) {
        if records.is_empty() {
            let _ = writeln!(out, "{EMPTY_SECTION}");
        }
        for record in records {
            let _ = writeln!(
                out,
                "{} | {} -> {} | {}",
                record.flight_number(),
                record.origin(),
                record.destination(),
                record.formatted_timestamp(&self.timestamp_format)
            );
        }
    }
}

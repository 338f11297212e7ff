//! In-memory sink, used for tests and dry runs.

use std::io;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::model::{Booking, Cancellation};

use super::format::{encode_trip, TimestampFormat};

/// Sink that keeps encoded lines in memory.
///
/// Can be switched into a failing mode to exercise
/// [`Error::SinkUnavailable`] handling.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    bookings: Vec<String>,
    cancellations: Vec<String>,
    report: Option<String>,
    fail_writes: bool,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink whose writes all fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Turn write failures on or off.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Booking lines written so far.
    #[must_use]
    pub fn booking_lines(&self) -> &[String] {
        &self.bookings
    }

    /// Cancellation lines written so far.
    #[must_use]
    pub fn cancellation_lines(&self) -> &[String] {
        &self.cancellations
    }

    /// The last report written, if any.
    #[must_use]
    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    fn check(&self, sink: &'static str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::SinkUnavailable {
                sink,
                path: PathBuf::from(":memory:"),
                source: io::Error::new(io::ErrorKind::Other, "simulated write failure"),
            });
        }
        Ok(())
    }
}

impl super::RecordSink for MemorySink {
    fn append_booking(&mut self, booking: &Booking) -> Result<()> {
        self.check("bookings")?;
        self.bookings
            .push(encode_trip(booking, &TimestampFormat::default()));
        Ok(())
    }

    fn append_cancellation(&mut self, cancellation: &Cancellation) -> Result<()> {
        self.check("cancellations")?;
        self.cancellations
            .push(encode_trip(cancellation, &TimestampFormat::default()));
        Ok(())
    }

    fn write_report(&mut self, report: &str) -> Result<()> {
        self.check("report")?;
        self.report = Some(report.to_string());
        Ok(())
    }

    fn report_location(&self) -> String {
        ":memory:".to_string()
    }
}

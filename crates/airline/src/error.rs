//! Error types for airline.
//!
//! This module defines all error types used throughout the airline crate.
//! Booking and cancellation failures leave in-memory state untouched; sink
//! failures are reported after the in-memory mutation has already happened.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for airline operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Operation Errors ===
    /// The flight number is not in the catalog.
    #[error("invalid flight number: {flight_number}")]
    UnknownFlight {
        /// The flight number that was looked up.
        flight_number: String,
    },

    /// The flight has no seats left to book.
    #[error("no seats available on flight {flight_number}")]
    NoSeatsAvailable {
        /// The flight that is full.
        flight_number: String,
    },

    /// The booking selection is outside the list of active bookings.
    #[error("invalid selection {index}: expected a number between 1 and {count}")]
    InvalidSelection {
        /// The 1-based index that was requested.
        index: usize,
        /// Number of active bookings at the time of the request.
        count: usize,
    },

    // === Record Errors ===
    /// A flight source line could not be parsed.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the source.
        line: usize,
        /// Description of what was wrong with the line.
        reason: String,
    },

    /// Writing to a persistence sink failed.
    #[error("failed to write {sink} to {path}: {source}")]
    SinkUnavailable {
        /// Which sink failed (bookings, cancellations, report).
        sink: &'static str,
        /// Where the sink lives.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// A timestamp format cannot be used for records and reports.
    #[error("invalid timestamp_format '{format}': {reason}")]
    InvalidTimestampFormat {
        /// The rejected `strftime` pattern.
        format: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for airline operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown flight error.
    #[must_use]
    pub fn unknown_flight(flight_number: impl Into<String>) -> Self {
        Self::UnknownFlight {
            flight_number: flight_number.into(),
        }
    }

    /// Create a no seats available error.
    #[must_use]
    pub fn no_seats(flight_number: impl Into<String>) -> Self {
        Self::NoSeatsAvailable {
            flight_number: flight_number.into(),
        }
    }

    /// Create a malformed record error.
    #[must_use]
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Check if this error was raised by a booking or cancellation request
    /// that changed nothing.
    #[must_use]
    pub fn is_operation_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownFlight { .. } | Self::NoSeatsAvailable { .. } | Self::InvalidSelection { .. }
        )
    }

    /// Check if this error is a persistence write failure.
    #[must_use]
    pub fn is_sink_error(&self) -> bool {
        matches!(self, Self::SinkUnavailable { .. })
    }
}

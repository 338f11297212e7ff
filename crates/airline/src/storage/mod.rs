//! Persistence sinks for airline.
//!
//! Bookings and cancellations are appended one line at a time; the report is
//! overwritten in full. Every write opens the target, writes, and closes it
//! again. Nothing spans more than one record, so a failed write never undoes
//! the in-memory change that preceded it.

pub mod format;
mod memory;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Booking, Cancellation};

use format::TimestampFormat;

pub use memory::MemorySink;

/// Destination for records produced by a session.
pub trait RecordSink {
    /// Append a successful booking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkUnavailable`] if the write fails.
    fn append_booking(&mut self, booking: &Booking) -> Result<()>;

    /// Append a successful cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkUnavailable`] if the write fails.
    fn append_cancellation(&mut self, cancellation: &Cancellation) -> Result<()>;

    /// Replace the stored report with `report`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkUnavailable`] if the write fails.
    fn write_report(&mut self, report: &str) -> Result<()>;

    /// Human-readable location of the report, for status messages.
    fn report_location(&self) -> String;
}

/// Locations of the three writable sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkPaths {
    /// Append-only booking file.
    pub bookings: PathBuf,
    /// Append-only cancellation file.
    pub cancellations: PathBuf,
    /// Report file, overwritten on each report.
    pub report: PathBuf,
}

/// Flat text file sink.
#[derive(Debug, Clone)]
pub struct FileSink {
    paths: SinkPaths,
    timestamp_format: TimestampFormat,
}

impl FileSink {
    /// Create a sink writing to the given paths.
    #[must_use]
    pub fn new(paths: SinkPaths, timestamp_format: TimestampFormat) -> Self {
        Self {
            paths,
            timestamp_format,
        }
    }

    /// Create a sink from resolved configuration paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimestampFormat`] if the configured timestamp
    /// format is unusable.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            SinkPaths {
                bookings: config.bookings_path(),
                cancellations: config.cancellations_path(),
                report: config.report_path(),
            },
            config.timestamp_format()?,
        ))
    }

    /// Get the sink paths.
    #[must_use]
    pub fn paths(&self) -> &SinkPaths {
        &self.paths
    }

    /// The format used for record timestamps.
    #[must_use]
    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    fn append_line(sink: &'static str, path: &Path, line: &str) -> Result<()> {
        let written = ensure_parent(path).and_then(|()| {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{line}")
        });

        written.map_err(|source| {
            error!("Failed to append to {} at {}: {}", sink, path.display(), source);
            Error::SinkUnavailable {
                sink,
                path: path.to_path_buf(),
                source,
            }
        })?;

        debug!("Appended {} record to {}", sink, path.display());
        Ok(())
    }
}

impl RecordSink for FileSink {
    fn append_booking(&mut self, booking: &Booking) -> Result<()> {
        let line = format::encode_trip(booking, &self.timestamp_format);
        Self::append_line("bookings", &self.paths.bookings, &line)
    }

    fn append_cancellation(&mut self, cancellation: &Cancellation) -> Result<()> {
        let line = format::encode_trip(cancellation, &self.timestamp_format);
        Self::append_line("cancellations", &self.paths.cancellations, &line)
    }

    fn write_report(&mut self, report: &str) -> Result<()> {
        let path = &self.paths.report;
        ensure_parent(path)
            .and_then(|()| fs::write(path, report))
            .map_err(|source| {
                error!("Failed to write report to {}: {}", path.display(), source);
                Error::SinkUnavailable {
                    sink: "report",
                    path: path.clone(),
                    source,
                }
            })?;

        info!("Report written to {}", path.display());
        Ok(())
    }

    fn report_location(&self) -> String {
        self.paths.report.display().to_string()
    }
}

/// Create the parent directories of `path` if they don't exist.
fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

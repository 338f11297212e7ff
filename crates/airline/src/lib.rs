//! `airline` - A terminal airline reservation utility
//!
//! This library tracks flight inventory, records seat bookings and
//! cancellations against it, persists them to append-only flat files, and
//! renders a daily report.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cancellations;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod report;
pub mod session;
pub mod storage;

pub use cancellations::CancellationLog;
pub use catalog::FlightCatalog;
pub use config::Config;
pub use error::{Error, Result};
pub use ledger::BookingLedger;
pub use logging::init_logging;
pub use model::{Booking, Cancellation, Flight, TripRecord};
pub use report::ReportGenerator;
pub use session::Session;
pub use storage::format::TimestampFormat;
pub use storage::{FileSink, MemorySink, RecordSink, SinkPaths};

//! The single owner of reservation state for one run.
//!
//! A [`Session`] is built once at startup and every user action goes through
//! it, so nothing in the crate relies on process-wide state.

use chrono::Local;
use tracing::info;

use crate::cancellations::CancellationLog;
use crate::catalog::FlightCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::ledger::BookingLedger;
use crate::model::Booking;
use crate::report::ReportGenerator;
use crate::storage::{FileSink, RecordSink};

/// Catalog, ledger, cancellation log and sink for one run.
#[derive(Debug)]
pub struct Session<S> {
    catalog: FlightCatalog,
    ledger: BookingLedger,
    cancellations: CancellationLog,
    sink: S,
    reporter: ReportGenerator,
}

impl Session<FileSink> {
    /// Load the flight source and open file sinks as configured.
    ///
    /// A missing flight source starts an empty session.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured timestamp format is unusable or the
    /// flight source exists but cannot be read.
    pub fn open(config: &Config) -> Result<Self> {
        let sink = FileSink::from_config(config)?;
        let flights_path = config.flights_path();
        let catalog = FlightCatalog::load_file(&flights_path)?;
        info!(
            "Session opened with {} flights from {}",
            catalog.len(),
            flights_path.display()
        );

        let reporter = ReportGenerator::new(
            config.session.report_title.clone(),
            sink.timestamp_format().clone(),
        );
        Ok(Self::new(catalog, sink, reporter))
    }
}

impl<S: RecordSink> Session<S> {
    /// Create a session from its parts.
    #[must_use]
    pub fn new(catalog: FlightCatalog, sink: S, reporter: ReportGenerator) -> Self {
        Self {
            catalog,
            ledger: BookingLedger::new(),
            cancellations: CancellationLog::new(),
            sink,
            reporter,
        }
    }

    /// Book one seat. See [`BookingLedger::book`].
    ///
    /// # Errors
    ///
    /// Propagates booking and sink errors.
    pub fn book(&mut self, flight_number: &str) -> Result<Booking> {
        self.ledger
            .book(&mut self.catalog, &mut self.sink, flight_number)
    }

    /// Cancel by 1-based selection. See [`BookingLedger::cancel_by_selection`].
    ///
    /// # Errors
    ///
    /// Propagates selection and sink errors.
    pub fn cancel(&mut self, index: usize) -> Result<Option<Booking>> {
        self.ledger.cancel_by_selection(
            index,
            &mut self.catalog,
            &mut self.cancellations,
            &mut self.sink,
        )
    }

    /// Render the report for the current state without writing it.
    #[must_use]
    pub fn render_report(&self) -> String {
        self.reporter.render(
            &self.catalog,
            &self.ledger,
            &self.cancellations,
            Local::now(),
        )
    }

    /// Render the report and overwrite the report sink with it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SinkUnavailable`] if the report could not be written.
    pub fn generate_report(&mut self) -> Result<String> {
        let report = self.render_report();
        self.sink.write_report(&report)?;
        Ok(report)
    }

    /// The flight catalog.
    #[must_use]
    pub fn catalog(&self) -> &FlightCatalog {
        &self.catalog
    }

    /// Active bookings.
    #[must_use]
    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    /// Cancellations made this session.
    #[must_use]
    pub fn cancellations(&self) -> &CancellationLog {
        &self.cancellations
    }

    /// The record sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the record sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The report generator.
    #[must_use]
    pub fn reporter(&self) -> &ReportGenerator {
        &self.reporter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::MemorySink;

    fn session(source: &str) -> Session<MemorySink> {
        Session::new(
            FlightCatalog::load(source.as_bytes()).unwrap(),
            MemorySink::new(),
            ReportGenerator::default(),
        )
    }

    fn seats(session: &Session<MemorySink>, flight_number: &str) -> u32 {
        session.catalog().get(flight_number).unwrap().available_seats
    }

    #[test]
    fn test_full_booking_scenario() {
        let mut session = session("AA100,NYC,LAX,2\n");

        session.book("AA100").unwrap();
        session.book("AA100").unwrap();
        assert_eq!(seats(&session, "AA100"), 0);
        assert_eq!(session.ledger().len(), 2);

        let err = session.book("AA100").unwrap_err();
        assert!(matches!(err, Error::NoSeatsAvailable { .. }));
        assert_eq!(seats(&session, "AA100"), 0);
        assert_eq!(session.ledger().len(), 2);

        session.cancel(1).unwrap();
        assert_eq!(seats(&session, "AA100"), 1);
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.cancellations().len(), 1);

        let report = session.generate_report().unwrap();
        assert!(report.contains("AA100: NYC -> LAX | 1 seats available"));
        assert_eq!(report.matches("AA100 | NYC -> LAX | ").count(), 2);
        assert!(report.contains("Net tickets booked: 0"));
        assert_eq!(session.sink().report(), Some(report.as_str()));
    }

    #[test]
    fn test_generate_report_sink_failure() {
        let mut session = session("AA100,NYC,LAX,2\n");
        session.sink_mut().set_fail_writes(true);

        let err = session.generate_report().unwrap_err();
        assert!(err.is_sink_error());
    }

    #[test]
    fn test_open_with_missing_flights_file() {
        let root = std::env::temp_dir().join(format!("airline_session_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        let mut config = Config::default();
        config.files.data_dir = Some(root.clone());

        let session = Session::open(&config).unwrap();
        assert!(session.catalog().is_empty());
        assert_eq!(session.sink().paths().bookings, root.join("bookings.txt"));
    }

    #[test]
    fn test_open_loads_flights() {
        let root =
            std::env::temp_dir().join(format!("airline_session_load_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("flights.txt"), "AA100,NYC,LAX,2\nBA7,LHR,JFK,5\n").unwrap();
        let mut config = Config::default();
        config.files.data_dir = Some(root.clone());
        config.session.report_title = "OPS".to_string();

        let mut session = Session::open(&config).unwrap();
        assert_eq!(session.catalog().len(), 2);

        session.book("BA7").unwrap();
        let bookings = std::fs::read_to_string(root.join("bookings.txt")).unwrap();
        assert!(bookings.starts_with("BA7,LHR,JFK,"));
        assert!(session.render_report().starts_with("OPS\n"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_open_rejects_unusable_timestamp_format() {
        let root =
            std::env::temp_dir().join(format!("airline_session_format_{}", std::process::id()));
        let mut config = Config::default();
        config.files.data_dir = Some(root.clone());
        config.session.timestamp_format = "%Q".to_string();

        let err = Session::open(&config).unwrap_err();
        assert!(matches!(err, Error::InvalidTimestampFormat { .. }));
        assert!(!root.join("bookings.txt").exists());
    }
}

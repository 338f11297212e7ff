//! Active bookings and the seat bookkeeping tied to them.
//!
//! The ledger is the only place seat counts change. Every booking takes one
//! seat from the catalog and every cancellation gives one back. Requests that
//! fail validation change nothing. A sink failure is reported after the
//! in-memory change has already been applied and is not rolled back.

use chrono::Local;
use tracing::{debug, error};

use crate::cancellations::CancellationLog;
use crate::catalog::FlightCatalog;
use crate::error::{Error, Result};
use crate::model::{Booking, Cancellation};
use crate::storage::RecordSink;

/// Currently active bookings, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
}

impl BookingLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Book one seat on `flight_number`.
    ///
    /// On success the flight loses a seat, the booking is appended to the
    /// ledger and written to `sink`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownFlight`] if the catalog has no such flight.
    /// - [`Error::NoSeatsAvailable`] if the flight is full.
    /// - [`Error::SinkUnavailable`] if the booking could not be persisted. The
    ///   booking stays in the ledger and the seat stays taken.
    pub fn book<S: RecordSink + ?Sized>(
        &mut self,
        catalog: &mut FlightCatalog,
        sink: &mut S,
        flight_number: &str,
    ) -> Result<Booking> {
        let flight = catalog.decrement_seats(flight_number)?;
        let booking = Booking::snapshot(flight, Local::now());
        self.bookings.push(booking.clone());
        debug!(
            "Booked {} ({} -> {}), {} active bookings",
            booking.flight_number,
            booking.origin,
            booking.destination,
            self.bookings.len()
        );

        if let Err(err) = sink.append_booking(&booking) {
            error!("Booking for {} kept in memory only", booking.flight_number);
            return Err(err);
        }
        Ok(booking)
    }

    /// Cancel the booking at 1-based position `index` in [`list_active`].
    ///
    /// `index == 0` means the user backed out; nothing changes and
    /// `Ok(None)` is returned. Otherwise the booking is removed, its seat is
    /// returned to the flight, and a cancellation is appended to `log` and
    /// written to `sink`.
    ///
    /// [`list_active`]: Self::list_active
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSelection`] if `index` is greater than the number of
    ///   active bookings.
    /// - [`Error::SinkUnavailable`] if the cancellation could not be
    ///   persisted. The cancellation is still applied in memory.
    pub fn cancel_by_selection<S: RecordSink + ?Sized>(
        &mut self,
        index: usize,
        catalog: &mut FlightCatalog,
        log: &mut CancellationLog,
        sink: &mut S,
    ) -> Result<Option<Booking>> {
        if index == 0 {
            debug!("Cancellation aborted by user");
            return Ok(None);
        }
        if index > self.bookings.len() {
            return Err(Error::InvalidSelection {
                index,
                count: self.bookings.len(),
            });
        }

        // Flights are never removed, so this only fails if the catalog was
        // swapped out from under the ledger. Check before touching the ledger.
        catalog.increment_seats(&self.bookings[index - 1].flight_number)?;
        let booking = self.bookings.remove(index - 1);

        let cancellation = Cancellation::from_booking(&booking, Local::now());
        log.record(cancellation.clone());
        debug!(
            "Cancelled {} ({} -> {}), {} active bookings",
            booking.flight_number,
            booking.origin,
            booking.destination,
            self.bookings.len()
        );

        if let Err(err) = sink.append_cancellation(&cancellation) {
            error!(
                "Cancellation for {} kept in memory only",
                cancellation.flight_number
            );
            return Err(err);
        }
        Ok(Some(booking))
    }

    /// Active bookings in creation order.
    #[must_use]
    pub fn list_active(&self) -> &[Booking] {
        &self.bookings
    }

    /// Number of active bookings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// Whether there are no active bookings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySink;

    struct Fixture {
        catalog: FlightCatalog,
        ledger: BookingLedger,
        log: CancellationLog,
        sink: MemorySink,
    }

    impl Fixture {
        fn new(source: &str) -> Self {
            Self {
                catalog: FlightCatalog::load(source.as_bytes()).unwrap(),
                ledger: BookingLedger::new(),
                log: CancellationLog::new(),
                sink: MemorySink::new(),
            }
        }

        fn book(&mut self, flight_number: &str) -> Result<Booking> {
            self.ledger
                .book(&mut self.catalog, &mut self.sink, flight_number)
        }

        fn cancel(&mut self, index: usize) -> Result<Option<Booking>> {
            self.ledger.cancel_by_selection(
                index,
                &mut self.catalog,
                &mut self.log,
                &mut self.sink,
            )
        }

        fn seats(&self, flight_number: &str) -> u32 {
            self.catalog.get(flight_number).unwrap().available_seats
        }
    }

    #[test]
    fn test_book_takes_one_seat() {
        let mut fx = Fixture::new("AA100,NYC,LAX,3\nBA7,LHR,JFK,1");

        let booking = fx.book("AA100").unwrap();
        assert_eq!(booking.flight_number, "AA100");
        assert_eq!(booking.origin, "NYC");
        assert_eq!(booking.destination, "LAX");

        assert_eq!(fx.seats("AA100"), 2);
        assert_eq!(fx.seats("BA7"), 1);
        assert_eq!(fx.ledger.list_active(), [booking]);
        assert_eq!(fx.sink.booking_lines().len(), 1);
    }

    #[test]
    fn test_book_full_flight_changes_nothing() {
        let mut fx = Fixture::new("AA100,NYC,LAX,0");

        let err = fx.book("AA100").unwrap_err();
        assert!(matches!(err, Error::NoSeatsAvailable { .. }));
        assert_eq!(fx.seats("AA100"), 0);
        assert!(fx.ledger.is_empty());
        assert!(fx.sink.booking_lines().is_empty());
    }

    #[test]
    fn test_book_unknown_flight_changes_nothing() {
        let mut fx = Fixture::new("AA100,NYC,LAX,2");

        let err = fx.book("ZZ999").unwrap_err();
        assert!(matches!(err, Error::UnknownFlight { .. }));
        assert_eq!(fx.seats("AA100"), 2);
        assert!(fx.ledger.is_empty());
        assert!(fx.sink.booking_lines().is_empty());
    }

    #[test]
    fn test_book_sink_failure_keeps_mutation() {
        let mut fx = Fixture::new("AA100,NYC,LAX,2");
        fx.sink.set_fail_writes(true);

        let err = fx.book("AA100").unwrap_err();
        assert!(err.is_sink_error());
        assert_eq!(fx.seats("AA100"), 1);
        assert_eq!(fx.ledger.len(), 1);
    }

    #[test]
    fn test_cancel_returns_seat_and_logs() {
        let mut fx = Fixture::new("AA100,NYC,LAX,2\nBA7,LHR,JFK,4");
        fx.book("AA100").unwrap();
        fx.book("BA7").unwrap();

        let cancelled = fx.cancel(2).unwrap().unwrap();
        assert_eq!(cancelled.flight_number, "BA7");
        assert_eq!(fx.seats("BA7"), 4);
        assert_eq!(fx.seats("AA100"), 1);
        assert_eq!(fx.ledger.len(), 1);
        assert_eq!(fx.ledger.list_active()[0].flight_number, "AA100");

        assert_eq!(fx.log.len(), 1);
        let logged = &fx.log.list_all()[0];
        assert_eq!(logged.flight_number, "BA7");
        assert_eq!(logged.origin, "LHR");
        assert_eq!(logged.destination, "JFK");
        assert_eq!(fx.sink.cancellation_lines().len(), 1);
    }

    #[test]
    fn test_cancel_zero_is_abort() {
        let mut fx = Fixture::new("AA100,NYC,LAX,2");
        fx.book("AA100").unwrap();

        assert_eq!(fx.cancel(0).unwrap(), None);
        assert_eq!(fx.ledger.len(), 1);
        assert_eq!(fx.seats("AA100"), 1);
        assert!(fx.log.is_empty());
    }

    #[test]
    fn test_cancel_out_of_range() {
        let mut fx = Fixture::new("AA100,NYC,LAX,2");
        fx.book("AA100").unwrap();

        let err = fx.cancel(2).unwrap_err();
        assert!(matches!(err, Error::InvalidSelection { index: 2, count: 1 }));
        assert_eq!(fx.ledger.len(), 1);
        assert_eq!(fx.seats("AA100"), 1);
        assert!(fx.log.is_empty());
        assert!(fx.sink.cancellation_lines().is_empty());
    }

    #[test]
    fn test_cancel_with_no_bookings() {
        let mut fx = Fixture::new("AA100,NYC,LAX,2");
        assert!(matches!(
            fx.cancel(1),
            Err(Error::InvalidSelection { index: 1, count: 0 })
        ));
    }

    #[test]
    fn test_cancel_then_rebook_round_trip() {
        let mut fx = Fixture::new("AA100,NYC,LAX,5");

        fx.book("AA100").unwrap();
        fx.cancel(1).unwrap();
        fx.book("AA100").unwrap();
        fx.cancel(1).unwrap();

        assert_eq!(fx.seats("AA100"), 5);
        assert_eq!(fx.sink.booking_lines().len(), 2);
        assert_eq!(fx.sink.cancellation_lines().len(), 2);
        assert_eq!(fx.log.len(), 2);
        assert!(fx.ledger.is_empty());
    }

    #[test]
    fn test_rebook_after_cancel_restores_pre_booking_count() {
        let mut fx = Fixture::new("AA100,NYC,LAX,5");

        fx.book("AA100").unwrap();
        fx.cancel(1).unwrap();
        assert_eq!(fx.seats("AA100"), 5);
        fx.book("AA100").unwrap();

        assert_eq!(fx.seats("AA100"), 4);
        assert_eq!(fx.sink.booking_lines().len(), 2);
        assert_eq!(fx.log.len(), 1);
    }

    #[test]
    fn test_cancel_sink_failure_keeps_mutation() {
        let mut fx = Fixture::new("AA100,NYC,LAX,1");
        fx.book("AA100").unwrap();
        fx.sink.set_fail_writes(true);

        let err = fx.cancel(1).unwrap_err();
        assert!(err.is_sink_error());
        assert!(fx.ledger.is_empty());
        assert_eq!(fx.seats("AA100"), 1);
        assert_eq!(fx.log.len(), 1);
    }

    #[test]
    fn test_seats_never_negative_under_repeated_booking() {
        let mut fx = Fixture::new("AA100,NYC,LAX,2");
        for _ in 0..5 {
            let _ = fx.book("AA100");
        }
        assert_eq!(fx.seats("AA100"), 0);
        assert_eq!(fx.ledger.len(), 2);
    }
}

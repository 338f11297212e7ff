//! Append-only log of cancelled bookings.

use crate::model::Cancellation;

/// Cancellations in the order they happened.
///
/// Only the booking ledger's cancellation path appends to the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancellationLog {
    entries: Vec<Cancellation>,
}

impl CancellationLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, cancellation: Cancellation) {
        self.entries.push(cancellation);
    }

    /// All cancellations in append order.
    #[must_use]
    pub fn list_all(&self) -> &[Cancellation] {
        &self.entries
    }

    /// Number of cancellations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cancelled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Booking, Flight};
    use chrono::Local;

    #[test]
    fn test_record_keeps_order_and_duplicates() {
        let booking = Booking::snapshot(&Flight::new("AA100", "NYC", "LAX", 1), Local::now());
        let other = Booking::snapshot(&Flight::new("BA7", "LHR", "JFK", 1), Local::now());
        let mut log = CancellationLog::new();
        assert!(log.is_empty());

        let first = Cancellation::from_booking(&booking, Local::now());
        log.record(first.clone());
        log.record(Cancellation::from_booking(&other, Local::now()));
        log.record(first);

        assert_eq!(log.len(), 3);
        let numbers: Vec<&str> = log
            .list_all()
            .iter()
            .map(|c| c.flight_number.as_str())
            .collect();
        assert_eq!(numbers, ["AA100", "BA7", "AA100"]);
    }
}

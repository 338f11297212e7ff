//! Core record types for airline.
//!
//! Bookings and cancellations copy their route from the flight when they are
//! created, so later changes to the catalog never show up in them.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::storage::format::TimestampFormat;

/// A flight in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Unique flight number, e.g. `AA100`.
    pub flight_number: String,
    /// Departure city or airport.
    pub origin: String,
    /// Arrival city or airport.
    pub destination: String,
    /// Seats that can still be booked.
    pub available_seats: u32,
}

impl Flight {
    /// Create a new flight.
    #[must_use]
    pub fn new(
        flight_number: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        available_seats: u32,
    ) -> Self {
        Self {
            flight_number: flight_number.into(),
            origin: origin.into(),
            destination: destination.into(),
            available_seats,
        }
    }

    /// Whether at least one seat can be booked.
    #[must_use]
    pub fn has_seats(&self) -> bool {
        self.available_seats > 0
    }
}

/// An active seat booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Flight the seat was booked on.
    pub flight_number: String,
    /// Origin at booking time.
    pub origin: String,
    /// Destination at booking time.
    pub destination: String,
    /// When the booking was made.
    pub created_at: DateTime<Local>,
}

impl Booking {
    /// Snapshot a flight's route into a new booking.
    #[must_use]
    pub fn snapshot(flight: &Flight, created_at: DateTime<Local>) -> Self {
        Self {
            flight_number: flight.flight_number.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            created_at,
        }
    }
}

/// A cancelled booking. Never modified once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    /// Flight the cancelled seat was on.
    pub flight_number: String,
    /// Origin copied from the booking.
    pub origin: String,
    /// Destination copied from the booking.
    pub destination: String,
    /// When the booking was cancelled.
    pub cancelled_at: DateTime<Local>,
}

impl Cancellation {
    /// Project a booking into its cancellation record.
    #[must_use]
    pub fn from_booking(booking: &Booking, cancelled_at: DateTime<Local>) -> Self {
        Self {
            flight_number: booking.flight_number.clone(),
            origin: booking.origin.clone(),
            destination: booking.destination.clone(),
            cancelled_at,
        }
    }
}

/// Shared view of bookings and cancellations.
///
/// Both are written to their sinks and reports in the same
/// `flight,origin,destination,timestamp` shape.
pub trait TripRecord {
    /// The flight number.
    fn flight_number(&self) -> &str;
    /// The origin snapshot.
    fn origin(&self) -> &str;
    /// The destination snapshot.
    fn destination(&self) -> &str;
    /// When the record was created.
    fn timestamp(&self) -> DateTime<Local>;

    /// Format the record timestamp.
    fn formatted_timestamp(&self, format: &TimestampFormat) -> String {
        format.render(&self.timestamp())
    }
}

impl TripRecord for Booking {
    fn flight_number(&self) -> &str {
        &self.flight_number
    }

    fn origin(&self) -> &str {
        &self.origin
    }

    fn destination(&self) -> &str {
        &self.destination
    }

    fn timestamp(&self) -> DateTime<Local> {
        self.created_at
    }
}

impl TripRecord for Cancellation {
    fn flight_number(&self) -> &str {
        &self.flight_number
    }

    fn origin(&self) -> &str {
        &self.origin
    }

    fn destination(&self) -> &str {
        &self.destination
    }

    fn timestamp(&self) -> DateTime<Local> {
        self.cancelled_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_flight_has_seats() {
        assert!(Flight::new("AA100", "NYC", "LAX", 1).has_seats());
        assert!(!Flight::new("AA100", "NYC", "LAX", 0).has_seats());
    }

    #[test]
    fn test_booking_snapshot_is_detached() {
        let mut flight = Flight::new("AA100", "NYC", "LAX", 3);
        let booking = Booking::snapshot(&flight, fixed_time());

        flight.destination = "SFO".to_string();
        assert_eq!(booking.destination, "LAX");
        assert_eq!(booking.origin, "NYC");
        assert_eq!(booking.flight_number, "AA100");
    }

    #[test]
    fn test_cancellation_from_booking() {
        let flight = Flight::new("BA7", "LHR", "JFK", 3);
        let booking = Booking::snapshot(&flight, fixed_time());
        let cancellation = Cancellation::from_booking(&booking, fixed_time());

        assert_eq!(cancellation.flight_number, booking.flight_number);
        assert_eq!(cancellation.origin, booking.origin);
        assert_eq!(cancellation.destination, booking.destination);
    }

    #[test]
    fn test_trip_record_formatted_timestamp() {
        let booking = Booking::snapshot(&Flight::new("AA100", "NYC", "LAX", 1), fixed_time());
        assert_eq!(
            booking.formatted_timestamp(&TimestampFormat::default()),
            "2024-03-09 14:05:00"
        );
    }

    #[test]
    fn test_flight_serialization() {
        let flight = Flight::new("AA100", "NYC", "LAX", 2);
        let json = serde_json::to_string(&flight).unwrap();
        assert!(json.contains("\"flight_number\":\"AA100\""));
        assert!(json.contains("\"available_seats\":2"));
    }
}

//! Flight catalog.
//!
//! Holds every known flight in load order. The catalog is small, so lookups
//! are linear scans.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::Flight;
use crate::storage::format::parse_flight_line;

/// The set of known flights and their current seat availability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightCatalog {
    flights: Vec<Flight>,
}

impl FlightCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load flights from `flightNumber,origin,destination,seats` lines.
    ///
    /// Blank lines are ignored. Malformed lines, including lines that are not
    /// valid UTF-8, are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading from `source` fails.
    pub fn load<R: BufRead>(source: R) -> Result<Self> {
        let mut catalog = Self::new();
        let mut skipped = 0usize;

        for (index, raw) in source.split(b'\n').enumerate() {
            let line_number = index + 1;
            let Ok(line) = String::from_utf8(raw?) else {
                warn!(
                    "Skipping flight record: {}",
                    Error::malformed(line_number, "line is not valid UTF-8")
                );
                skipped += 1;
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }

            match parse_flight_line(&line, line_number) {
                Ok(flight) => catalog.upsert(flight),
                Err(err) => {
                    warn!("Skipping flight record: {}", err);
                    skipped += 1;
                }
            }
        }

        info!(
            "Loaded {} flights ({} malformed lines skipped)",
            catalog.len(),
            skipped
        );
        Ok(catalog)
    }

    /// Load flights from a file.
    ///
    /// A missing file yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => {
                debug!("Loading flights from {}", path.display());
                Self::load(BufReader::new(file))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "No flights file found at {}. Starting with empty data.",
                    path.display()
                );
                Ok(Self::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Look up a flight by number.
    #[must_use]
    pub fn get(&self, flight_number: &str) -> Option<&Flight> {
        self.flights
            .iter()
            .find(|flight| flight.flight_number == flight_number)
    }

    /// Whether the catalog knows this flight number.
    #[must_use]
    pub fn contains(&self, flight_number: &str) -> bool {
        self.get(flight_number).is_some()
    }

    /// All flights in load order.
    #[must_use]
    pub fn list(&self) -> &[Flight] {
        &self.flights
    }

    /// Number of flights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Whether the catalog has no flights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Take one seat from a flight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFlight`] if the flight does not exist and
    /// [`Error::NoSeatsAvailable`] if it has no seats left. The catalog is
    /// unchanged on error.
    pub(crate) fn decrement_seats(&mut self, flight_number: &str) -> Result<&Flight> {
        let flight = self.get_mut(flight_number)?;
        if !flight.has_seats() {
            return Err(Error::no_seats(flight_number));
        }
        flight.available_seats -= 1;
        debug!(
            "Flight {} now has {} seats available",
            flight_number, flight.available_seats
        );
        Ok(flight)
    }

    /// Return one seat to a flight. There is no capacity ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFlight`] if the flight does not exist.
    pub(crate) fn increment_seats(&mut self, flight_number: &str) -> Result<&Flight> {
        let flight = self.get_mut(flight_number)?;
        flight.available_seats = flight.available_seats.saturating_add(1);
        debug!(
            "Flight {} now has {} seats available",
            flight_number, flight.available_seats
        );
        Ok(flight)
    }

    fn get_mut(&mut self, flight_number: &str) -> Result<&mut Flight> {
        self.flights
            .iter_mut()
            .find(|flight| flight.flight_number == flight_number)
            .ok_or_else(|| Error::unknown_flight(flight_number))
    }

    fn upsert(&mut self, flight: Flight) {
        match self
            .flights
            .iter()
            .position(|existing| existing.flight_number == flight.flight_number)
        {
            Some(index) => {
                warn!(
                    "Duplicate flight {}; later record replaces the earlier one",
                    flight.flight_number
                );
                self.flights[index] = flight;
            }
            None => self.flights.push(flight),
        }
    }
}

//! Flat-file line format.
//!
//! Flight source lines are `flight,origin,destination,seats`. Booking and
//! cancellation lines are `flight,origin,destination,timestamp`. Fields are
//! written verbatim; they never contain separators because they come from
//! parsed flight lines or a checked [`TimestampFormat`].

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::config::DEFAULT_TIMESTAMP_FORMAT;
use crate::error::{Error, Result};
use crate::model::{Flight, TripRecord};

/// Separator between fields on a line.
pub const FIELD_SEPARATOR: char = ',';

/// Number of fields on every record line.
pub const FIELD_COUNT: usize = 4;

/// A `strftime` pattern that renders any local time without error and never
/// emits a field separator or line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat(String);

impl TimestampFormat {
    /// Check a `strftime` pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimestampFormat`] if the pattern is empty, has
    /// an unknown specifier, or would split a record line.
    pub fn parse(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let reject = |reason| {
            Err(Error::InvalidTimestampFormat {
                format: pattern.clone(),
                reason,
            })
        };

        if pattern.is_empty() {
            return reject("pattern is empty");
        }

        let breaks_line = |text: &str| text.contains([FIELD_SEPARATOR, '\n', '\r']);
        for item in StrftimeItems::new(&pattern) {
            match item {
                Item::Error => return reject("unrecognized specifier"),
                Item::Literal(text) | Item::Space(text) if breaks_line(text) => {
                    return reject("output would contain a field separator or line break");
                }
                _ => {}
            }
        }

        Ok(Self(pattern))
    }

    /// The pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render `at` with this pattern.
    #[must_use]
    pub fn render(&self, at: &DateTime<Local>) -> String {
        at.format(&self.0).to_string()
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self(DEFAULT_TIMESTAMP_FORMAT.to_string())
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse one flight source line.
///
/// `line_number` is 1-based and only used for error reporting. Surrounding
/// whitespace is trimmed from every field.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] if the line does not have exactly four
/// fields, the flight number is empty, or the seat count is not a
/// non-negative integer.
pub fn parse_flight_line(line: &str, line_number: usize) -> Result<Flight> {
    let fields: Vec<&str> = line.trim().split(FIELD_SEPARATOR).map(str::trim).collect();

    let &[flight_number, origin, destination, seats] = fields.as_slice() else {
        return Err(Error::malformed(
            line_number,
            format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        ));
    };

    if flight_number.is_empty() {
        return Err(Error::malformed(line_number, "empty flight number"));
    }

    let available_seats: u32 = seats.parse().map_err(|_| {
        Error::malformed(line_number, format!("invalid seat count '{seats}'"))
    })?;

    Ok(Flight::new(flight_number, origin, destination, available_seats))
}

/// Encode a booking or cancellation as a sink line, without the trailing
/// newline.
#[must_use]
pub fn encode_trip<R: TripRecord>(record: &R, timestamp_format: &TimestampFormat) -> String {
    format!(
        "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
        record.flight_number(),
        record.origin(),
        record.destination(),
        record.formatted_timestamp(timestamp_format),
    )
}

//! Error types for parsing persisted values and building calendar state.
use thiserror::Error;

use crate::date::CalendarDate;

/// Errors produced while decoding ISO dates and date ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsoFormatError {
    /// The value did not have the number of `/`-separated segments the mode expects.
    #[error("expected {expected} date segment(s) in {input:?}, found {found}")]
    SegmentCount {
        /// The rejected input.
        input: String,
        /// Segments required by the selection mode.
        expected: usize,
        /// Segments present in the input.
        found: usize,
    },
    /// A segment is not of the form `YYYY-MM-DD`.
    #[error("malformed ISO date {0:?}, expected YYYY-MM-DD")]
    Malformed(String),
    /// The segment is well formed but names a day that does not exist.
    #[error("{0:?} is not a calendar date")]
    NonexistentDate(String),
}

/// Errors produced while building a calendar from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// A configured ISO value could not be decoded.
    #[error("invalid {field}: {source}")]
    Format {
        /// Name of the configuration field.
        field: &'static str,
        /// Underlying decode error.
        #[source]
        source: IsoFormatError,
    },
    /// The minimum date is after the maximum date.
    #[error("min date {min} is after max date {max}")]
    InvertedBounds {
        /// Configured lower bound.
        min: CalendarDate,
        /// Configured upper bound.
        max: CalendarDate,
    },
}

/// Error returned when a weekday name or index cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown weekday {0:?}, expected a name like \"monday\" or an index 0-6 starting at Sunday")]
pub struct ParseWeekdayError(pub String);

/// Error returned when a selection mode name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown calendar mode {0:?}, expected single, range, week or month")]
pub struct ParseModeError(pub String);

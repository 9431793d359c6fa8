//! ISO 8601 text form of dates and selections.
//!
//! A single date is written `YYYY-MM-DD`; a range is written
//! `YYYY-MM-DD/YYYY-MM-DD` with the earlier date first. Since the fields are
//! zero padded, lexical order of encoded dates matches chronological order.
use std::{fmt, str::FromStr};

use crate::{
    date::CalendarDate,
    error::IsoFormatError,
    selection::{CalendarMode, DateRange, SelectionValue},
};

const RANGE_SEPARATOR: char = '/';

/// Encodes a selection as an ISO date or date range string.
pub fn encode(value: &SelectionValue) -> String {
    value.to_string()
}

/// Decodes a persisted value for a calendar in `mode`.
///
/// Single mode expects one date. Range, week and month modes expect a
/// `start/end` pair, which is normalized so that `start <= end`.
pub fn decode(input: &str, mode: CalendarMode) -> Result<SelectionValue, IsoFormatError> {
    let expected = if mode.stores_range() { 2 } else { 1 };
    let segments: Vec<&str> = input.trim().split(RANGE_SEPARATOR).collect();
    if segments.len() != expected {
        return Err(IsoFormatError::SegmentCount {
            input: input.to_string(),
            expected,
            found: segments.len(),
        });
    }
    parse_segments(&segments)
}

fn parse_segments(segments: &[&str]) -> Result<SelectionValue, IsoFormatError> {
    match segments {
        [single] => Ok(SelectionValue::Single(single.parse()?)),
        [start, end] => Ok(SelectionValue::range(start.parse()?, end.parse()?)),
        other => Err(IsoFormatError::SegmentCount {
            input: other.join("/"),
            expected: 2,
            found: other.len(),
        }),
    }
}

fn parse_digits(text: &str, width: usize) -> Option<u32> {
    if text.len() != width || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = IsoFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let malformed = || IsoFormatError::Malformed(text.to_string());
        let mut parts = text.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let year = parse_digits(year, 4).ok_or_else(malformed)?;
        let month = parse_digits(month, 2).ok_or_else(malformed)?;
        let day = parse_digits(day, 2).ok_or_else(malformed)?;
        CalendarDate::new(year as i32, month as u8, day as u8)
            .ok_or_else(|| IsoFormatError::NonexistentDate(text.to_string()))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RANGE_SEPARATOR}{}", self.start(), self.end())
    }
}

impl fmt::Display for SelectionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionValue::Single(date) => fmt::Display::fmt(date, f),
            SelectionValue::Range(range) => fmt::Display::fmt(range, f),
        }
    }
}

impl FromStr for SelectionValue {
    type Err = IsoFormatError;

    /// Parses either form; the segment count picks the variant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.trim().split(RANGE_SEPARATOR).collect();
        if segments.len() > 2 {
            return Err(IsoFormatError::SegmentCount {
                input: s.to_string(),
                expected: 2,
                found: segments.len(),
            });
        }
        parse_segments(&segments)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

    use super::*;

    impl Serialize for CalendarDate {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for CalendarDate {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(D::Error::custom)
        }
    }

    impl Serialize for SelectionValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for SelectionValue {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn encodes_zero_padded() {
        assert_eq!(encode(&SelectionValue::Single(date(2024, 3, 4))), "2024-03-04");
        assert_eq!(
            encode(&SelectionValue::range(date(2024, 3, 9), date(2024, 3, 3))),
            "2024-03-03/2024-03-09"
        );
        assert_eq!(date(987, 1, 2).to_string(), "0987-01-02");
    }

    #[test]
    fn decode_inverts_encode() {
        let values = [
            SelectionValue::Single(date(2024, 2, 29)),
            SelectionValue::Single(date(1999, 12, 31)),
            SelectionValue::range(date(2024, 1, 1), date(2024, 1, 1)),
            SelectionValue::range(date(2023, 12, 30), date(2024, 1, 2)),
            SelectionValue::Single(CalendarDate::MIN),
            SelectionValue::range(CalendarDate::MIN, CalendarDate::MAX),
        ];
        for value in values {
            let mode = if value.as_range().is_some() {
                CalendarMode::Range
            } else {
                CalendarMode::Single
            };
            assert_eq!(decode(&encode(&value), mode).unwrap(), value);
        }
    }

    #[test]
    fn decode_normalizes_reversed_range() {
        let value = decode("2024-03-09/2024-03-03", CalendarMode::Week).unwrap();
        assert_eq!(value, SelectionValue::range(date(2024, 3, 3), date(2024, 3, 9)));
        assert_eq!(encode(&value), "2024-03-03/2024-03-09");
    }

    #[test]
    fn decode_checks_segment_count_against_mode() {
        assert_eq!(
            decode("2024-03-03", CalendarMode::Range),
            Err(IsoFormatError::SegmentCount {
                input: "2024-03-03".to_string(),
                expected: 2,
                found: 1,
            })
        );
        assert!(matches!(
            decode("2024-03-03/2024-03-04", CalendarMode::Single),
            Err(IsoFormatError::SegmentCount { found: 2, .. })
        ));
        assert!(matches!(
            decode("a/b/c", CalendarMode::Month),
            Err(IsoFormatError::SegmentCount { found: 3, .. })
        ));
    }

    #[test]
    fn decode_rejects_malformed_dates() {
        for input in [
            "",
            "2024-3-04",
            "24-03-04",
            "2024-03-04T00:00",
            "2024/03",
            "2024-03-0x",
            "10000-01-01",
            "-001-01-01",
        ] {
            assert!(decode(input, CalendarMode::Single).is_err(), "{input:?}");
        }
        assert_eq!(
            decode("2023-02-29", CalendarMode::Single),
            Err(IsoFormatError::NonexistentDate("2023-02-29".to_string()))
        );
        assert_eq!(
            "2024-13-01".parse::<CalendarDate>(),
            Err(IsoFormatError::NonexistentDate("2024-13-01".to_string()))
        );
    }

    #[test]
    fn decode_trims_whitespace() {
        assert_eq!(
            decode(" 2024-03-04 ", CalendarMode::Single).unwrap(),
            SelectionValue::Single(date(2024, 3, 4))
        );
    }

    #[test]
    fn selection_value_parses_either_form() {
        assert_eq!(
            "2024-03-04".parse::<SelectionValue>().unwrap(),
            SelectionValue::Single(date(2024, 3, 4))
        );
        assert_eq!(
            "2024-03-04/2024-03-01".parse::<SelectionValue>().unwrap(),
            SelectionValue::range(date(2024, 3, 1), date(2024, 3, 4))
        );
        assert!("2024-03-04/2024-03-01/2024-03-02".parse::<SelectionValue>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_iso_strings() {
        let value = SelectionValue::range(date(2024, 3, 3), date(2024, 3, 9));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"2024-03-03/2024-03-09\"");
        let back: SelectionValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
        assert!(serde_json::from_str::<CalendarDate>("\"2024-02-30\"").is_err());
    }
}

//! Configuration for building a [`CalendarState`](crate::CalendarState).
use derive_setters::Setters;

use crate::{
    date::{CalendarDate, Weekday},
    error::CalendarError,
    iso,
    selection::{CalendarMode, DateBounds, SelectionValue},
};

/// Configuration options for a calendar.
///
/// Dates are given in their persisted ISO form. An empty `value` means
/// "today", and empty bounds mean "unbounded".
///
/// ```
/// use calendar_grid::{CalendarArgs, CalendarMode, Weekday};
///
/// let args = CalendarArgs::default()
///     .mode(CalendarMode::Range)
///     .value("2024-03-01/2024-03-05")
///     .min_date("2024-01-01")
///     .first_day_of_week(Weekday::Monday);
/// assert_eq!(args.number_of_months, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CalendarArgs {
    /// Selection mode.
    pub mode: CalendarMode,
    /// Persisted value, `YYYY-MM-DD` or `YYYY-MM-DD/YYYY-MM-DD`.
    #[setters(into)]
    pub value: String,
    /// Earliest selectable date.
    #[setters(strip_option, into)]
    pub min_date: Option<String>,
    /// Latest selectable date.
    #[setters(strip_option, into)]
    pub max_date: Option<String>,
    /// First column of the grid.
    pub first_day_of_week: Weekday,
    /// Number of consecutive months rendered side by side.
    pub number_of_months: usize,
}

impl Default for CalendarArgs {
    fn default() -> Self {
        Self {
            mode: CalendarMode::Single,
            value: String::new(),
            min_date: None,
            max_date: None,
            first_day_of_week: Weekday::Sunday,
            number_of_months: 1,
        }
    }
}

impl CalendarArgs {
    /// Decodes the configured value, defaulting to `today` when it is empty.
    pub fn selection(&self, today: CalendarDate) -> Result<SelectionValue, CalendarError> {
        if self.value.trim().is_empty() {
            return Ok(SelectionValue::default_for(
                self.mode,
                today,
                self.first_day_of_week,
            ));
        }
        iso::decode(&self.value, self.mode).map_err(|source| CalendarError::Format {
            field: "value",
            source,
        })
    }

    /// Decodes the configured bounds.
    pub fn bounds(&self) -> Result<DateBounds, CalendarError> {
        let min = parse_bound("min_date", self.min_date.as_deref())?;
        let max = parse_bound("max_date", self.max_date.as_deref())?;
        DateBounds::new(min, max)
    }
}

fn parse_bound(
    field: &'static str,
    text: Option<&str>,
) -> Result<Option<CalendarDate>, CalendarError> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|source| CalendarError::Format { field, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IsoFormatError;

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn empty_value_defaults_to_today() {
        let today = date(2024, 3, 6);
        let args = CalendarArgs::default();
        assert_eq!(args.selection(today).unwrap(), SelectionValue::Single(today));

        let args = CalendarArgs::default().mode(CalendarMode::Range);
        assert_eq!(
            args.selection(today).unwrap(),
            SelectionValue::range(today, today)
        );
    }

    #[test]
    fn malformed_value_names_the_field() {
        let args = CalendarArgs::default().value("2024-03");
        let err = args.selection(date(2024, 3, 6)).unwrap_err();
        assert_eq!(
            err,
            CalendarError::Format {
                field: "value",
                source: IsoFormatError::Malformed("2024-03".to_string()),
            }
        );
    }

    #[test]
    fn bounds_parse_and_validate() {
        let args = CalendarArgs::default()
            .min_date("2024-01-10")
            .max_date("");
        let bounds = args.bounds().unwrap();
        assert_eq!(bounds.min(), Some(date(2024, 1, 10)));
        assert_eq!(bounds.max(), None);

        let inverted = CalendarArgs::default()
            .min_date("2024-02-01")
            .max_date("2024-01-01");
        assert!(matches!(
            inverted.bounds(),
            Err(CalendarError::InvertedBounds { .. })
        ));

        let bad = CalendarArgs::default().max_date("tomorrow");
        assert!(matches!(
            bad.bounds(),
            Err(CalendarError::Format { field: "max_date", .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults() {
        let args: CalendarArgs =
            serde_json::from_str(r#"{ "mode": "week", "first_day_of_week": "monday" }"#).unwrap();
        assert_eq!(args.mode, CalendarMode::Week);
        assert_eq!(args.first_day_of_week, Weekday::Monday);
        assert_eq!(args.number_of_months, 1);
        assert!(args.value.is_empty());
    }
}

//! Selection modes, selection values and date bounds.
use std::{fmt, str::FromStr};

use crate::{
    date::{CalendarDate, Weekday},
    error::{CalendarError, ParseModeError},
};

/// How a click on a date maps to a new selection value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CalendarMode {
    /// One date.
    #[default]
    Single,
    /// Two clicks choose the endpoints of a range.
    Range,
    /// One click selects the whole week around the date.
    Week,
    /// One click selects the whole month around the date.
    Month,
}

impl CalendarMode {
    /// Whether the persisted value for this mode is a date range.
    pub fn stores_range(self) -> bool {
        !matches!(self, CalendarMode::Single)
    }

    /// Lower-case mode name.
    pub fn as_str(self) -> &'static str {
        match self {
            CalendarMode::Single => "single",
            CalendarMode::Range => "range",
            CalendarMode::Week => "week",
            CalendarMode::Month => "month",
        }
    }
}

impl fmt::Display for CalendarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(CalendarMode::Single),
            "range" => Ok(CalendarMode::Range),
            "week" => Ok(CalendarMode::Week),
            "month" => Ok(CalendarMode::Month),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// An inclusive span of days with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

impl DateRange {
    /// Creates a range from two endpoints in either order.
    pub fn new(a: CalendarDate, b: CalendarDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A range covering a single day.
    pub fn day(date: CalendarDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The week containing `date`.
    pub fn week_of(date: CalendarDate, first_day_of_week: Weekday) -> Self {
        Self {
            start: date.start_of_week(first_day_of_week),
            end: date.end_of_week(first_day_of_week),
        }
    }

    /// The month containing `date`.
    pub fn month_of(date: CalendarDate) -> Self {
        Self {
            start: date.first_of_month(),
            end: date.last_of_month(),
        }
    }

    /// First day of the range.
    pub fn start(&self) -> CalendarDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> CalendarDate {
        self.end
    }

    /// Whether `date` lies within the range, endpoints included.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether `date` is one of the two endpoints.
    pub fn is_endpoint(&self, date: CalendarDate) -> bool {
        date == self.start || date == self.end
    }

    /// Number of days covered, endpoints included.
    pub fn len_days(&self) -> i64 {
        self.start.days_until(self.end) + 1
    }
}

/// The persisted selection of a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionValue {
    /// A single selected day.
    Single(CalendarDate),
    /// A normalized span of days.
    Range(DateRange),
}

impl SelectionValue {
    /// Builds a normalized range value from endpoints in either order.
    pub fn range(a: CalendarDate, b: CalendarDate) -> Self {
        SelectionValue::Range(DateRange::new(a, b))
    }

    /// The first selected day.
    pub fn start(&self) -> CalendarDate {
        match self {
            SelectionValue::Single(date) => *date,
            SelectionValue::Range(range) => range.start(),
        }
    }

    /// The last selected day.
    pub fn end(&self) -> CalendarDate {
        match self {
            SelectionValue::Single(date) => *date,
            SelectionValue::Range(range) => range.end(),
        }
    }

    /// Returns the range for range values.
    pub fn as_range(&self) -> Option<DateRange> {
        match self {
            SelectionValue::Range(range) => Some(*range),
            SelectionValue::Single(_) => None,
        }
    }

    /// Whether this value has the shape `mode` persists.
    pub fn matches_mode(&self, mode: CalendarMode) -> bool {
        matches!(self, SelectionValue::Range(_)) == mode.stores_range()
    }

    /// The value a freshly created calendar in `mode` holds for `date`.
    pub fn default_for(mode: CalendarMode, date: CalendarDate, first_day_of_week: Weekday) -> Self {
        match mode {
            CalendarMode::Single => SelectionValue::Single(date),
            CalendarMode::Range => SelectionValue::Range(DateRange::day(date)),
            CalendarMode::Week => SelectionValue::Range(DateRange::week_of(date, first_day_of_week)),
            CalendarMode::Month => SelectionValue::Range(DateRange::month_of(date)),
        }
    }
}

impl From<CalendarDate> for SelectionValue {
    fn from(date: CalendarDate) -> Self {
        SelectionValue::Single(date)
    }
}

impl From<DateRange> for SelectionValue {
    fn from(range: DateRange) -> Self {
        SelectionValue::Range(range)
    }
}

/// Optional inclusive lower and upper limits on selectable dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateBounds {
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
}

impl DateBounds {
    /// Bounds that allow every date.
    pub const UNBOUNDED: DateBounds = DateBounds {
        min: None,
        max: None,
    };

    /// Creates bounds, rejecting `min > max`.
    pub fn new(
        min: Option<CalendarDate>,
        max: Option<CalendarDate>,
    ) -> Result<Self, CalendarError> {
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(CalendarError::InvertedBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound, if any.
    pub fn min(&self) -> Option<CalendarDate> {
        self.min
    }

    /// Upper bound, if any.
    pub fn max(&self) -> Option<CalendarDate> {
        self.max
    }

    /// Whether `date` falls outside the bounds.
    pub fn is_out_of_bounds(&self, date: CalendarDate) -> bool {
        self.min.is_some_and(|min| date < min) || self.max.is_some_and(|max| date > max)
    }
}

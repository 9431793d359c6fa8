//! Calendar days, months and weekdays.
//!
//! Dates are proleptic Gregorian calendar days without a time component,
//! limited to the years `0000..=9999` that the four-digit ISO form can hold.
//! All arithmetic goes through a day count, so month lengths and leap years
//! roll over without any special casing by callers. Arithmetic saturates at
//! [`CalendarDate::MIN`] and [`CalendarDate::MAX`].
use std::{
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::error::ParseWeekdayError;

/// Number of days in a week, and columns in a month grid.
pub const DAYS_PER_WEEK: usize = 7;

/// Earliest supported year.
pub const MIN_YEAR: i32 = 0;
/// Latest supported year.
pub const MAX_YEAR: i32 = 9999;

/// Month lengths in a common year.
const MONTH_LENGTHS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
/// Days before the first of each month in a common year.
const DAYS_BEFORE_MONTH: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Day number of 1970-01-01, counting 0000-01-01 as day 0.
const EPOCH_DAY_NUMBER: i64 = days_before_year(1970);
/// Day number of 9999-12-31.
const MAX_DAY_NUMBER: i64 = days_before_year(MAX_YEAR as i64 + 1) - 1;

/// Days of the week in Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Weekday {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Weekday {
    fn index_from_monday(self) -> i32 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    fn from_monday_index(index: i32) -> Self {
        match index.rem_euclid(7) {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    /// Converts a Sunday-based index (0 = Sunday, 6 = Saturday).
    pub fn from_sunday_index(index: u8) -> Option<Self> {
        (index < 7).then(|| Self::from_monday_index(index as i32 - 1))
    }

    /// Returns the Sunday-based index (0 = Sunday, 6 = Saturday).
    pub fn sunday_index(self) -> u8 {
        (self.index_from_monday() + 1).rem_euclid(7) as u8
    }

    /// Number of days from `start` forward to `self`, in `0..7`.
    pub fn days_since(self, start: Weekday) -> u8 {
        (self.index_from_monday() - start.index_from_monday()).rem_euclid(7) as u8
    }

    /// Short English label, e.g. `"Mon"`.
    pub fn short_label(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }

    /// Single letter English label, e.g. `"M"`.
    pub fn narrow_label(self) -> &'static str {
        &self.short_label()[..1]
    }
}

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    /// Accepts English names (`"sunday"`, `"sun"`) in any case, or a
    /// Sunday-based index `"0"`..`"6"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<u8>() {
            return Weekday::from_sunday_index(index)
                .ok_or_else(|| ParseWeekdayError(trimmed.to_string()));
        }
        let day = match trimmed.to_ascii_lowercase().as_str() {
            "monday" | "mon" => Weekday::Monday,
            "tuesday" | "tue" => Weekday::Tuesday,
            "wednesday" | "wed" => Weekday::Wednesday,
            "thursday" | "thu" => Weekday::Thursday,
            "friday" | "fri" => Weekday::Friday,
            "saturday" | "sat" => Weekday::Saturday,
            "sunday" | "sun" => Weekday::Sunday,
            _ => return Err(ParseWeekdayError(trimmed.to_string())),
        };
        Ok(day)
    }
}

/// Returns the seven weekdays in display order starting at `first_day_of_week`.
pub fn weekday_sequence(first_day_of_week: Weekday) -> [Weekday; DAYS_PER_WEEK] {
    let mut days = [Weekday::Monday; DAYS_PER_WEEK];
    let start = first_day_of_week.index_from_monday();
    for (idx, slot) in days.iter_mut().enumerate() {
        *slot = Weekday::from_monday_index(start + idx as i32);
    }
    days
}

/// A calendar date expressed as year, month, and day.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// 0000-01-01.
    pub const MIN: CalendarDate = CalendarDate {
        year: MIN_YEAR,
        month: 1,
        day: 1,
    };
    /// 9999-12-31.
    pub const MAX: CalendarDate = CalendarDate {
        year: MAX_YEAR,
        month: 12,
        day: 31,
    };

    /// Creates a calendar date if the values are valid and the year is within
    /// `0000..=9999`.
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        let max_day = days_in_month(year, month);
        if day == 0 || day > max_day {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month (1-31).
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Returns the current date in UTC.
    pub fn today() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::from_days_since_epoch((duration.as_secs() / 86_400) as i64)
    }

    /// Builds the date `days` after 1970-01-01, clamped to
    /// [`CalendarDate::MIN`]..=[`CalendarDate::MAX`].
    pub fn from_days_since_epoch(days: i64) -> Self {
        let day_number = days.saturating_add(EPOCH_DAY_NUMBER).clamp(0, MAX_DAY_NUMBER);
        Self::from_day_number(day_number)
    }

    /// Days elapsed since 1970-01-01 (negative before it).
    pub fn days_since_epoch(&self) -> i64 {
        self.day_number() - EPOCH_DAY_NUMBER
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: CalendarDate) -> i64 {
        other.days_since_epoch() - self.days_since_epoch()
    }

    /// Adds or subtracts days, rolling over months and years and stopping at
    /// the ends of the supported range.
    pub fn add_days(&self, delta: i64) -> Self {
        Self::from_days_since_epoch(self.days_since_epoch().saturating_add(delta))
    }

    /// Adds or subtracts months, clamping the day to the target month length.
    /// Stops at the first or last supported month.
    pub fn add_months(&self, delta: i32) -> Self {
        self.year_month().add_months(delta).clamped_date(self.day)
    }

    /// Returns the day of the week.
    pub fn weekday(&self) -> Weekday {
        let index = (self.days_since_epoch() + 3).rem_euclid(7) as i32;
        Weekday::from_monday_index(index)
    }

    /// Returns the year and month of this date.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::new_unchecked(self.year, self.month)
    }

    /// First day of this date's month.
    pub fn first_of_month(&self) -> Self {
        self.year_month().first_day()
    }

    /// Last day of this date's month.
    pub fn last_of_month(&self) -> Self {
        self.year_month().last_day()
    }

    /// First day of the week containing this date.
    pub fn start_of_week(&self, first_day_of_week: Weekday) -> Self {
        let offset = self.weekday().days_since(first_day_of_week);
        self.add_days(-(offset as i64))
    }

    /// Last day of the week containing this date.
    pub fn end_of_week(&self, first_day_of_week: Weekday) -> Self {
        self.start_of_week(first_day_of_week)
            .add_days(DAYS_PER_WEEK as i64 - 1)
    }

    pub(crate) fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    fn day_number(&self) -> i64 {
        let month_index = self.month as usize - 1;
        let leap_day = (self.month > 2 && is_leap_year(self.year)) as i64;
        days_before_year(self.year as i64)
            + DAYS_BEFORE_MONTH[month_index] as i64
            + leap_day
            + self.day as i64
            - 1
    }

    /// Inverse of `day_number` for `0..=MAX_DAY_NUMBER`.
    fn from_day_number(day_number: i64) -> Self {
        // 146_097 days per 400 years; the estimate is off by at most one year.
        let mut year = day_number * 400 / 146_097;
        while days_before_year(year + 1) <= day_number {
            year += 1;
        }
        while days_before_year(year) > day_number {
            year -= 1;
        }
        let year = year as i32;
        let mut remaining = day_number - days_before_year(year as i64);
        let mut month = 1;
        while remaining >= days_in_month(year, month) as i64 {
            remaining -= days_in_month(year, month) as i64;
            month += 1;
        }
        Self::new_unchecked(year, month, remaining as u8 + 1)
    }
}

/// A year and month pair used for month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// January 0000.
    pub const MIN: YearMonth = YearMonth::new_unchecked(MIN_YEAR, 1);
    /// December 9999.
    pub const MAX: YearMonth = YearMonth::new_unchecked(MAX_YEAR, 12);

    /// Creates a year/month pair if the values are valid and the year is
    /// within `0000..=9999`.
    pub fn new(year: i32, month: u8) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Number of days in this month.
    pub fn days(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// Returns the date at `day`, clamped into `1..=days()`.
    pub fn clamped_date(&self, day: u8) -> CalendarDate {
        CalendarDate::new_unchecked(self.year, self.month, day.clamp(1, self.days()))
    }

    /// First day of the month.
    pub fn first_day(&self) -> CalendarDate {
        CalendarDate::new_unchecked(self.year, self.month, 1)
    }

    /// Last day of the month.
    pub fn last_day(&self) -> CalendarDate {
        CalendarDate::new_unchecked(self.year, self.month, self.days())
    }

    /// Adds or subtracts months, adjusting the year as needed and stopping at
    /// [`YearMonth::MIN`] and [`YearMonth::MAX`].
    pub fn add_months(&self, delta: i32) -> Self {
        let index = self.month_index() + delta as i64;
        let index = index.clamp(Self::MIN.month_index(), Self::MAX.month_index());
        Self {
            year: (index / 12) as i32,
            month: (index % 12 + 1) as u8,
        }
    }

    /// English month name, e.g. `"March"`.
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    pub(crate) const fn new_unchecked(year: i32, month: u8) -> Self {
        Self { year, month }
    }

    /// Months since January 0000.
    fn month_index(&self) -> i64 {
        self.year as i64 * 12 + self.month as i64 - 1
    }
}

fn month_name(month: u8) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

/// Number of days in the given month, or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => MONTH_LENGTHS[month as usize - 1],
        _ => 0,
    }
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days from 0000-01-01 to January 1st of `year`, for `year >= 0`.
const fn days_before_year(year: i64) -> i64 {
    if year <= 0 {
        return 0;
    }
    // Year 0 is a leap year, hence the extra day.
    let last = year - 1;
    365 * year + last / 4 - last / 100 + last / 400 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_date_validation() {
        assert!(CalendarDate::new(2024, 2, 29).is_some());
        assert!(CalendarDate::new(2023, 2, 29).is_none());
        assert!(CalendarDate::new(2024, 13, 1).is_none());
        assert!(CalendarDate::new(2024, 4, 31).is_none());
        assert!(CalendarDate::new(2024, 4, 0).is_none());
    }

    #[test]
    fn test_epoch_conversion() {
        assert_eq!(date(1970, 1, 1).days_since_epoch(), 0);
        assert_eq!(date(2000, 3, 1).days_since_epoch(), 11_017);
        assert_eq!(CalendarDate::from_days_since_epoch(-1), date(1969, 12, 31));
        let d = date(2024, 2, 29);
        assert_eq!(CalendarDate::from_days_since_epoch(d.days_since_epoch()), d);
    }

    #[test]
    fn test_add_days_rolls_over() {
        assert_eq!(date(2024, 2, 28).add_days(1), date(2024, 2, 29));
        assert_eq!(date(2023, 2, 28).add_days(1), date(2023, 3, 1));
        assert_eq!(date(2023, 12, 31).add_days(1), date(2024, 1, 1));
        assert_eq!(date(2024, 1, 1).add_days(-1), date(2023, 12, 31));
        assert_eq!(date(2024, 3, 4).add_days(-7), date(2024, 2, 26));
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(date(2024, 1, 31).add_months(1), date(2024, 2, 29));
        assert_eq!(date(2023, 1, 31).add_months(1), date(2023, 2, 28));
        assert_eq!(date(2024, 1, 15).add_months(-1), date(2023, 12, 15));
        assert_eq!(date(2024, 12, 31).add_months(2), date(2025, 2, 28));
    }

    #[test]
    fn test_weekday_for_date() {
        assert_eq!(date(1970, 1, 1).weekday(), Weekday::Thursday);
        assert_eq!(date(2024, 3, 3).weekday(), Weekday::Sunday);
        assert_eq!(date(2024, 3, 4).weekday(), Weekday::Monday);
        assert_eq!(date(2024, 2, 29).weekday(), Weekday::Thursday);
    }

    #[test]
    fn test_week_span() {
        let monday = date(2024, 3, 4);
        assert_eq!(monday.start_of_week(Weekday::Sunday), date(2024, 3, 3));
        assert_eq!(monday.end_of_week(Weekday::Sunday), date(2024, 3, 9));
        assert_eq!(monday.start_of_week(Weekday::Monday), monday);
        assert_eq!(monday.end_of_week(Weekday::Monday), date(2024, 3, 10));
        let sunday = date(2024, 3, 10);
        assert_eq!(sunday.start_of_week(Weekday::Monday), monday);
    }

    #[test]
    fn test_month_span() {
        let d = date(2024, 2, 14);
        assert_eq!(d.first_of_month(), date(2024, 2, 1));
        assert_eq!(d.last_of_month(), date(2024, 2, 29));
        assert_eq!(date(2023, 2, 14).last_of_month(), date(2023, 2, 28));
    }

    #[test]
    fn test_year_month_navigation() {
        let month = YearMonth::new(2024, 1).unwrap();
        assert_eq!(month.add_months(-1), YearMonth::new(2023, 12).unwrap());
        assert_eq!(month.add_months(13), YearMonth::new(2025, 2).unwrap());
        assert_eq!(month.month_name(), "January");
        assert!(YearMonth::new(2024, 0).is_none());
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(date(2023, 12, 31) < date(2024, 1, 1));
        assert!(date(2024, 2, 1) > date(2024, 1, 31));
        assert_eq!(date(2024, 1, 1).days_until(date(2024, 3, 1)), 60);
    }

    #[test]
    fn test_years_outside_four_digits_are_rejected() {
        assert!(CalendarDate::new(10_000, 1, 1).is_none());
        assert!(CalendarDate::new(-1, 12, 31).is_none());
        assert!(CalendarDate::new(200_000_000, 1, 1).is_none());
        assert!(YearMonth::new(10_000, 1).is_none());
        assert!(YearMonth::new(-1, 1).is_none());
        assert_eq!(CalendarDate::new(0, 2, 29), Some(CalendarDate::MIN.add_days(59)));
        assert_eq!(CalendarDate::new(9999, 12, 31), Some(CalendarDate::MAX));
    }

    #[test]
    fn test_arithmetic_saturates_at_range_ends() {
        assert_eq!(CalendarDate::MAX.add_days(1), CalendarDate::MAX);
        assert_eq!(CalendarDate::MAX.add_days(i64::MAX), CalendarDate::MAX);
        assert_eq!(CalendarDate::MIN.add_days(-1), CalendarDate::MIN);
        assert_eq!(CalendarDate::MIN.add_days(i64::MIN), CalendarDate::MIN);
        assert_eq!(CalendarDate::from_days_since_epoch(i64::MAX), CalendarDate::MAX);
        assert_eq!(CalendarDate::MAX.add_months(1), CalendarDate::MAX);
        assert_eq!(date(9999, 11, 30).add_months(i32::MAX), date(9999, 12, 30));
        assert_eq!(CalendarDate::MIN.add_months(i32::MIN), CalendarDate::MIN);
        assert_eq!(YearMonth::MAX.add_months(1), YearMonth::MAX);
        assert_eq!(YearMonth::MIN.add_months(-1), YearMonth::MIN);
    }

    #[test]
    fn test_day_numbers_cover_whole_range() {
        assert_eq!(CalendarDate::MIN.days_since_epoch(), -719_528);
        assert_eq!(CalendarDate::MAX.days_since_epoch(), 2_932_896);
        for days in [-719_528, -719_468, -1, 0, 59, 11_016, 2_932_530, 2_932_896] {
            let d = CalendarDate::from_days_since_epoch(days);
            assert_eq!(d.days_since_epoch(), days);
        }
        let mut d = date(1999, 12, 25);
        for _ in 0..800 {
            let next = d.add_days(1);
            assert_eq!(d.days_until(next), 1);
            assert!(next > d);
            d = next;
        }
        assert_eq!(d, date(2002, 3, 4));
    }

    #[test]
    fn test_weekday_indices_and_parsing() {
        assert_eq!(Weekday::from_sunday_index(0), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_sunday_index(1), Some(Weekday::Monday));
        assert_eq!(Weekday::from_sunday_index(7), None);
        assert_eq!(Weekday::Saturday.sunday_index(), 6);
        assert_eq!("Sun".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert_eq!("wednesday".parse::<Weekday>().unwrap(), Weekday::Wednesday);
        assert_eq!("1".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert!("someday".parse::<Weekday>().is_err());
        assert_eq!(Weekday::Thursday.narrow_label(), "T");
    }

    #[test]
    fn test_weekday_sequence_rotates() {
        let days = weekday_sequence(Weekday::Sunday);
        assert_eq!(days[0], Weekday::Sunday);
        assert_eq!(days[1], Weekday::Monday);
        assert_eq!(days[6], Weekday::Saturday);
    }
}

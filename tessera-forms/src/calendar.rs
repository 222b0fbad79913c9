//! Calendar arithmetic for the date field.
//!
//! ## Usage
//!
//! Use these value types to move between days and months without ever
//! producing an invalid date such as February 30.
use std::{
    fmt,
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::error::DateParseError;

/// Number of columns in a week row.
pub const DAYS_PER_WEEK: usize = 7;

/// Earliest representable year.
pub const MIN_YEAR: i32 = 0;

/// Latest representable year. Keeps the canonical form at four year digits.
pub const MAX_YEAR: i32 = 9999;

/// Days of the week in Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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
    /// Zero-based position of the day counted from Monday.
    pub fn index_from_monday(self) -> i32 {
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
}

/// A calendar day without a time component.
///
/// A `CalendarDate` always names a real day between `0000-01-01` and
/// `9999-12-31`. The canonical text form is `YYYY-MM-DD`, produced by
/// [`fmt::Display`] and accepted by [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Creates a calendar date if the values are valid.
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

    /// Returns the month this date belongs to.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::new_unchecked(self.year, self.month)
    }

    /// Returns the current date in UTC.
    pub fn today() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let days = (duration.as_secs() / 86_400) as i64;
        Self::from_days(days)
    }

    /// Number of days in this date's month.
    pub fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// Returns the day of the week.
    pub fn weekday(&self) -> Weekday {
        let days = days_from_civil(self.year, self.month, self.day);
        // 1970-01-01 was a Thursday.
        Weekday::from_monday_index((days + 3).rem_euclid(7) as i32)
    }

    /// Shifts the date by `delta` months, clamping the day to the last day of
    /// the target month.
    pub fn add_months(&self, delta: i32) -> Self {
        let target = self.year_month().add_months(delta);
        let day = self.day.min(target.days_in_month());
        Self::new_unchecked(target.year(), target.month(), day)
    }

    /// Shifts the date by `delta` days, saturating at the representable
    /// bounds.
    pub fn add_days(&self, delta: i64) -> Self {
        let first = days_from_civil(MIN_YEAR, 1, 1);
        let last = days_from_civil(MAX_YEAR, 12, 31);
        let days = days_from_civil(self.year, self.month, self.day)
            .saturating_add(delta)
            .clamp(first, last);
        Self::from_days(days)
    }

    /// The following day, rolling over month and year boundaries.
    pub fn next_day(&self) -> Self {
        self.add_days(1)
    }

    /// The preceding day, rolling over month and year boundaries.
    pub fn previous_day(&self) -> Self {
        self.add_days(-1)
    }

    /// Returns true when both values denote the same day.
    pub fn is_same_day(&self, other: &CalendarDate) -> bool {
        self.year == other.year && self.month == other.month && self.day == other.day
    }

    fn from_days(days: i64) -> Self {
        let (year, month, day) = civil_from_days(days);
        Self::new_unchecked(year, month, day)
    }

    pub(crate) fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(DateParseError::Format(s.to_string()));
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(DateParseError::Format(s.to_string()));
        }
        let year: i32 = parse_digits(year, s)?;
        let month: u8 = parse_digits(month, s)?;
        let day: u8 = parse_digits(day, s)?;
        CalendarDate::new(year, month, day).ok_or(DateParseError::NotARealDay { year, month, day })
    }
}

fn parse_digits<T: FromStr>(digits: &str, input: &str) -> Result<T, DateParseError> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateParseError::Format(input.to_string()));
    }
    digits
        .parse()
        .map_err(|_| DateParseError::Format(input.to_string()))
}

/// A year and month pair used for month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Creates a year/month pair if the values are valid.
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

    /// Returns the date for this month at the provided day.
    pub fn to_date(&self, day: u8) -> Option<CalendarDate> {
        CalendarDate::new(self.year, self.month, day)
    }

    /// First day of the month.
    pub fn first_day(&self) -> CalendarDate {
        CalendarDate::new_unchecked(self.year, self.month, 1)
    }

    /// Last day of the month.
    pub fn last_day(&self) -> CalendarDate {
        CalendarDate::new_unchecked(self.year, self.month, self.days_in_month())
    }

    /// Number of days in the month.
    pub fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// Returns true when `date` falls inside this month.
    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Adds or subtracts months, adjusting the year as needed. Stops at
    /// January of [`MIN_YEAR`] and December of [`MAX_YEAR`].
    pub fn add_months(&self, delta: i32) -> Self {
        let first = i64::from(MIN_YEAR) * 12;
        let last = i64::from(MAX_YEAR) * 12 + 11;
        let total = (i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(delta))
            .clamp(first, last);
        Self {
            year: total.div_euclid(12) as i32,
            month: (total.rem_euclid(12) + 1) as u8,
        }
    }

    /// Adds or subtracts whole years, keeping the month. Stops at
    /// [`MIN_YEAR`] and [`MAX_YEAR`].
    pub fn add_years(&self, delta: i32) -> Self {
        Self {
            year: self.year.saturating_add(delta).clamp(MIN_YEAR, MAX_YEAR),
            month: self.month,
        }
    }

    pub(crate) fn new_unchecked(year: i32, month: u8) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", month_name(self.month), self.year)
    }
}

/// Inclusive bounds on which days may be selected.
///
/// Either bound may be absent; each is enforced independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    /// Earliest selectable day.
    pub min: Option<CalendarDate>,
    /// Latest selectable day.
    pub max: Option<CalendarDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Self {
        Self { min, max }
    }

    /// A range that accepts every day.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Returns true when `date` satisfies both bounds.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.min.is_none_or(|min| date >= min) && self.max.is_none_or(|max| date <= max)
    }
}

/// Returns true when `date` is present and within `range`.
pub fn is_in_range(date: Option<CalendarDate>, range: &DateRange) -> bool {
    date.is_some_and(|date| range.contains(date))
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

/// Number of blank cells before day 1 so it lands under its weekday column.
pub fn padding_count(month: YearMonth, first_day_of_week: Weekday) -> usize {
    let first_weekday = month.first_day().weekday();
    (first_weekday.index_from_monday() - first_day_of_week.index_from_monday()).rem_euclid(7)
        as usize
}

/// English name of a month (1-12).
pub fn month_name(month: u8) -> &'static str {
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

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let m = month as i64;
    let d = day as i64;
    let y = year as i64 - if m <= 2 { 1 } else { 0 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = m + if m > 2 { -3 } else { 9 };
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = mp + if mp < 10 { 3 } else { -9 };
    let year = y + if month <= 2 { 1 } else { 0 };
    (year as i32, month as u8, day as u8)
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

    use super::CalendarDate;

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
}

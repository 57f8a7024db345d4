//! Calendar date helpers.
//!
//! Everything here works on plain `NaiveDate` values: no time of day and no
//! time zone. Weekdays are numbered Sunday=0 through Saturday=6 to match the
//! stored recurrence rules. Arithmetic that can run past chrono's supported
//! range returns `None` instead of panicking.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use std::cmp::Ordering;

/// Three-letter weekday names indexed Sunday=0.
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Day of week for a date, Sunday=0.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Map a Sunday=0 index onto chrono's `Weekday`.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

pub fn add_weeks(date: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    add_days(date, weeks.checked_mul(7)?)
}

/// Add calendar months, clamping the day to the end of a shorter month
/// (Jan 31 + 1 month is Feb 28 or Feb 29).
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

/// Add calendar years with the same clamping rule as [`add_months`], so a
/// Feb 29 anchor lands on Feb 28 in common years.
pub fn add_years(date: NaiveDate, years: i64) -> Option<NaiveDate> {
    add_months(date, years.checked_mul(12)?)
}

pub fn compare_dates(a: NaiveDate, b: NaiveDate) -> Ordering {
    a.cmp(&b)
}

/// Number of days in a month (`month` is 1-based). Returns 0 for an
/// invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // December of chrono's final representable year
        None => 31,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// The `n`th occurrence (1-based) of `weekday` (Sunday=0) in a month.
///
/// Returns `None` when the month has fewer than `n` such weekdays, e.g. a
/// 5th Friday in a month that only has four.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: u8, n: u8) -> Option<NaiveDate> {
    let weekday = weekday_from_index(weekday)?;
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

/// The final occurrence of `weekday` (Sunday=0) in a month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: u8) -> Option<NaiveDate> {
    let target = weekday_from_index(weekday)?;
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
    let back = (7 + last.weekday().num_days_from_sunday() - target.num_days_from_sunday()) % 7;
    add_days(last, -i64::from(back))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
    Some((first, last))
}

/// Sunday that begins the calendar week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    add_days(date, -i64::from(day_of_week(date))).unwrap_or(date)
}

/// The six-week, Sunday-first grid a month view renders: leading days from
/// the previous month, the month itself, trailing days from the next.
pub fn month_grid(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some((first, _)) = month_bounds(year, month) else {
        return Vec::new();
    };
    let grid_start = start_of_week(first);
    grid_start.iter_days().take(42).collect()
}

//! Calendar-date helpers shared by the calculator, the normalizer and storage.
//!
//! Dates travel as fixed 8-digit `YYYYMMDD` strings. Moments are zone-less
//! [`NaiveDateTime`] values; comparisons that ignore the time of day go
//! through [`start_of_day`].

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Storage and exchange format for task dates.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Format accepted by task search to look up a single day.
pub const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parses an 8-digit `YYYYMMDD` string into a calendar date.
///
/// Anything other than exactly eight ASCII digits naming a real day is rejected,
/// so `2025-01-01`, `2025011` and `20250230` all return `None`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = value[0..4].parse::<i32>().ok()?;
    let month = value[4..6].parse::<u32>().ok()?;
    let day = value[6..8].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a search term written as `DD.MM.YYYY`.
///
/// Day and month must be zero-padded, so `8.2.2024` is treated as text.
pub fn parse_search_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let padded = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            2 | 5 => b == b'.',
            _ => b.is_ascii_digit(),
        });
    if !padded {
        return None;
    }
    NaiveDate::parse_from_str(value, SEARCH_DATE_FORMAT).ok()
}

/// Truncates a moment to midnight of its calendar day.
#[inline]
pub fn start_of_day(moment: NaiveDateTime) -> NaiveDateTime {
    moment.date().and_time(NaiveTime::MIN)
}

/// Midnight of `date`, for comparisons against a full moment.
#[inline]
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Adds whole years keeping month and day.
///
/// February 29 landing in a common year rolls over to March 1, the way
/// calendar normalization treats the non-existent day.
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    NaiveDate::from_ymd_opt(year, date.month(), date.day()).or_else(|| {
        if date.month() == 2 && date.day() == 29 {
            NaiveDate::from_ymd_opt(year, 3, 1)
        } else {
            None
        }
    })
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

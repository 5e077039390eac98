use anyhow::{anyhow, Result};
use cadence_core::date::{format_date, parse_date, parse_search_date};
use cadence_core::error::CoreError;
use chrono::{Days, Local, NaiveDate, NaiveDateTime};

/// The reference moment for commands run from the terminal.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Turns a user-supplied date into the stored `YYYYMMDD` form.
///
/// `today`, `tomorrow` and `DD.MM.YYYY` are translated; any other input is
/// passed through unchanged so the core reports malformed dates itself.
pub fn resolve_date(input: &str, today: NaiveDate) -> String {
    let trimmed = input.trim();
    match trimmed.to_lowercase().as_str() {
        "today" => format_date(today),
        "tomorrow" => today
            .checked_add_days(Days::new(1))
            .map(format_date)
            .unwrap_or_else(|| trimmed.to_string()),
        _ => parse_search_date(trimmed)
            .map(format_date)
            .unwrap_or_else(|| trimmed.to_string()),
    }
}

/// Like [`resolve_date`] but requires a real calendar day.
pub fn parse_date_arg(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let resolved = resolve_date(input, today);
    parse_date(&resolved).ok_or_else(|| {
        anyhow!(CoreError::InvalidInput(format!(
            "'{}' is not a date, expected YYYYMMDD, DD.MM.YYYY, today or tomorrow",
            input
        )))
    })
}

/// Formats a stored `YYYYMMDD` date for display, falling back to the raw text.
pub fn display_date(stored: &str) -> String {
    parse_date(stored)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| stored.to_string())
}

use chrono::NaiveDateTime;

use crate::date::{format_date, parse_date};
use crate::error::NormalizeError;
use crate::schedule::next_date;

/// Normalizes a task date before it is stored.
///
/// - an empty date becomes today;
/// - a repeating task dated today or earlier moves to its next occurrence;
/// - a non-repeating task dated in the past moves to today.
///
/// Future dates are left untouched. Runs on both create and update.
pub fn normalize(date: &mut String, repeat: &str, now: NaiveDateTime) -> Result<(), NormalizeError> {
    let today = now.date();
    if date.is_empty() {
        *date = format_date(today);
    }

    let parsed = parse_date(date).ok_or_else(|| NormalizeError::InvalidDate(date.clone()))?;

    if !repeat.is_empty() {
        let next = next_date(now, date, repeat).map_err(NormalizeError::InvalidRecurrence)?;
        if parsed <= today {
            *date = next;
        }
    } else if parsed < today {
        *date = format_date(today);
    }

    Ok(())
}

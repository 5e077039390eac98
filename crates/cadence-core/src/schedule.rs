//! Next-occurrence calculation.
//!
//! Daily and yearly rules stop on the first step that lands on or after the
//! reference day, counting the start date itself. Weekly and monthly rules
//! always advance at least one day and stop on the first matching day that is
//! strictly after the full reference moment. Callers that need a daily or
//! yearly rule to move past today must pass a later reference; see
//! [`completion_reference`].

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use crate::date::{add_years, days_in_month, format_date, midnight, parse_date, start_of_day};
use crate::error::CalculationError;
use crate::rule::RecurrenceRule;

impl RecurrenceRule {
    /// Computes the next occurrence of this rule for a task starting on `start`.
    pub fn next_after(
        &self,
        now: NaiveDateTime,
        start: NaiveDate,
    ) -> Result<NaiveDate, CalculationError> {
        match self {
            RecurrenceRule::Daily { interval } => {
                let step = Days::new(u64::from(*interval));
                advance_until_today(now, start, |date| date.checked_add_days(step))
            }
            RecurrenceRule::Yearly => advance_until_today(now, start, |date| add_years(date, 1)),
            RecurrenceRule::Weekly { weekdays } => scan_forward(now, start, |date| {
                weekdays.contains(&date.weekday().number_from_monday())
            }),
            RecurrenceRule::Monthly { days, months } => scan_forward(now, start, |date| {
                months.contains(&date.month()) && days.matches(date.day(), days_in_month(date))
            }),
        }
    }

    /// Whether the reference day itself can be returned by [`Self::next_after`].
    pub fn includes_reference_day(&self) -> bool {
        matches!(self, RecurrenceRule::Daily { .. } | RecurrenceRule::Yearly)
    }
}

/// Calculates the next date for a task that starts on `start` and repeats by `rule`.
///
/// `start` and the returned date use the `YYYYMMDD` format.
pub fn next_date(now: NaiveDateTime, start: &str, rule: &str) -> Result<String, CalculationError> {
    if rule.is_empty() {
        return Err(CalculationError::EmptyRule);
    }
    let start_date =
        parse_date(start).ok_or_else(|| CalculationError::InvalidStartDate(start.to_string()))?;
    let rule: RecurrenceRule = rule.parse()?;

    rule.next_after(now, start_date).map(format_date)
}

/// Reference moment for completing a repeating task currently dated `current`.
///
/// The result makes [`RecurrenceRule::next_after`] return a date strictly after
/// both `today` and `current` for every rule kind.
pub fn completion_reference(
    rule: &RecurrenceRule,
    today: NaiveDate,
    current: NaiveDate,
) -> Result<NaiveDateTime, CalculationError> {
    let latest = today.max(current);
    if rule.includes_reference_day() {
        latest
            .succ_opt()
            .map(midnight)
            .ok_or(CalculationError::DateOutOfRange)
    } else {
        Ok(midnight(latest))
    }
}

fn advance_until_today(
    now: NaiveDateTime,
    start: NaiveDate,
    step: impl Fn(NaiveDate) -> Option<NaiveDate>,
) -> Result<NaiveDate, CalculationError> {
    let today = start_of_day(now);
    let mut date = start;
    while midnight(date) < today {
        date = step(date).ok_or(CalculationError::DateOutOfRange)?;
    }
    Ok(date)
}

fn scan_forward(
    now: NaiveDateTime,
    start: NaiveDate,
    matches: impl Fn(NaiveDate) -> bool,
) -> Result<NaiveDate, CalculationError> {
    let mut date = start;
    loop {
        date = date.succ_opt().ok_or(CalculationError::DateOutOfRange)?;
        if matches(date) && midnight(date) > now {
            return Ok(date);
        }
    }
}

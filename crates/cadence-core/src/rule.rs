//! Compact repeat rules and their validator.
//!
//! A rule is a short whitespace-separated string:
//!
//! | text              | meaning                                                  |
//! |-------------------|----------------------------------------------------------|
//! | `d 7`             | every 7 days (interval 1..=400)                          |
//! | `w 1,3,5`         | Monday, Wednesday and Friday (ISO numbering, 7 = Sunday) |
//! | `m 1,15,-1`       | 1st, 15th and last day of every month                    |
//! | `m -2 1,6`        | second-to-last day of January and June                   |
//! | `y`               | every year on the same day                               |
//!
//! The empty string means the task does not repeat. The same parser backs both
//! [`validate`] and the calculator in [`crate::schedule`], so a rule is accepted by
//! one exactly when it is accepted by the other.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{CalculationError, ValidationError};

/// Largest interval accepted by a daily rule.
pub const MAX_DAILY_INTERVAL: u32 = 400;

/// Day selector `-1`: the last day of the month.
pub const LAST_DAY: i64 = -1;
/// Day selector `-2`: the day before the last day of the month.
pub const SECOND_TO_LAST_DAY: i64 = -2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceRule {
    Daily { interval: u32 },
    /// ISO weekday numbers, 1 = Monday through 7 = Sunday.
    Weekly { weekdays: BTreeSet<u32> },
    Monthly { days: MonthDays, months: BTreeSet<u32> },
    Yearly,
}

/// Day-of-month selection of a monthly rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthDays {
    /// Explicit days, each in 1..=31.
    pub days: BTreeSet<u32>,
    pub last: bool,
    pub second_to_last: bool,
}

impl MonthDays {
    /// Whether `day` matches in a month that has `month_length` days.
    pub fn matches(&self, day: u32, month_length: u32) -> bool {
        self.days.contains(&day)
            || (self.last && day == month_length)
            || (self.second_to_last && day + 1 == month_length)
    }

    fn is_empty(&self) -> bool {
        self.days.is_empty() && !self.last && !self.second_to_last
    }
}

impl RecurrenceRule {
    /// The one-letter kind token that starts the textual form.
    pub fn kind(&self) -> &'static str {
        match self {
            RecurrenceRule::Daily { .. } => "d",
            RecurrenceRule::Weekly { .. } => "w",
            RecurrenceRule::Monthly { .. } => "m",
            RecurrenceRule::Yearly => "y",
        }
    }

    /// Human-readable summary, e.g. "every 3 days".
    pub fn describe(&self) -> String {
        match self {
            RecurrenceRule::Daily { interval: 1 } => "every day".to_string(),
            RecurrenceRule::Daily { interval } => format!("every {} days", interval),
            RecurrenceRule::Weekly { weekdays } => {
                let names: Vec<&str> = weekdays.iter().map(|&d| weekday_name(d)).collect();
                format!("weekly on {}", names.join(", "))
            }
            RecurrenceRule::Monthly { days, months } => {
                let mut parts: Vec<String> = days.days.iter().map(|d| d.to_string()).collect();
                if days.last {
                    parts.push("last".to_string());
                }
                if days.second_to_last {
                    parts.push("second-to-last".to_string());
                }
                let on = format!("monthly on day {}", parts.join(", "));
                if months.len() == 12 {
                    on
                } else {
                    let names: Vec<&str> = months.iter().map(|&m| month_name(m)).collect();
                    format!("{} in {}", on, names.join(", "))
                }
            }
            RecurrenceRule::Yearly => "every year".to_string(),
        }
    }
}

impl FromStr for RecurrenceRule {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let Some((&kind, params)) = tokens.split_first() else {
            return Err(CalculationError::EmptyRule);
        };

        match kind {
            "d" => {
                let token = match params {
                    [] => return Err(CalculationError::MissingRuleParameter(kind.to_string())),
                    [token] => *token,
                    _ => {
                        return Err(CalculationError::InvalidRuleParameter(
                            "rule 'd' takes exactly one interval".to_string(),
                        ))
                    }
                };
                let interval = parse_number(token, "interval")?;
                if !(1..=i64::from(MAX_DAILY_INTERVAL)).contains(&interval) {
                    return Err(CalculationError::InvalidRuleParameter(format!(
                        "interval must be between 1 and {}, got {}",
                        MAX_DAILY_INTERVAL, interval
                    )));
                }
                Ok(RecurrenceRule::Daily { interval: interval as u32 })
            }
            "w" => {
                let list = params
                    .first()
                    .ok_or_else(|| CalculationError::MissingRuleParameter(kind.to_string()))?;
                let weekdays = parse_list(list, "weekday", |n| (1..=7).contains(&n))?
                    .into_iter()
                    .map(|n| n as u32)
                    .collect();
                Ok(RecurrenceRule::Weekly { weekdays })
            }
            "m" => {
                let list = params
                    .first()
                    .ok_or_else(|| CalculationError::MissingRuleParameter(kind.to_string()))?;
                let mut days = MonthDays::default();
                for n in parse_list(list, "day of month", |n| {
                    n == LAST_DAY || n == SECOND_TO_LAST_DAY || (1..=31).contains(&n)
                })? {
                    match n {
                        LAST_DAY => days.last = true,
                        SECOND_TO_LAST_DAY => days.second_to_last = true,
                        day => {
                            days.days.insert(day as u32);
                        }
                    }
                }

                let months: BTreeSet<u32> = match params.get(1) {
                    Some(list) => parse_list(list, "month", |n| (1..=12).contains(&n))?
                        .into_iter()
                        .map(|n| n as u32)
                        .collect(),
                    None => (1..=12).collect(),
                };

                ensure_reachable(&days, &months)?;
                Ok(RecurrenceRule::Monthly { days, months })
            }
            "y" => {
                if !params.is_empty() {
                    return Err(CalculationError::InvalidRuleParameter(
                        "rule 'y' takes no parameters".to_string(),
                    ));
                }
                Ok(RecurrenceRule::Yearly)
            }
            other => Err(CalculationError::UnsupportedRuleKind(other.to_string())),
        }
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::Daily { interval } => write!(f, "d {}", interval),
            RecurrenceRule::Weekly { weekdays } => write!(f, "w {}", join(weekdays.iter())),
            RecurrenceRule::Monthly { days, months } => {
                let mut selectors: Vec<i64> = days.days.iter().map(|&d| i64::from(d)).collect();
                if days.last {
                    selectors.push(LAST_DAY);
                }
                if days.second_to_last {
                    selectors.push(SECOND_TO_LAST_DAY);
                }
                write!(f, "m {}", join(selectors.iter()))?;
                if months.len() != 12 {
                    write!(f, " {}", join(months.iter()))?;
                }
                Ok(())
            }
            RecurrenceRule::Yearly => write!(f, "y"),
        }
    }
}

/// Checks a repeat rule without computing any dates.
///
/// The empty string is valid and means "does not repeat".
pub fn validate(rule: &str) -> Result<(), ValidationError> {
    if rule.is_empty() {
        return Ok(());
    }
    rule.parse::<RecurrenceRule>()?;
    Ok(())
}

fn parse_number(token: &str, what: &str) -> Result<i64, CalculationError> {
    token.parse::<i64>().map_err(|_| {
        CalculationError::InvalidRuleParameter(format!("{} '{}' is not a number", what, token))
    })
}

fn parse_list(
    token: &str,
    what: &str,
    in_range: impl Fn(i64) -> bool,
) -> Result<Vec<i64>, CalculationError> {
    token
        .split(',')
        .map(|item| {
            let n = parse_number(item, what)?;
            if in_range(n) {
                Ok(n)
            } else {
                Err(CalculationError::InvalidRuleParameter(format!(
                    "{} {} is out of range",
                    what, n
                )))
            }
        })
        .collect()
}

/// Rejects monthly rules that no calendar day can ever satisfy, such as `m 31 2`.
fn ensure_reachable(days: &MonthDays, months: &BTreeSet<u32>) -> Result<(), CalculationError> {
    if days.is_empty() {
        return Err(CalculationError::InvalidRuleParameter(
            "monthly rule needs at least one day".to_string(),
        ));
    }
    if days.last || days.second_to_last {
        return Ok(());
    }

    let longest = months.iter().map(|&m| max_month_length(m)).max().unwrap_or(0);
    if days.days.iter().any(|&d| d <= longest) {
        Ok(())
    } else {
        Err(CalculationError::InvalidRuleParameter(format!(
            "day {} never occurs in the selected months",
            join(days.days.iter())
        )))
    }
}

fn max_month_length(month: u32) -> u32 {
    match month {
        2 => 29,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn join<T: ToString>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| i.to_string()).collect::<Vec<_>>().join(",")
}

fn weekday_name(day: u32) -> &'static str {
    match day {
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => "Sun",
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn set(items: &[u32]) -> BTreeSet<u32> {
        items.iter().copied().collect()
    }

    mod parse {
        use super::*;

        #[test]
        fn test_daily() {
            let rule: RecurrenceRule = "d 7".parse().unwrap();
            assert_eq!(rule, RecurrenceRule::Daily { interval: 7 });
        }

        #[test]
        fn test_weekly_deduplicates() {
            let rule: RecurrenceRule = "w 5,1,5,3".parse().unwrap();
            assert_eq!(rule, RecurrenceRule::Weekly { weekdays: set(&[1, 3, 5]) });
        }

        #[test]
        fn test_monthly_defaults_to_all_months() {
            let rule: RecurrenceRule = "m 1,15,-1".parse().unwrap();
            match rule {
                RecurrenceRule::Monthly { days, months } => {
                    assert_eq!(days.days, set(&[1, 15]));
                    assert!(days.last);
                    assert!(!days.second_to_last);
                    assert_eq!(months, (1..=12).collect());
                }
                other => panic!("expected monthly rule, got {:?}", other),
            }
        }

        #[test]
        fn test_monthly_with_months() {
            let rule: RecurrenceRule = "m -2 1,6".parse().unwrap();
            match rule {
                RecurrenceRule::Monthly { days, months } => {
                    assert!(days.days.is_empty());
                    assert!(days.second_to_last);
                    assert_eq!(months, set(&[1, 6]));
                }
                other => panic!("expected monthly rule, got {:?}", other),
            }
        }

        #[test]
        fn test_extra_whitespace_is_ignored() {
            let rule: RecurrenceRule = "  w   2 ".parse().unwrap();
            assert_eq!(rule, RecurrenceRule::Weekly { weekdays: set(&[2]) });
        }

        #[rstest]
        #[case("", CalculationError::EmptyRule)]
        #[case("   ", CalculationError::EmptyRule)]
        #[case("d", CalculationError::MissingRuleParameter("d".to_string()))]
        #[case("w", CalculationError::MissingRuleParameter("w".to_string()))]
        #[case("m", CalculationError::MissingRuleParameter("m".to_string()))]
        #[case("x 1", CalculationError::UnsupportedRuleKind("x".to_string()))]
        #[case("D 1", CalculationError::UnsupportedRuleKind("D".to_string()))]
        fn test_structural_errors(#[case] input: &str, #[case] expected: CalculationError) {
            assert_eq!(input.parse::<RecurrenceRule>().unwrap_err(), expected);
        }

        #[rstest]
        #[case("d 0")]
        #[case("d 401")]
        #[case("d 500")]
        #[case("d -3")]
        #[case("d seven")]
        #[case("d 1 2")]
        #[case("w 0")]
        #[case("w 8")]
        #[case("w 1,,2")]
        #[case("w mon")]
        #[case("m 0")]
        #[case("m 32")]
        #[case("m -3")]
        #[case("m 1 0")]
        #[case("m 1 13")]
        #[case("m 1 jan")]
        #[case("m 31 2")]
        #[case("m 30,31 2")]
        #[case("m 31 4,6,9,11")]
        #[case("y 1")]
        fn test_invalid_parameters(#[case] input: &str) {
            assert!(matches!(
                input.parse::<RecurrenceRule>(),
                Err(CalculationError::InvalidRuleParameter(_))
            ));
        }
    }

    mod display {
        use super::*;

        #[rstest]
        #[case("d 7", "d 7")]
        #[case("w 7,1", "w 1,7")]
        #[case("m -1,1,-2", "m 1,-1,-2")]
        #[case("m 15 12,1", "m 15 1,12")]
        #[case("m 15 1,2,3,4,5,6,7,8,9,10,11,12", "m 15")]
        #[case("y", "y")]
        fn test_canonical_form(#[case] input: &str, #[case] expected: &str) {
            let rule: RecurrenceRule = input.parse().unwrap();
            assert_eq!(rule.to_string(), expected);
            assert_eq!(expected.parse::<RecurrenceRule>().unwrap(), rule);
        }

        #[test]
        fn test_describe() {
            assert_eq!("d 1".parse::<RecurrenceRule>().unwrap().describe(), "every day");
            assert_eq!("w 1,5".parse::<RecurrenceRule>().unwrap().describe(), "weekly on Mon, Fri");
            assert_eq!(
                "m 1,-1 3".parse::<RecurrenceRule>().unwrap().describe(),
                "monthly on day 1, last in Mar"
            );
        }
    }

    mod validation {
        use super::*;

        #[rstest]
        #[case("")]
        #[case("d 1")]
        #[case("d 400")]
        #[case("w 1,2,3,4,5,6,7")]
        #[case("w 1 trailing")]
        #[case("m -1")]
        #[case("m 1,31 1,12")]
        #[case("m 29 2")]
        #[case("y")]
        fn test_accepts(#[case] input: &str) {
            assert_eq!(validate(input), Ok(()));
        }

        #[rstest]
        #[case("d")]
        #[case("d 401")]
        #[case("d 1 1")]
        #[case("w 8")]
        #[case("m 0")]
        #[case("m 1 13")]
        #[case("y 2")]
        #[case(" ")]
        fn test_rejects_invalid_rule(#[case] input: &str) {
            assert!(matches!(validate(input), Err(ValidationError::InvalidRule(_))));
        }

        #[test]
        fn test_unknown_kind() {
            assert_eq!(
                validate("q 1"),
                Err(ValidationError::UnknownRuleKind("q".to_string()))
            );
        }

        #[test]
        fn test_is_idempotent() {
            for input in ["d 3", "m 1 13", "x", ""] {
                assert_eq!(validate(input), validate(input));
            }
        }
    }

    #[test]
    fn test_month_days_matches_last_and_second_to_last() {
        let days = MonthDays { days: set(&[10]), last: true, second_to_last: true };
        assert!(days.matches(10, 30));
        assert!(days.matches(30, 30));
        assert!(days.matches(29, 30));
        assert!(!days.matches(28, 30));
        assert!(days.matches(28, 28));
        assert!(days.matches(27, 28));
    }
}

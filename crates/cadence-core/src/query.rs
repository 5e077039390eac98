use chrono::NaiveDate;

use crate::date::parse_search_date;

/// Number of tasks returned by a listing unless told otherwise.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// What a task listing should match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
    All,
    /// Tasks scheduled on exactly this day.
    Date(NaiveDate),
    /// Tasks whose title or comment contains this text.
    Text(String),
}

impl Search {
    /// Interprets a free-form search term.
    ///
    /// A term written as `DD.MM.YYYY` selects a day, a blank term selects
    /// everything, anything else is a substring search.
    pub fn parse(term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            Search::All
        } else if let Some(date) = parse_search_date(term) {
            Search::Date(date)
        } else {
            Search::Text(term.to_string())
        }
    }
}

/// Builds a `LIKE` pattern matching `text` anywhere, escaping wildcards with `\`.
pub fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        assert_eq!(Search::parse(""), Search::All);
        assert_eq!(Search::parse("   "), Search::All);
        assert_eq!(
            Search::parse("08.02.2024"),
            Search::Date(NaiveDate::from_ymd_opt(2024, 2, 8).unwrap())
        );
        assert_eq!(Search::parse(" gym "), Search::Text("gym".to_string()));
        assert_eq!(Search::parse("31.02.2024"), Search::Text("31.02.2024".to_string()));
        assert_eq!(Search::parse("8.2.2024"), Search::Text("8.2.2024".to_string()));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("gym"), "%gym%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}

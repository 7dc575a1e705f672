//! Filter evaluation against stored string values.
//!
//! Mirrors how the vendor compares Data Extension columns: values are
//! strings, compared as decimals when both sides are numeric, as dates when
//! both sides are dates, and lexically otherwise.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Datelike;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::api::query::Filter;
use crate::api::query::Operator;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Returns `true` if a column holding `actual` satisfies `filter`.
///
/// An absent column is treated as an empty string, which is also what
/// `isNull` tests for.
///
/// # Example
///
/// ```
/// use sfmc_lib::api::query::{Filter, Operator};
/// use sfmc_lib::backend::matches;
///
/// assert!(matches(&Filter::new("Age", Operator::GreaterThan, "9"), Some("10")));
/// assert!(matches(&Filter::is_null("Phone"), None));
/// ```
pub fn matches(filter: &Filter, actual: Option<&str>) -> bool {
    let actual = actual.unwrap_or("");
    let value = filter.value();

    match filter.operator() {
        Operator::Equals => equals(actual, value),
        Operator::NotEquals => !equals(actual, value),
        Operator::GreaterThan => compare(actual, value) == Some(Ordering::Greater),
        Operator::GreaterThanOrEqual => {
            matches!(compare(actual, value), Some(Ordering::Greater | Ordering::Equal))
        }
        Operator::LessThan => compare(actual, value) == Some(Ordering::Less),
        Operator::LessThanOrEqual => {
            matches!(compare(actual, value), Some(Ordering::Less | Ordering::Equal))
        }
        Operator::IsNull => actual.is_empty(),
        Operator::IsNotNull => !actual.is_empty(),
        Operator::BeginsWith => lower(actual).starts_with(&lower(value)),
        Operator::EndsWith => lower(actual).ends_with(&lower(value)),
        Operator::Contains | Operator::ExistsInString => lower(actual).contains(&lower(value)),
        Operator::NotContains | Operator::NotExistsInString => {
            !lower(actual).contains(&lower(value))
        }
        Operator::Like => like(&lower(actual), &lower(value)),
        Operator::ExistsInStringAsAWord => contains_word(&lower(actual), &lower(value)),
        Operator::In => value.split(',').any(|v| equals(actual, v.trim())),
        Operator::Between => match value.split_once(',') {
            Some((low, high)) => {
                let above = compare(actual, low.trim());
                let below = compare(actual, high.trim());
                matches!(above, Some(Ordering::Greater | Ordering::Equal))
                    && matches!(below, Some(Ordering::Less | Ordering::Equal))
            }
            None => false,
        },
        Operator::IsAnniversary => anniversary(actual, value) == Some(Ordering::Equal),
        Operator::IsNotAnniversary => {
            matches!(anniversary(actual, value), Some(Ordering::Less | Ordering::Greater))
        }
        Operator::GreaterThanAnniversary => anniversary(actual, value) == Some(Ordering::Greater),
        Operator::LessThanAnniversary => anniversary(actual, value) == Some(Ordering::Less),
    }
}

fn lower(s: &str) -> String {
    s.to_lowercase()
}

fn equals(actual: &str, value: &str) -> bool {
    match (Decimal::from_str(actual), Decimal::from_str(value)) {
        (Ok(a), Ok(b)) => a == b,
        _ => actual == value,
    }
}

/// Orders two values; `None` when either side is empty.
fn compare(actual: &str, value: &str) -> Option<Ordering> {
    if actual.is_empty() || value.is_empty() {
        return None;
    }
    if let (Ok(a), Ok(b)) = (Decimal::from_str(actual), Decimal::from_str(value)) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (parse_date(actual), parse_date(value)) {
        return Some(a.cmp(&b));
    }
    Some(actual.cmp(value))
}

/// Orders two dates by month and day only.
fn anniversary(actual: &str, value: &str) -> Option<Ordering> {
    let a = parse_date(actual)?;
    let b = parse_date(value)?;
    Some((a.month(), a.day()).cmp(&(b.month(), b.day())))
}

fn parse_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// SQL-style `LIKE`: `%` matches any run, `_` matches one character.
fn like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    // dp[j]: pattern[..i] matches text[..j]
    let mut dp = vec![false; text.len() + 1];
    dp[0] = true;

    for p in &pattern {
        let mut next = vec![false; text.len() + 1];
        match p {
            '%' => {
                let mut any = false;
                for j in 0..=text.len() {
                    any |= dp[j];
                    next[j] = any;
                }
            }
            '_' => {
                for j in 1..=text.len() {
                    next[j] = dp[j - 1];
                }
            }
            c => {
                for j in 1..=text.len() {
                    next[j] = dp[j - 1] && text[j - 1] == *c;
                }
            }
        }
        dp = next;
    }

    dp[text.len()]
}

fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let is_word_char = |c: char| c.is_alphanumeric() || c == '_';

    text.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

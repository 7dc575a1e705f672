//! Filter conditions for data extension queries.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::QueryError;

/// A comparison operator supported by the Data Extension API.
///
/// The set is closed: every variant maps to exactly one vendor tag, and
/// [`FromStr`] rejects anything else with [`QueryError::InvalidOperator`].
///
/// # Example
///
/// ```
/// use sfmc_lib::api::query::Operator;
///
/// let op: Operator = "notEquals".parse().unwrap();
/// assert_eq!(op, Operator::NotEquals);
/// assert_eq!(op.as_str(), "notEquals");
///
/// // Short aliases are accepted as well
/// assert_eq!("eq".parse::<Operator>().unwrap(), Operator::Equals);
///
/// assert!("sortOf".parse::<Operator>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "notEquals")]
    NotEquals,
    #[serde(rename = "greaterThan")]
    GreaterThan,
    #[serde(rename = "greaterThanOrEqual")]
    GreaterThanOrEqual,
    #[serde(rename = "lessThan")]
    LessThan,
    #[serde(rename = "lessThanOrEqual")]
    LessThanOrEqual,
    #[serde(rename = "isNull")]
    IsNull,
    #[serde(rename = "isNotNull")]
    IsNotNull,
    #[serde(rename = "beginsWith")]
    BeginsWith,
    #[serde(rename = "endsWith")]
    EndsWith,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "notContains")]
    NotContains,
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "existsInString")]
    ExistsInString,
    #[serde(rename = "existsInStringAsAWord")]
    ExistsInStringAsAWord,
    #[serde(rename = "notExistsInString")]
    NotExistsInString,
    /// Set membership; the value is a comma-separated list.
    #[serde(rename = "IN")]
    In,
    /// Inclusive range; the value is `low,high`.
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "isAnniversary")]
    IsAnniversary,
    #[serde(rename = "isNotAnniversary")]
    IsNotAnniversary,
    #[serde(rename = "greaterThanAnniversary")]
    GreaterThanAnniversary,
    #[serde(rename = "lessThanAnniversary")]
    LessThanAnniversary,
}

impl Operator {
    /// Every supported operator, in vendor documentation order.
    pub const ALL: [Operator; 22] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::IsNull,
        Operator::IsNotNull,
        Operator::BeginsWith,
        Operator::EndsWith,
        Operator::Contains,
        Operator::NotContains,
        Operator::Like,
        Operator::ExistsInString,
        Operator::ExistsInStringAsAWord,
        Operator::NotExistsInString,
        Operator::In,
        Operator::Between,
        Operator::IsAnniversary,
        Operator::IsNotAnniversary,
        Operator::GreaterThanAnniversary,
        Operator::LessThanAnniversary,
    ];

    /// Returns the vendor tag for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::GreaterThan => "greaterThan",
            Operator::GreaterThanOrEqual => "greaterThanOrEqual",
            Operator::LessThan => "lessThan",
            Operator::LessThanOrEqual => "lessThanOrEqual",
            Operator::IsNull => "isNull",
            Operator::IsNotNull => "isNotNull",
            Operator::BeginsWith => "beginsWith",
            Operator::EndsWith => "endsWith",
            Operator::Contains => "contains",
            Operator::NotContains => "notContains",
            Operator::Like => "like",
            Operator::ExistsInString => "existsInString",
            Operator::ExistsInStringAsAWord => "existsInStringAsAWord",
            Operator::NotExistsInString => "notExistsInString",
            Operator::In => "IN",
            Operator::Between => "between",
            Operator::IsAnniversary => "isAnniversary",
            Operator::IsNotAnniversary => "isNotAnniversary",
            Operator::GreaterThanAnniversary => "greaterThanAnniversary",
            Operator::LessThanAnniversary => "lessThanAnniversary",
        }
    }

    /// Returns `false` for operators whose value is ignored by the backend.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Operator::IsNull | Operator::IsNotNull)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(op) = Operator::ALL.iter().find(|op| op.as_str() == s) {
            return Ok(*op);
        }

        // Short aliases
        match s {
            "eq" => Ok(Operator::Equals),
            "ne" => Ok(Operator::NotEquals),
            "gt" => Ok(Operator::GreaterThan),
            "ge" | "gte" => Ok(Operator::GreaterThanOrEqual),
            "lt" => Ok(Operator::LessThan),
            "le" | "lte" => Ok(Operator::LessThanOrEqual),
            _ => Err(QueryError::invalid_operator(s)),
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = QueryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A single comparison: `column operator value`.
///
/// Filters are immutable once constructed. Nothing is normalized, trimmed
/// or escaped here; escaping is the backend's job.
///
/// # Example
///
/// ```
/// use sfmc_lib::api::query::{Filter, Operator};
///
/// let filter = Filter::new("Email", Operator::Equals, "a@x.com");
/// assert_eq!(filter.column(), "Email");
///
/// // Dynamically-checked construction
/// let filter = Filter::parse("Status", "notEquals", "bounced").unwrap();
/// assert_eq!(filter.operator(), Operator::NotEquals);
///
/// assert!(Filter::parse("Status", "roughly", "bounced").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    column_name: String,
    operator: Operator,
    value: String,
}

impl Filter {
    /// Creates a filter from a typed operator.
    pub fn new(column: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            column_name: column.into(),
            operator,
            value: value.into(),
        }
    }

    /// Creates a filter from an operator tag, rejecting unsupported tags.
    pub fn parse(
        column: impl Into<String>,
        operator: &str,
        value: impl Into<String>,
    ) -> Result<Self, QueryError> {
        Ok(Self::new(column, operator.parse()?, value))
    }

    /// Creates an equality filter.
    pub fn equals(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Operator::Equals, value)
    }

    /// Creates a not-equal filter.
    pub fn not_equals(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Operator::NotEquals, value)
    }

    /// Creates an is-null filter. The value is empty.
    pub fn is_null(column: impl Into<String>) -> Self {
        Self::new(column, Operator::IsNull, "")
    }

    /// Creates an is-not-null filter. The value is empty.
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::new(column, Operator::IsNotNull, "")
    }

    /// Creates a set-membership filter from the given values.
    pub fn is_in<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        Self::new(column, Operator::In, joined)
    }

    /// Creates an inclusive range filter.
    pub fn between(column: impl Into<String>, low: impl AsRef<str>, high: impl AsRef<str>) -> Self {
        let value = format!("{},{}", low.as_ref(), high.as_ref());
        Self::new(column, Operator::Between, value)
    }

    /// Returns the column name.
    pub fn column(&self) -> &str {
        &self.column_name
    }

    /// Returns the operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the raw comparison value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator.takes_value() {
            write!(f, "{} {} '{}'", self.column_name, self.operator, self.value)
        } else {
            write!(f, "{} {}", self.column_name, self.operator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_tags_round_trip() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("eq".parse::<Operator>().unwrap(), Operator::Equals);
        assert_eq!("ne".parse::<Operator>().unwrap(), Operator::NotEquals);
        assert_eq!("gte".parse::<Operator>().unwrap(), Operator::GreaterThanOrEqual);
        assert_eq!("le".parse::<Operator>().unwrap(), Operator::LessThanOrEqual);
    }

    #[test]
    fn test_invalid_operator() {
        let err = Filter::parse("Email", "matches", "x").unwrap_err();
        assert_eq!(err, QueryError::invalid_operator("matches"));
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!("Equals".parse::<Operator>().is_err());
        assert!("in".parse::<Operator>().is_err());
        assert_eq!("IN".parse::<Operator>().unwrap(), Operator::In);
    }

    #[test]
    fn test_value_passed_through() {
        let filter = Filter::equals("  Name ", " O'Brien ");
        assert_eq!(filter.column(), "  Name ");
        assert_eq!(filter.value(), " O'Brien ");
    }

    #[test]
    fn test_in_and_between_values() {
        assert_eq!(Filter::is_in("Status", ["a", "b", "c"]).value(), "a,b,c");
        assert_eq!(Filter::between("Age", "18", "65").value(), "18,65");
    }

    #[test]
    fn test_serializes_with_vendor_tag() {
        let json = serde_json::to_value(Filter::new("Id", Operator::In, "1,2")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "columnName": "Id", "operator": "IN", "value": "1,2" })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Filter::equals("Email", "a@x.com").to_string(),
            "Email equals 'a@x.com'"
        );
        assert_eq!(Filter::is_null("Phone").to_string(), "Phone isNull");
    }
}

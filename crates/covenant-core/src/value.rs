use crate::types::{Date, Decimal, Timestamp, Ulid};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

///
/// DataType
///
/// The value slot a term template declares. Determines which `Value`
/// variant a dynamic term may populate and which rule kinds apply.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Boolean,
    Date,
    Json,
    Numeric,
    Text,
}

impl DataType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Json => "JSON",
            Self::Numeric => "NUMERIC",
            Self::Text => "TEXT",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Value
///
/// The single tagged runtime value: term candidates, stored term values,
/// and filter operands all flow through here. Replaces the one-column-per-
/// type storage shape with an explicit sum type.
///

#[remain::sorted]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Bool(bool),
    Date(Date),
    Decimal(Decimal),
    Id(Ulid),
    Json(serde_json::Value),
    List(Vec<Value>),
    Null,
    Text(String),
    Timestamp(Timestamp),
}

impl Value {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Date(_) => "date",
            Self::Decimal(_) => "decimal",
            Self::Id(_) => "id",
            Self::Json(_) => "json",
            Self::List(_) => "list",
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Null, whitespace-only text, an empty list, or JSON null.
    /// The REQUIRED rule treats all of these as absent.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Json(v) => v.is_null(),
            _ => false,
        }
    }

    /// Whether this value may populate a slot of the given type.
    /// `Null` fits every slot; absence is typed by the template, not the row.
    #[must_use]
    pub const fn matches(&self, data_type: DataType) -> bool {
        matches!(
            (self, data_type),
            (Self::Null, _)
                | (Self::Text(_), DataType::Text)
                | (Self::Decimal(_), DataType::Numeric)
                | (Self::Bool(_), DataType::Boolean)
                | (Self::Date(_), DataType::Date)
                | (Self::Json(_), DataType::Json)
        )
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Ordering within a tag; values of different tags do not compare.
    #[must_use]
    pub fn partial_cmp_value(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::Decimal(a), Self::Decimal(b)) => Some(a.cmp(b)),
            (Self::Id(a), Self::Id(b)) => Some(a.cmp(b)),
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => b.fmt(f),
            Self::Date(d) => d.fmt(f),
            Self::Decimal(d) => d.fmt(f),
            Self::Id(u) => u.fmt(f),
            Self::Json(v) => v.fmt(f),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("null"),
            Self::Text(s) => s.fmt(f),
            Self::Timestamp(t) => t.fmt(f),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Decimal(Decimal::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Decimal(Decimal::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Date> for Value {
    fn from(d: Date) -> Self {
        Self::Date(d)
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Self {
        Self::Timestamp(t)
    }
}

impl From<Ulid> for Value {
    fn from(u: Ulid) -> Self {
        Self::Id(u)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(v: &str) -> Decimal {
        Decimal::from_str(v).unwrap()
    }

    #[test]
    fn null_matches_every_slot() {
        for dt in [
            DataType::Boolean,
            DataType::Date,
            DataType::Json,
            DataType::Numeric,
            DataType::Text,
        ] {
            assert!(Value::Null.matches(dt));
        }
    }

    #[test]
    fn populated_values_match_only_their_slot() {
        assert!(Value::Text("x".into()).matches(DataType::Text));
        assert!(!Value::Text("x".into()).matches(DataType::Numeric));
        assert!(Value::Decimal(dec("1.5")).matches(DataType::Numeric));
        assert!(!Value::Decimal(dec("1.5")).matches(DataType::Text));
        assert!(Value::Bool(true).matches(DataType::Boolean));
        assert!(Value::Json(serde_json::json!({"a": 1})).matches(DataType::Json));
    }

    #[test]
    fn blankness() {
        assert!(Value::Null.is_blank());
        assert!(Value::Text("   ".into()).is_blank());
        assert!(Value::List(vec![]).is_blank());
        assert!(Value::Json(serde_json::Value::Null).is_blank());
        assert!(!Value::Text("x".into()).is_blank());
        assert!(!Value::Bool(false).is_blank());
        assert!(!Value::Decimal(Decimal::ZERO).is_blank());
    }

    #[test]
    fn same_tag_ordering() {
        assert_eq!(
            Value::Decimal(dec("1")).partial_cmp_value(&Value::Decimal(dec("2"))),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::Text("b".into()).partial_cmp_value(&Value::Text("a".into())),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn cross_tag_ordering_is_undefined() {
        assert_eq!(
            Value::Text("1".into()).partial_cmp_value(&Value::Decimal(dec("1"))),
            None
        );
    }

    #[test]
    fn display_is_terse() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Decimal(dec("1.50")).to_string(), "1.50");
        assert_eq!(Value::Text("hi".into()).to_string(), "hi");
    }
}

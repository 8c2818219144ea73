use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal values a condition compares against
///
/// Dates and timestamps serialize as strings; when a tree is read back from
/// JSON they arrive as `String` and are coerced against the schema when the
/// predicate is compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Literal>),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl Literal {
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Literal]> {
        match self {
            Literal::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the literal kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Boolean(_) => "boolean",
            Literal::Int(_) => "integer",
            Literal::Float(_) => "float",
            Literal::String(_) => "string",
            Literal::List(_) => "list",
            Literal::Date(_) => "date",
            Literal::Timestamp(_) => "timestamp",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(n) => write!(f, "{n}"),
            Literal::String(s) => write!(f, "\"{s}\""),
            Literal::List(items) => {
                let rendered = items
                    .iter()
                    .map(|item| item.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{rendered}]")
            }
            Literal::Date(d) => write!(f, "{d}"),
            Literal::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(value as i64)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<NaiveDate> for Literal {
    fn from(value: NaiveDate) -> Self {
        Literal::Date(value)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(value: DateTime<Utc>) -> Self {
        Literal::Timestamp(value)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Null, Into::into)
    }
}

impl<T: Into<Literal>> From<Vec<T>> for Literal {
    fn from(values: Vec<T>) -> Self {
        Literal::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_display() {
        assert_eq!(format!("{}", Literal::from("hello")), "\"hello\"");
        assert_eq!(format!("{}", Literal::Float(42.5)), "42.5");
        assert_eq!(format!("{}", Literal::Boolean(true)), "true");
        assert_eq!(format!("{}", Literal::Null), "null");
        assert_eq!(format!("{}", Literal::from(vec![1, 2])), "[1, 2]");
    }

    #[test]
    fn test_literal_from_json() {
        let parsed: Vec<Literal> =
            serde_json::from_str(r#"[null, true, 3, 2.5, "x", ["a", 1]]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Literal::Null,
                Literal::Boolean(true),
                Literal::Int(3),
                Literal::Float(2.5),
                Literal::from("x"),
                Literal::List(vec![Literal::from("a"), Literal::Int(1)]),
            ]
        );
    }

    #[test]
    fn test_date_literal_serializes_as_string() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let json = serde_json::to_string(&Literal::Date(date)).unwrap();
        assert_eq!(json, "\"2024-01-31\"");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Literal::from(None::<i64>), Literal::Null);
        assert_eq!(Literal::from(Some("a")), Literal::from("a"));
    }
}

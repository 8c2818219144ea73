use crate::core::{data_type::DataType, value::Value};
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::str::FromStr;
use uuid::Uuid;

const NAIVE_TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Parse a textual scalar as the given type.
///
/// Timestamps accept RFC 3339, naive date-times (taken as UTC) and plain
/// dates (midnight UTC).
pub fn parse_scalar(raw: &str, data_type: &DataType) -> Result<Value, String> {
    match data_type {
        DataType::String => Ok(Value::String(raw.to_string())),
        DataType::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Boolean(true)),
            "false" => Ok(Value::Boolean(false)),
            _ => Err("expected 'true' or 'false'".to_string()),
        },
        DataType::Int => raw.parse::<i64>().map(Value::Int).map_err(|e| e.to_string()),
        DataType::Float => raw.parse::<f64>().map(Value::Float).map_err(|e| e.to_string()),
        DataType::Decimal => BigDecimal::from_str(raw)
            .map(Value::Decimal)
            .map_err(|e| e.to_string()),
        DataType::Date => parse_date(raw).map(Value::Date),
        DataType::Timestamp => parse_timestamp(raw).map(Value::Timestamp),
        DataType::Uuid => Uuid::parse_str(raw).map(Value::Uuid).map_err(|e| e.to_string()),
        DataType::List(_) | DataType::Record(_) => {
            Err(format!("{data_type} cannot be parsed from text"))
        }
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| e.to_string())
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    parse_date(raw)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("'{raw}' is not an RFC 3339 timestamp"))
}

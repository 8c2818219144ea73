use crate::{
    core::{data_type::DataType, errors::ConversionError, parse::parse_scalar, value::Value},
    records::{record::Record, schema::Schema},
};
use bigdecimal::BigDecimal;
use serde_json::Value as JsonValue;
use std::str::FromStr;

impl Value {
    /// Converts a JSON value into a typed value.
    ///
    /// JSON `null` becomes `Value::Null` for every type. Dates, timestamps,
    /// uuids and decimals are read from strings; decimals also accept numbers.
    pub fn from_json(json: &JsonValue, data_type: &DataType) -> Result<Value, ConversionError> {
        convert(json, data_type, "$")
    }
}

impl Record {
    /// Converts a JSON object into a record of the given schema. Fields the
    /// schema does not name are dropped; absent fields stay absent.
    pub fn from_json(json: &JsonValue, schema: &Schema) -> Result<Record, ConversionError> {
        convert_record(json, schema, "$")
    }
}

fn convert(json: &JsonValue, data_type: &DataType, location: &str) -> Result<Value, ConversionError> {
    if json.is_null() {
        return Ok(Value::Null);
    }

    match (data_type, json) {
        (DataType::Boolean, JsonValue::Bool(b)) => Ok(Value::Boolean(*b)),
        (DataType::Int, JsonValue::Number(n)) => n
            .as_i64()
            .map(Value::Int)
            .ok_or_else(|| mismatch(location, data_type, json)),
        (DataType::Float, JsonValue::Number(n)) => n
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| mismatch(location, data_type, json)),
        (DataType::Decimal, JsonValue::Number(n)) => BigDecimal::from_str(&n.to_string())
            .map(Value::Decimal)
            .map_err(|e| parse_error(location, &n.to_string(), data_type, e.to_string())),
        (DataType::String, JsonValue::String(s)) => Ok(Value::String(s.clone())),
        (
            DataType::Decimal | DataType::Date | DataType::Timestamp | DataType::Uuid,
            JsonValue::String(s),
        ) => parse_scalar(s, data_type).map_err(|message| parse_error(location, s, data_type, message)),
        (DataType::List(element), JsonValue::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| convert(item, element, &format!("{location}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        (DataType::Record(schema), JsonValue::Object(_)) => {
            convert_record(json, schema, location).map(Value::Record)
        }
        _ => Err(mismatch(location, data_type, json)),
    }
}

fn convert_record(json: &JsonValue, schema: &Schema, location: &str) -> Result<Record, ConversionError> {
    let JsonValue::Object(object) = json else {
        return Err(ConversionError::TypeMismatch {
            location: location.to_string(),
            expected: format!("record {}", schema.name),
            found: json_kind(json).to_string(),
        });
    };

    let mut record = Record::default();
    for field in &schema.fields {
        let Some(raw) = object.get(&field.name) else {
            continue;
        };
        let value = convert(raw, &field.data_type, &format!("{location}.{}", field.name))?;
        record.set(&field.name, value);
    }
    Ok(record)
}

fn mismatch(location: &str, expected: &DataType, found: &JsonValue) -> ConversionError {
    ConversionError::TypeMismatch {
        location: location.to_string(),
        expected: expected.to_string(),
        found: json_kind(found).to_string(),
    }
}

fn parse_error(location: &str, value: &str, expected: &DataType, message: String) -> ConversionError {
    ConversionError::Parse {
        location: location.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
        message,
    }
}

fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

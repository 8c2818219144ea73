use crate::core::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

/// A record: named field values, possibly nesting further records and lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Record {
    pub field_values: Vec<FieldValue>,
}

impl Record {
    /// Adds or replaces a field.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.field_values.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value,
            None => self.field_values.push(FieldValue {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Looks a field up by exact name, then ASCII case-insensitively.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.get_exact(field).or_else(|| {
            self.field_values
                .iter()
                .find(|f| f.name.eq_ignore_ascii_case(field))
                .map(|f| &f.value)
        })
    }

    /// Looks a field up by its exact name only.
    pub fn get_exact(&self, field: &str) -> Option<&Value> {
        self.field_values
            .iter()
            .find(|f| f.name == field)
            .map(|f| &f.value)
    }

    /// Structural equality by field name; absent fields count as null.
    pub fn equal(&self, other: &Record) -> bool {
        let covers = |a: &Record, b: &Record| {
            a.field_values
                .iter()
                .all(|f| f.value.equal(b.get(&f.name).unwrap_or(&Value::Null)))
        };
        covers(self, other) && covers(other, self)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .field_values
            .iter()
            .map(|fv| format!("{}: {}", fv.name, fv.value))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{rendered}}}")
    }
}

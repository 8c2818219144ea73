use crate::records::schema::Schema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Static type of a record field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Boolean,
    Int,
    Float,
    Decimal,
    String,
    Date,
    Timestamp,
    Uuid,
    List(Box<DataType>),
    Record(Schema),
}

impl DataType {
    pub fn list_of(element: DataType) -> Self {
        DataType::List(Box::new(element))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int | DataType::Float | DataType::Decimal)
    }

    /// Types the ordering operators accept: numbers, dates and timestamps.
    pub fn is_ordered(&self) -> bool {
        self.is_numeric() || matches!(self, DataType::Date | DataType::Timestamp)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DataType::String)
    }

    pub fn element_type(&self) -> Option<&DataType> {
        match self {
            DataType::List(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Schema> {
        match self {
            DataType::Record(schema) => Some(schema),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "boolean"),
            DataType::Int => write!(f, "int"),
            DataType::Float => write!(f, "float"),
            DataType::Decimal => write!(f, "decimal"),
            DataType::String => write!(f, "string"),
            DataType::Date => write!(f, "date"),
            DataType::Timestamp => write!(f, "timestamp"),
            DataType::Uuid => write!(f, "uuid"),
            DataType::List(element) => write!(f, "list<{element}>"),
            DataType::Record(schema) => write!(f, "record {}", schema.name),
        }
    }
}

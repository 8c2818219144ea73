use crate::core::data_type::DataType;
use serde::{Deserialize, Serialize};

/// Named field of a record type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub data_type: DataType,
}

/// Field layout of a record type
///
/// Every field is nullable. Lookups try an exact name match first and fall
/// back to an ASCII case-insensitive match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: &str, data_type: DataType) -> Self {
        self.fields.push(FieldDef {
            name: name.to_string(),
            data_type,
        });
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .or_else(|| self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name)))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn into_type(self) -> DataType {
        DataType::Record(self)
    }
}

pub mod core;
pub mod entity;
pub mod records;

pub use crate::core::{data_type::DataType, errors::ConversionError, value::Value};
pub use entity::Filterable;
pub use records::{
    record::{FieldValue, Record},
    schema::{FieldDef, Schema},
};

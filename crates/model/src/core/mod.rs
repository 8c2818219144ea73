pub mod data_type;
pub mod errors;
pub mod json;
pub mod parse;
pub mod value;

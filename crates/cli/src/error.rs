use model::ConversionError;
use predicate_engine::FilterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read '{path}' as JSON: {source}")]
    JsonFile {
        path: String,
        source: serde_json::Error,
    },

    #[error("Record on line {line} is not valid JSON: {source}")]
    RecordJson {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Record on line {line} does not match the schema: {source}")]
    RecordShape {
        line: usize,
        source: ConversionError,
    },

    #[error("Failed to compile the filter: {0}")]
    Compile(#[from] FilterError),

    #[error("Configuration error: {0}")]
    Config(String),
}

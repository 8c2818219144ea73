use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Expected {expected} at '{location}', found {found}")]
    TypeMismatch {
        location: String,
        expected: String,
        found: String,
    },

    #[error("Failed to parse '{value}' as {expected} at '{location}': {message}")]
    Parse {
        location: String,
        value: String,
        expected: String,
        message: String,
    },
}

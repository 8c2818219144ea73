use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
}

impl SyntaxError {
    pub fn malformed_path(path: &str, reason: impl Into<String>) -> Self {
        SyntaxError::MalformedPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

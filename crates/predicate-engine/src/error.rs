use filter_syntax::{CombineOperator, FilterOperator};
use std::fmt;
use thiserror::Error;

/// Position of a node in the filter tree: the child indices leading to it
/// from the root. A quantifier's sub-filter is child 0 of its condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeLocation(Vec<usize>);

impl NodeLocation {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Schema mismatch at node {location} (path '{path}', operator {operator}): {reason}")]
    SchemaMismatch {
        location: NodeLocation,
        path: String,
        operator: FilterOperator,
        reason: String,
    },

    #[error("Malformed path '{path}' at node {location} (operator {operator}): {reason}")]
    MalformedPath {
        location: NodeLocation,
        path: String,
        operator: FilterOperator,
        reason: String,
    },

    #[error("Unsupported combination at node {location} (path '{path}', operator {operator}): {reason}")]
    UnsupportedCombination {
        location: NodeLocation,
        path: String,
        operator: FilterOperator,
        reason: String,
    },

    #[error("Invalid pattern '{pattern}' at node {location} (path '{path}', operator {operator}): {reason}")]
    InvalidPattern {
        location: NodeLocation,
        path: String,
        operator: FilterOperator,
        pattern: String,
        reason: String,
    },

    #[error("Empty {combinator} group at node {location}")]
    EmptyGroup {
        location: NodeLocation,
        combinator: CombineOperator,
    },
}

impl FilterError {
    /// Location of the node that failed to compile.
    pub fn location(&self) -> &NodeLocation {
        match self {
            FilterError::SchemaMismatch { location, .. }
            | FilterError::MalformedPath { location, .. }
            | FilterError::UnsupportedCombination { location, .. }
            | FilterError::InvalidPattern { location, .. }
            | FilterError::EmptyGroup { location, .. } => location,
        }
    }

    /// Path of the offending condition; `None` for group errors.
    pub fn path(&self) -> Option<&str> {
        match self {
            FilterError::SchemaMismatch { path, .. }
            | FilterError::MalformedPath { path, .. }
            | FilterError::UnsupportedCombination { path, .. }
            | FilterError::InvalidPattern { path, .. } => Some(path),
            FilterError::EmptyGroup { .. } => None,
        }
    }

    pub fn operator(&self) -> Option<FilterOperator> {
        match self {
            FilterError::SchemaMismatch { operator, .. }
            | FilterError::MalformedPath { operator, .. }
            | FilterError::UnsupportedCombination { operator, .. }
            | FilterError::InvalidPattern { operator, .. } => Some(*operator),
            FilterError::EmptyGroup { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;

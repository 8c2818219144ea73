use crate::errors::SyntaxError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Comparison operators available to a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    Equal,
    NotEqual,
    GreaterOrEqual,
    LessOrEqual,
    GreaterThan,
    LessThan,
    StartsWith,
    EndsWith,
    DoesNotStartWith,
    DoesNotEndWith,
    Contains,
    DoesNotContain,
    IsNull,
    NotNull,
    Matches,
    DoesNotMatch,
    In,
    NotIn,
    All,
    Any,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 20] = [
        FilterOperator::Equal,
        FilterOperator::NotEqual,
        FilterOperator::GreaterOrEqual,
        FilterOperator::LessOrEqual,
        FilterOperator::GreaterThan,
        FilterOperator::LessThan,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
        FilterOperator::DoesNotStartWith,
        FilterOperator::DoesNotEndWith,
        FilterOperator::Contains,
        FilterOperator::DoesNotContain,
        FilterOperator::IsNull,
        FilterOperator::NotNull,
        FilterOperator::Matches,
        FilterOperator::DoesNotMatch,
        FilterOperator::In,
        FilterOperator::NotIn,
        FilterOperator::All,
        FilterOperator::Any,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "Equal",
            FilterOperator::NotEqual => "NotEqual",
            FilterOperator::GreaterOrEqual => "GreaterOrEqual",
            FilterOperator::LessOrEqual => "LessOrEqual",
            FilterOperator::GreaterThan => "GreaterThan",
            FilterOperator::LessThan => "LessThan",
            FilterOperator::StartsWith => "StartsWith",
            FilterOperator::EndsWith => "EndsWith",
            FilterOperator::DoesNotStartWith => "DoesNotStartWith",
            FilterOperator::DoesNotEndWith => "DoesNotEndWith",
            FilterOperator::Contains => "Contains",
            FilterOperator::DoesNotContain => "DoesNotContain",
            FilterOperator::IsNull => "IsNull",
            FilterOperator::NotNull => "NotNull",
            FilterOperator::Matches => "Matches",
            FilterOperator::DoesNotMatch => "DoesNotMatch",
            FilterOperator::In => "In",
            FilterOperator::NotIn => "NotIn",
            FilterOperator::All => "All",
            FilterOperator::Any => "Any",
        }
    }

    /// All / Any: the value is a sub-filter applied per collection element.
    pub fn is_quantifier(&self) -> bool {
        matches!(self, FilterOperator::All | FilterOperator::Any)
    }

    pub fn is_null_check(&self) -> bool {
        matches!(self, FilterOperator::IsNull | FilterOperator::NotNull)
    }

    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            FilterOperator::GreaterOrEqual
                | FilterOperator::LessOrEqual
                | FilterOperator::GreaterThan
                | FilterOperator::LessThan
        )
    }

    pub fn is_string_match(&self) -> bool {
        matches!(
            self,
            FilterOperator::StartsWith
                | FilterOperator::EndsWith
                | FilterOperator::DoesNotStartWith
                | FilterOperator::DoesNotEndWith
                | FilterOperator::Contains
                | FilterOperator::DoesNotContain
        )
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, FilterOperator::Matches | FilterOperator::DoesNotMatch)
    }

    pub fn is_membership(&self) -> bool {
        matches!(self, FilterOperator::In | FilterOperator::NotIn)
    }

    /// Every operator except the null checks needs a value.
    pub fn requires_value(&self) -> bool {
        !self.is_null_check()
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FilterOperator {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOperator::ALL
            .iter()
            .find(|op| op.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| SyntaxError::UnknownOperator(s.to_string()))
    }
}

/// Operators combining the children of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CombineOperator {
    #[default]
    And,
    Or,
    Xor,
}

impl CombineOperator {
    /// Result of combining zero children: the identity of the fold.
    pub fn identity(&self) -> bool {
        match self {
            CombineOperator::And => true,
            CombineOperator::Or | CombineOperator::Xor => false,
        }
    }

    pub fn apply(&self, left: bool, right: bool) -> bool {
        match self {
            CombineOperator::And => left && right,
            CombineOperator::Or => left || right,
            CombineOperator::Xor => left ^ right,
        }
    }
}

impl fmt::Display for CombineOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineOperator::And => write!(f, "And"),
            CombineOperator::Or => write!(f, "Or"),
            CombineOperator::Xor => write!(f, "Xor"),
        }
    }
}

impl FromStr for CombineOperator {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(CombineOperator::And),
            "or" => Ok(CombineOperator::Or),
            "xor" => Ok(CombineOperator::Xor),
            _ => Err(SyntaxError::UnknownOperator(s.to_string())),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Default compiled-size limit for `Matches` / `DoesNotMatch` patterns (1 MiB).
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 1 << 20;

/// How groups without children are compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyGroupPolicy {
    /// And yields true; Or and Xor yield false.
    #[default]
    Identity,
    /// Compilation fails with `FilterError::EmptyGroup`.
    Reject,
}

impl FromStr for EmptyGroupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "identity" => Ok(EmptyGroupPolicy::Identity),
            "reject" => Ok(EmptyGroupPolicy::Reject),
            other => Err(format!(
                "Unknown empty group policy '{other}', expected 'identity' or 'reject'"
            )),
        }
    }
}

impl fmt::Display for EmptyGroupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyGroupPolicy::Identity => write!(f, "identity"),
            EmptyGroupPolicy::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileSettings {
    pub empty_groups: EmptyGroupPolicy,
    pub regex_size_limit: usize,
}

impl CompileSettings {
    pub fn with_empty_groups(mut self, policy: EmptyGroupPolicy) -> Self {
        self.empty_groups = policy;
        self
    }

    pub fn with_regex_size_limit(mut self, limit: usize) -> Self {
        self.regex_size_limit = limit;
        self
    }
}

impl Default for CompileSettings {
    fn default() -> Self {
        Self {
            empty_groups: EmptyGroupPolicy::default(),
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

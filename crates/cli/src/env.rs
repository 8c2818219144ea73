use std::collections::HashMap;
use std::fs;
use std::path::Path;

use predicate_engine::{CompileSettings, EmptyGroupPolicy};

use crate::error::CliError;
use tracing::warn;

pub const EMPTY_GROUPS_VAR: &str = "SIEVE_EMPTY_GROUPS";
pub const REGEX_SIZE_LIMIT_VAR: &str = "SIEVE_REGEX_SIZE_LIMIT";

/// Environment variable manager that loads from system and .env files
#[derive(Debug, Clone)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn new() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Load variables from a .env file; they override the process environment.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read env file {}: {}", path.display(), e))
        })?;

        self.parse_env_content(&content)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Compile settings from `SIEVE_EMPTY_GROUPS` and `SIEVE_REGEX_SIZE_LIMIT`,
    /// defaulting whatever is unset.
    pub fn compile_settings(&self) -> Result<CompileSettings, CliError> {
        let mut settings = CompileSettings::default();

        if let Some(raw) = self.get(EMPTY_GROUPS_VAR) {
            let policy = raw
                .parse::<EmptyGroupPolicy>()
                .map_err(|e| CliError::Config(format!("{EMPTY_GROUPS_VAR}: {e}")))?;
            settings = settings.with_empty_groups(policy);
        }

        if let Some(raw) = self.get(REGEX_SIZE_LIMIT_VAR) {
            let limit = raw.trim().parse::<usize>().map_err(|e| {
                CliError::Config(format!("{REGEX_SIZE_LIMIT_VAR}: '{raw}' is not a byte count: {e}"))
            })?;
            if limit == 0 {
                warn!("{REGEX_SIZE_LIMIT_VAR} is 0, keeping the default limit");
            } else {
                settings = settings.with_regex_size_limit(limit);
            }
        }

        Ok(settings)
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), CliError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid env file: malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::Config(format!(
                    "Invalid env file: empty key at line {}",
                    line_num + 1
                )));
            }

            self.vars.insert(key.to_string(), Self::unquote_value(value));
        }

        Ok(())
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        value.to_string()
    }
}

impl Default for EnvManager {
    fn default() -> Self {
        Self::new()
    }
}

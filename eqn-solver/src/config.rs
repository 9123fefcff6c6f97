//! Settings of the solving pipeline, optionally read from a TOML file.

use serde::{Deserialize, Serialize};
use std::{fmt, fs, io, path::Path, time::Duration};
use crate::{format::DisplayMode, variable::VariablePolicy};

/// Settings shared by every request.
///
/// Every field has a default, so an empty TOML file (or none at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Maximum length of the raw input, in characters.
    pub max_input_len: usize,

    /// Wall-clock budget of a single solve, in milliseconds.
    pub deadline_ms: u64,

    /// Which variable names are accepted.
    pub variable_policy: VariablePolicy,

    /// Whether copy payloads show exact or decimal values.
    pub display_mode: DisplayMode,

    /// Log level used by front ends that install a logger.
    pub log_level: String,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_input_len: 500,
            deadline_ms: 4000,
            variable_policy: VariablePolicy::Strict,
            display_mode: DisplayMode::Exact,
            log_level: "warn".to_string(),
        }
    }
}

impl SolverConfig {
    /// Returns the solve deadline.
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::Toml)
    }

    /// Reads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&text)
    }
}

/// Failure to load a [`SolverConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(io::Error),

    /// The file is not valid TOML, or has fields of the wrong type.
    Toml(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read config: {}", err),
            Self::Toml(err) => write!(f, "invalid config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(SolverConfig::from_toml("").unwrap(), SolverConfig::default());
    }

    #[test]
    fn partial_file() {
        let config = SolverConfig::from_toml(r#"
            deadline_ms = 250
            variable_policy = "relaxed"
            display_mode = "decimal"
        "#).unwrap();

        assert_eq!(config.deadline(), Duration::from_millis(250));
        assert_eq!(config.variable_policy, VariablePolicy::Relaxed);
        assert_eq!(config.display_mode, DisplayMode::Decimal);
        assert_eq!(config.max_input_len, 500);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(matches!(SolverConfig::from_toml("deadline = 3"), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn missing_file() {
        let err = SolverConfig::load("/nonexistent/eqn-solver.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

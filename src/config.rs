//! Configuration
//!
//! Defaults for conversion sessions, loaded from an optional TOML file and
//! then overridden from `MEDICION_*` environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::units::Unit;

/// Environment variable naming a config file
pub const CONFIG_PATH_VAR: &str = "MEDICION_CONFIG";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Unit selected as input when a session starts
    pub default_from: Unit,
    /// Unit selected as output when a session starts
    pub default_to: Unit,
    /// Maximum fractional digits shown in results
    pub decimal_places: usize,
    /// Reject conversions between units of different categories
    pub strict_categories: bool,
    /// Number of history entries kept in memory
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_from: Unit::Dbm,
            default_to: Unit::Kilowatts,
            decimal_places: 2,
            strict_categories: true,
            history_limit: 100,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load the config file (explicit path, then `MEDICION_CONFIG`) and apply
    /// environment overrides
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let env_path = std::env::var(CONFIG_PATH_VAR).ok();
        let path = path.or(env_path.as_deref().map(Path::new));

        let mut config = match path {
            Some(p) => {
                tracing::info!("Loading config from {}", p.display());
                Self::load_from_file(p)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `MEDICION_*` overrides from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("MEDICION_DEFAULT_FROM") {
            self.default_from = parse_unit_var("MEDICION_DEFAULT_FROM", &value)?;
        }
        if let Some(value) = lookup("MEDICION_DEFAULT_TO") {
            self.default_to = parse_unit_var("MEDICION_DEFAULT_TO", &value)?;
        }
        if let Some(value) = lookup("MEDICION_DECIMAL_PLACES") {
            self.decimal_places = parse_var("MEDICION_DECIMAL_PLACES", &value)?;
        }
        if let Some(value) = lookup("MEDICION_STRICT") {
            let flag = value.trim().to_lowercase();
            self.strict_categories = match flag.as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "MEDICION_STRICT",
                        value,
                    })
                }
            };
        }
        if let Some(value) = lookup("MEDICION_HISTORY_LIMIT") {
            self.history_limit = parse_var("MEDICION_HISTORY_LIMIT", &value)?;
        }
        Ok(())
    }
}

fn parse_unit_var(key: &'static str, value: &str) -> ConfigResult<Unit> {
    Unit::from_str(value).ok_or_else(|| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_var(key: &'static str, value: &str) -> ConfigResult<usize> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_from, Unit::Dbm);
        assert_eq!(config.default_to, Unit::Kilowatts);
        assert_eq!(config.decimal_places, 2);
        assert!(config.strict_categories);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml(
            r#"
            default_from = "ghz"
            decimal_places = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.default_from, Unit::Ghz);
        assert_eq!(config.default_to, Unit::Kilowatts);
        assert_eq!(config.decimal_places, 4);
    }

    #[test]
    fn test_from_toml_rejects_unknown_unit() {
        let err = Config::from_toml("default_to = \"furlongs\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[
                ("MEDICION_DEFAULT_FROM", "Watts"),
                ("MEDICION_DEFAULT_TO", "dBm"),
                ("MEDICION_DECIMAL_PLACES", "3"),
                ("MEDICION_STRICT", "off"),
                ("MEDICION_HISTORY_LIMIT", "5"),
            ]))
            .unwrap();
        assert_eq!(config.default_from, Unit::Watts);
        assert_eq!(config.default_to, Unit::Dbm);
        assert_eq!(config.decimal_places, 3);
        assert!(!config.strict_categories);
        assert_eq!(config.history_limit, 5);
    }

    #[test]
    fn test_env_override_invalid_value() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup_from(&[("MEDICION_DECIMAL_PLACES", "two")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for MEDICION_DECIMAL_PLACES: 'two'");
    }
}

use thiserror::Error;

use crate::data::loader::KEPLER_ENDPOINT;

pub const SOURCE_VAR: &str = "KEPLER_DASH_SOURCE";
pub const LIMIT_VAR: &str = "KEPLER_DASH_LIMIT";
pub const DEBUG_VAR: &str = "KEPLER_DASH_DEBUG";

/// Records requested from the endpoint when no limit is configured.
pub const DEFAULT_LIMIT: usize = 2000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidLimit { var: &'static str, value: String },
    #[error("{var} must be a boolean flag (1/0, true/false, yes/no, on/off), got '{value}'")]
    InvalidFlag { var: &'static str, value: String },
}

/// Startup settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// URL or local snapshot path the catalogue is loaded from.
    pub source: String,
    /// Verbose logging and diagnostics in the top bar.
    pub debug: bool,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let limit = match get(LIMIT_VAR) {
            Some(value) => {
                let parsed = value.trim().parse::<usize>();
                match parsed {
                    Ok(n) if n > 0 => n,
                    _ => {
                        return Err(ConfigError::InvalidLimit {
                            var: LIMIT_VAR,
                            value,
                        });
                    }
                }
            }
            None => DEFAULT_LIMIT,
        };

        let source = get(SOURCE_VAR)
            .unwrap_or_else(|| format!("{KEPLER_ENDPOINT}?query={{}}&limit={limit}"));

        let debug = match get(DEBUG_VAR) {
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
                var: DEBUG_VAR,
                value,
            })?,
            None => false,
        };

        Ok(DashboardConfig { source, debug })
    }

    /// Default `env_logger` filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Engine configuration

use std::env;

use sheetforge_domain::RenamePolicy;

use crate::stores::DEFAULT_MAX_DRAFTS;

/// Configuration errors. Absent variables fall back to defaults; present but
/// malformed ones are reported.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid port number, got '{value}'")]
    InvalidPort { key: &'static str, value: String },

    #[error("{key} must be an unsigned 64-bit integer, got '{value}'")]
    InvalidSeed { key: &'static str, value: String },

    #[error("{key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Engine configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Interface to bind
    pub server_host: String,
    /// HTTP port
    pub server_port: u16,
    /// CORS allowed origins (comma-separated, or "*" for any); CORS is off when unset
    pub cors_allowed_origins: Option<String>,
    /// Seed for reproducible dice; real randomness when unset
    pub dice_seed: Option<u64>,
    /// What happens to a slot's points when its resolved name changes
    pub rename_policy: RenamePolicy,
    /// Most drafts held in memory at once
    pub max_drafts: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            cors_allowed_origins: None,
            dice_seed: None,
            rename_policy: RenamePolicy::default(),
            max_drafts: DEFAULT_MAX_DRAFTS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = read("SERVER_PORT")
            .map(|value| ("SERVER_PORT", value))
            .or_else(|| read("PORT").map(|value| ("PORT", value)));
        let server_port = match port {
            Some((key, value)) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort { key, value })?,
            None => defaults.server_port,
        };

        let dice_seed = match read("SHEETFORGE_DICE_SEED") {
            Some(value) => Some(value.parse().map_err(|_| ConfigError::InvalidSeed {
                key: "SHEETFORGE_DICE_SEED",
                value,
            })?),
            None => None,
        };

        let rename_policy = match read("SHEETFORGE_RENAME_POLICY") {
            Some(value) => value.parse().map_err(|e: sheetforge_domain::DomainError| {
                ConfigError::InvalidValue {
                    key: "SHEETFORGE_RENAME_POLICY",
                    message: e.to_string(),
                }
            })?,
            None => defaults.rename_policy,
        };

        let max_drafts = match read("SHEETFORGE_MAX_DRAFTS") {
            Some(value) => match value.parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "SHEETFORGE_MAX_DRAFTS",
                        message: format!("expected a positive integer, got '{}'", value),
                    });
                }
            },
            None => defaults.max_drafts,
        };

        Ok(Self {
            server_host: read("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            cors_allowed_origins: read("CORS_ALLOWED_ORIGINS"),
            dice_seed,
            rename_policy,
            max_drafts,
        })
    }

    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<EngineConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).expect("defaults are valid");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        let config = load(&[("PORT", "8080")]).expect("valid port");
        assert_eq!(config.server_port, 8080);

        let config = load(&[("SERVER_PORT", "9000"), ("PORT", "8080")])
            .expect("valid port");
        assert_eq!(config.server_port, 9000);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert_eq!(
            load(&[("SERVER_PORT", "http")]),
            Err(ConfigError::InvalidPort {
                key: "SERVER_PORT",
                value: "http".to_string()
            })
        );
        assert!(matches!(
            load(&[("SHEETFORGE_DICE_SEED", "-3")]),
            Err(ConfigError::InvalidSeed { .. })
        ));
        assert!(matches!(
            load(&[("SHEETFORGE_RENAME_POLICY", "migrate")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        for bad in ["0", "-5", "many"] {
            assert!(matches!(
                load(&[("SHEETFORGE_MAX_DRAFTS", bad)]),
                Err(ConfigError::InvalidValue {
                    key: "SHEETFORGE_MAX_DRAFTS",
                    ..
                })
            ));
        }
    }

    #[test]
    fn reads_draft_limit() {
        assert_eq!(load(&[]).expect("defaults").max_drafts, DEFAULT_MAX_DRAFTS);
        let config = load(&[("SHEETFORGE_MAX_DRAFTS", "25")]).expect("valid limit");
        assert_eq!(config.max_drafts, 25);
    }

    #[test]
    fn reads_seed_policy_and_cors() {
        let config = load(&[
            ("SHEETFORGE_DICE_SEED", "42"),
            ("SHEETFORGE_RENAME_POLICY", "Discard"),
            ("CORS_ALLOWED_ORIGINS", " http://localhost:5173 "),
            ("SERVER_HOST", "127.0.0.1"),
        ])
        .expect("valid config");
        assert_eq!(config.dice_seed, Some(42));
        assert_eq!(config.rename_policy, RenamePolicy::Discard);
        assert_eq!(
            config.cors_allowed_origins.as_deref(),
            Some("http://localhost:5173")
        );
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[("SHEETFORGE_DICE_SEED", "  "), ("CORS_ALLOWED_ORIGINS", "")])
            .expect("blank is unset");
        assert_eq!(config.dice_seed, None);
        assert_eq!(config.cors_allowed_origins, None);
    }
}

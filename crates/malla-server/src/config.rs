//! Server configuration from environment variables.
//!
//! | Variable                     | Default    |
//! |------------------------------|------------|
//! | `MALLA_DB_PATH`              | `malla.db` |
//! | `MALLA_PORT`                 | `3000`     |
//! | `MALLA_REQUEST_TIMEOUT_SECS` | `10`       |
//! | `MALLA_SEED`                 | `true`     |

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// SQLite database file path.
    pub db_path: String,
    pub port: u16,
    /// Per-request timeout applied by the tower middleware.
    pub request_timeout: Duration,
    /// Seed the default catalog and curriculum into an empty database.
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            db_path: "malla.db".to_string(),
            port: 3000,
            request_timeout: Duration::from_secs(10),
            seed: true,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        let db_path = lookup("MALLA_DB_PATH").unwrap_or(defaults.db_path);

        let port = match lookup("MALLA_PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { var: "MALLA_PORT", value })?,
            None => defaults.port,
        };

        let request_timeout = match lookup("MALLA_REQUEST_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "MALLA_REQUEST_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => defaults.request_timeout,
        };

        let seed = match lookup("MALLA_SEED") {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(ConfigError::InvalidValue { var: "MALLA_SEED", value }),
            },
            None => defaults.seed,
        };

        Ok(ServerConfig {
            db_path,
            port,
            request_timeout,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("MALLA_DB_PATH", "/tmp/x.db"),
            ("MALLA_PORT", "8080"),
            ("MALLA_REQUEST_TIMEOUT_SECS", "3"),
            ("MALLA_SEED", "off"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, "/tmp/x.db");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert!(!config.seed);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("MALLA_PORT", "http")])).unwrap_err(),
            ConfigError::InvalidValue {
                var: "MALLA_PORT",
                value: "http".to_string()
            }
        );
        assert!(ServerConfig::from_lookup(lookup(&[("MALLA_REQUEST_TIMEOUT_SECS", "0")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("MALLA_SEED", "maybe")])).is_err());
    }
}

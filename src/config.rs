// src/config.rs

use std::{env, net::SocketAddr};

use dotenvy::dotenv;
use thiserror::Error;

pub const DEFAULT_TRIVIA_API_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
/// One hour, like the tokens the frontend was written against.
pub const DEFAULT_JWT_EXPIRATION: u64 = 3600;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub trivia_api_url: String,
    pub bind_addr: SocketAddr,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = var("DATABASE_URL").filter(|url| !url.is_empty());

        let jwt_secret = var("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let jwt_expiration = match var("JWT_EXPIRATION") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "JWT_EXPIRATION",
                value,
            })?,
            None => DEFAULT_JWT_EXPIRATION,
        };

        let trivia_api_url =
            var("TRIVIA_API_URL").unwrap_or_else(|| DEFAULT_TRIVIA_API_URL.to_string());

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let rust_log = var("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            trivia_api_url,
            bind_addr,
            rust_log,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_vars(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.jwt_expiration, DEFAULT_JWT_EXPIRATION);
        assert_eq!(config.trivia_api_url, DEFAULT_TRIVIA_API_URL);
        assert_eq!(config.bind_addr.port(), 4000);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_missing_secret() {
        let err = Config::from_vars(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_invalid_expiration() {
        let err = Config::from_vars(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRATION", "soon"),
        ]))
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "JWT_EXPIRATION",
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_empty_database_url_means_memory() {
        let config = Config::from_vars(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", ""),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ]))
        .unwrap();

        assert!(config.database_url.is_none());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
    }
}

//! Process configuration, read once at startup.
//!
//! | Variable                        | Default                          |
//! |---------------------------------|----------------------------------|
//! | `SECRET_KEY`                    | required                         |
//! | `DATABASE_URL`                  | `sqlite://twitter.db?mode=rwc`   |
//! | `BIND_ADDR`                     | `0.0.0.0:3000`                   |
//! | `JWT_ACCESS_TOKEN_EXPIRATION`   | `1440` minutes (1 day)           |
//! | `JWT_REFRESH_TOKEN_EXPIRATION`  | `10080` minutes (1 week)         |

use chrono::Duration;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://twitter.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ACCESS_TOKEN_MINUTES: i64 = 60 * 24;
pub const DEFAULT_REFRESH_TOKEN_MINUTES: i64 = 60 * 24 * 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a positive number of minutes, got {value:?}")]
    InvalidMinutes { name: &'static str, value: String },
    #[error("access token lifetime must be shorter than refresh token lifetime")]
    TtlOrder,
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub secret_key: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("SECRET_KEY"))?;

        let minutes = |name: &'static str, default: i64| -> Result<Duration, ConfigError> {
            let Some(value) = lookup(name) else {
                return Ok(Duration::minutes(default));
            };
            match value.trim().parse::<i64>() {
                Ok(n) if n > 0 && n <= i64::MAX / 60_000 => Ok(Duration::minutes(n)),
                _ => Err(ConfigError::InvalidMinutes { name, value }),
            }
        };

        let access_token_ttl = minutes("JWT_ACCESS_TOKEN_EXPIRATION", DEFAULT_ACCESS_TOKEN_MINUTES)?;
        let refresh_token_ttl =
            minutes("JWT_REFRESH_TOKEN_EXPIRATION", DEFAULT_REFRESH_TOKEN_MINUTES)?;
        if access_token_ttl >= refresh_token_ttl {
            return Err(ConfigError::TtlOrder);
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            secret_key,
            access_token_ttl,
            refresh_token_ttl,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("bind_addr", &self.bind_addr)
            .field("secret_key", &"<redacted>")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[("SECRET_KEY", "s3cret")]).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.access_token_ttl.num_seconds(), 86_400);
        assert_eq!(config.refresh_token_ttl.num_seconds(), 604_800);
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("SECRET_KEY"));
        assert_eq!(
            load(&[("SECRET_KEY", "")]).unwrap_err(),
            ConfigError::Missing("SECRET_KEY")
        );
    }

    #[test]
    fn ttl_overrides() {
        let config = load(&[
            ("SECRET_KEY", "s3cret"),
            ("JWT_ACCESS_TOKEN_EXPIRATION", "15"),
            ("JWT_REFRESH_TOKEN_EXPIRATION", "60"),
        ])
        .unwrap();
        assert_eq!(config.access_token_ttl.num_seconds(), 900);
        assert_eq!(config.refresh_token_ttl.num_seconds(), 3_600);
    }

    #[test]
    fn rejects_bad_ttls() {
        for value in ["0", "-5", "soon"] {
            assert!(matches!(
                load(&[("SECRET_KEY", "s"), ("JWT_ACCESS_TOKEN_EXPIRATION", value)]),
                Err(ConfigError::InvalidMinutes { .. })
            ));
        }
        assert_eq!(
            load(&[
                ("SECRET_KEY", "s"),
                ("JWT_ACCESS_TOKEN_EXPIRATION", "100"),
                ("JWT_REFRESH_TOKEN_EXPIRATION", "100"),
            ])
            .unwrap_err(),
            ConfigError::TtlOrder
        );
    }

    #[test]
    fn debug_hides_secret() {
        let config = load(&[("SECRET_KEY", "s3cret")]).unwrap();
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}

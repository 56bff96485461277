//! Runtime configuration from environment variables.
//!
//! `.env` is loaded by `main` through dotenvy before this runs.
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `HOST`: bind host (default: 0.0.0.0)
//! - `PORT`: bind port (default: 8080)
//! - `DB_MAX_CONNECTIONS`: pool size (default: 5)
//! - `TRIP_CACHE_TTL_SECS`: trip cache TTL (default: 600)
//! - `DEFAULT_CURRENCY`: currency for trips without one (default: DZD)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub trip_cache_ttl: Duration,
    pub default_currency: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".to_string()))?;

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            trip_cache_ttl: Duration::from_secs(parse_or(&lookup, "TRIP_CACHE_TTL_SECS", 600)?),
            default_currency: lookup("DEFAULT_CURRENCY")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "DZD".to_string()),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", key, raw))),
        None => Ok(default),
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/agency")]))
            .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.trip_cache_ttl, Duration::from_secs(600));
        assert_eq!(config.default_currency, "DZD");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/agency"),
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("TRIP_CACHE_TTL_SECS", "30"),
            ("DEFAULT_CURRENCY", "EUR"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.trip_cache_ttl, Duration::from_secs(30));
        assert_eq!(config.default_currency, "EUR");
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/agency"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}

//! Configuration module
//!
//! All settings come from the environment (a `.env` file is loaded by the
//! binary before this runs). `Config::from_env` fails fast with context when
//! a required variable is missing or unparsable.

use std::env;

use anyhow::{Context, Result};

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REPOSITORIO_FOLDER: &str = "/espolios";

/// Leaf field names that accumulate into arrays during multipart ingestion,
/// unless overridden via `ARRAY_FIELDS`.
const DEFAULT_ARRAY_FIELDS: &[&str] = &["materiais", "categoria", "lugares", "tecnicas"];

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Port the HTTP server listens on.
    pub server_port: u16,
    /// Postgres connection string.
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    /// Base URL of the external repository service.
    pub repositorio_base_url: String,
    /// Service credentials for the repository login exchange.
    pub repositorio_username: String,
    pub repositorio_password: String,
    /// Destination folder sent with every file upload.
    pub repositorio_folder: String,
    /// Timeout applied to login and upload calls.
    pub upstream_timeout_secs: u64,
    /// Multi-valued leaf field names (the array-field policy).
    pub array_fields: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            server_port: parse_env("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_env("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS)?,
            repositorio_base_url: require_env("REPOSITORIO_BASE_URL")?,
            repositorio_username: require_env("REPOSITORIO_USERNAME")?,
            repositorio_password: require_env("REPOSITORIO_PASSWORD")?,
            repositorio_folder: env::var("REPOSITORIO_FOLDER")
                .unwrap_or_else(|_| DEFAULT_REPOSITORIO_FOLDER.to_string()),
            upstream_timeout_secs: parse_env(
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )?,
            array_fields: array_fields_from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.repositorio_base_url.is_empty(),
            "REPOSITORIO_BASE_URL must not be empty"
        );
        anyhow::ensure!(
            self.upstream_timeout_secs > 0,
            "UPSTREAM_TIMEOUT_SECS must be greater than zero"
        );
        Ok(())
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} must be set", name))
}

fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} is not a valid value", name)),
        Err(_) => Ok(default),
    }
}

fn array_fields_from_env() -> Vec<String> {
    match env::var("ARRAY_FIELDS") {
        Ok(raw) => parse_array_fields(&raw),
        Err(_) => DEFAULT_ARRAY_FIELDS.iter().map(|s| s.to_string()).collect(),
    }
}

fn parse_array_fields(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_array_fields_cover_known_multi_valued_leaves() {
        for leaf in ["materiais", "categoria", "lugares"] {
            assert!(DEFAULT_ARRAY_FIELDS.contains(&leaf));
        }
    }

    #[test]
    fn array_fields_override_is_trimmed_and_filtered() {
        assert_eq!(
            parse_array_fields(" materiais, autores ,,categoria"),
            vec!["materiais", "autores", "categoria"]
        );
        assert!(parse_array_fields("").is_empty());
    }
}

//! Server configuration from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use wordquiz_core::{LinePolicy, OracleSettings, DEFAULT_FUZZY_THRESHOLD};

const DEFAULT_VOCABULARY_PATH: &str = "ewords.txt";
const DEFAULT_SYNONYM_BASE_URL: &str = "https://how-to-all.com";
const DEFAULT_SYNONYM_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub vocabulary_path: PathBuf,
    pub line_policy: LinePolicy,
    pub access_password: String,
    pub host: String,
    pub port: u16,
    pub synonym_base_url: String,
    pub synonym_timeout: Duration,
    pub oracle: OracleSettings,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Required env vars:
    /// - ACCESS_PASSWORD: shared password users log in with
    ///
    /// Optional env vars:
    /// - VOCABULARY_PATH (default `ewords.txt`)
    /// - VOCABULARY_STRICT: reject malformed lines instead of skipping them
    /// - HOST / PORT (default `0.0.0.0:3000`)
    /// - SYNONYM_BASE_URL, SYNONYM_TIMEOUT_SECS, ONLINE_SYNONYMS
    /// - FUZZY_THRESHOLD (default 0.65)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_password = lookup("ACCESS_PASSWORD")
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::Missing("ACCESS_PASSWORD"))?;

        let strict: bool = parse_or(&lookup, "VOCABULARY_STRICT", false)?;
        let timeout_secs: u64 =
            parse_or(&lookup, "SYNONYM_TIMEOUT_SECS", DEFAULT_SYNONYM_TIMEOUT_SECS)?;
        let fuzzy_threshold: f64 = parse_or(&lookup, "FUZZY_THRESHOLD", DEFAULT_FUZZY_THRESHOLD)?;
        if !(0.0..=1.0).contains(&fuzzy_threshold) {
            return Err(ConfigError::Invalid {
                key: "FUZZY_THRESHOLD",
                value: fuzzy_threshold.to_string(),
            });
        }

        Ok(Self {
            vocabulary_path: lookup("VOCABULARY_PATH")
                .unwrap_or_else(|| DEFAULT_VOCABULARY_PATH.to_string())
                .into(),
            line_policy: if strict {
                LinePolicy::Strict
            } else {
                LinePolicy::Lenient
            },
            access_password,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            synonym_base_url: lookup("SYNONYM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SYNONYM_BASE_URL.to_string()),
            synonym_timeout: Duration::from_secs(timeout_secs),
            oracle: OracleSettings {
                fuzzy_threshold,
                online_synonyms: parse_or(&lookup, "ONLINE_SYNONYMS", true)?,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError::Invalid { key, value })
        }
    }
}

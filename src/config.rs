//! Configuration management for the contact form.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honored if present; nothing is printed to stdout while loading.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the contact form and its collaborators.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the contacts HTTP API (in-memory store when unset)
    pub contacts_api_url: Option<String>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Quiet period before address fields become required again, in ms (default: 2000)
    pub address_settle_ms: u64,

    /// Minimum first name length (default: 3)
    pub first_name_min_length: usize,

    /// Words rejected in notes (default: foo, bar)
    pub notes_blacklist: Vec<String>,

    /// Where to navigate after a successful save (default: "/contacts")
    pub contact_list_path: String,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `CONTACTS_API_URL`: Base URL of the contacts API
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `ADDRESS_SETTLE_MS`: Address settling window in ms (default: 2000)
    /// - `FIRST_NAME_MIN_LENGTH`: Minimum first name length (default: 3)
    /// - `NOTES_BLACKLIST`: Comma-separated forbidden words (default: "foo,bar")
    /// - `CONTACT_LIST_PATH`: Post-save navigation target (default: "/contacts")
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let contacts_api_url = match env::var("CONTACTS_API_URL") {
            Ok(url) if !url.trim().is_empty() => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        var: "CONTACTS_API_URL".to_string(),
                        reason: "Must start with http:// or https://".to_string(),
                    });
                }
                Some(url)
            }
            _ => None,
        };

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let address_settle_ms = Self::parse_env_u64("ADDRESS_SETTLE_MS", 2000)?;
        let first_name_min_length = Self::parse_env_usize("FIRST_NAME_MIN_LENGTH", 3)?;

        if first_name_min_length == 0 {
            return Err(ConfigError::InvalidValue {
                var: "FIRST_NAME_MIN_LENGTH".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let notes_blacklist = match env::var("NOTES_BLACKLIST") {
            Ok(val) => Self::parse_word_list(&val),
            Err(_) => Self::default_blacklist(),
        };

        let contact_list_path =
            env::var("CONTACT_LIST_PATH").unwrap_or_else(|_| "/contacts".to_string());
        if !contact_list_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                var: "CONTACT_LIST_PATH".to_string(),
                reason: "Must be an absolute path starting with /".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            contacts_api_url,
            request_timeout,
            address_settle_ms,
            first_name_min_length,
            notes_blacklist,
            contact_list_path,
            log_level,
        })
    }

    /// Split a comma-separated word list, dropping blanks.
    fn parse_word_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn default_blacklist() -> Vec<String> {
        vec!["foo".to_string(), "bar".to_string()]
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            contacts_api_url: None,
            request_timeout: 10,
            address_settle_ms: 2000,
            first_name_min_length: 3,
            notes_blacklist: Self::default_blacklist(),
            contact_list_path: "/contacts".to_string(),
            log_level: "error".to_string(),
        }
    }
}

//! Configuration loading from disk.
//!
//! The config file is a flat, line-oriented `key: value` format:
//!
//! ```text
//! ollama_server: http://localhost:11434
//! auth_token: secret123
//! listener_addr: :8080
//! ```
//!
//! The first colon on a line separates key from value. Keys are matched
//! case-insensitively; values keep their case. Lines without a colon and
//! lines with an unrecognized key are ignored, so comments are inert. When
//! a key repeats, the last occurrence wins.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A recognized key carried an unusable value.
    #[error("invalid value for {key}: {value:?}")]
    Parse { key: &'static str, value: String },

    /// The file parsed but failed semantic validation.
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse the line-oriented config format into an unvalidated config.
fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    let mut config = ProxyConfig {
        upstream_url: String::new(),
        auth_token: String::new(),
        bind_address: String::new(),
        cert_file: None,
        key_file: None,
        request_timeout_secs: None,
    };

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();

        match key.as_str() {
            "ollama_server" => config.upstream_url = value.to_string(),
            "auth_token" => config.auth_token = value.to_string(),
            "listener_addr" => config.bind_address = value.to_string(),
            "key_file" => config.key_file = non_empty_path(value),
            "cert_file" => config.cert_file = non_empty_path(value),
            "request_timeout" => {
                let secs = value.parse::<u64>().ok().filter(|&s| s > 0).ok_or_else(|| {
                    ConfigError::Parse {
                        key: "request_timeout",
                        value: value.to_string(),
                    }
                })?;
                config.request_timeout_secs = Some(secs);
            }
            _ => continue,
        }
    }

    Ok(config)
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

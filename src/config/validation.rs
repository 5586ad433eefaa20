//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles syntax)
//! - Required fields must be non-empty
//! - TLS certificate and key files are all-or-nothing
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `ollama_server` is absent or empty.
    #[error("ollama server URL not set in config")]
    MissingUpstreamUrl,

    /// `auth_token` is absent or empty.
    #[error("auth token not set in config")]
    MissingAuthToken,

    /// `listener_addr` is absent or empty.
    #[error("listener address not set in config")]
    MissingBindAddress,

    /// Exactly one of `cert_file`/`key_file` is set.
    #[error("cert_file and key_file must be set together")]
    IncompleteTlsPair,
}

/// Check a parsed configuration for semantic problems.
///
/// Collects every violation instead of stopping at the first, so a broken
/// config file can be fixed in one pass.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstream_url.is_empty() {
        errors.push(ValidationError::MissingUpstreamUrl);
    }
    if config.auth_token.is_empty() {
        errors.push(ValidationError::MissingAuthToken);
    }
    if config.bind_address.is_empty() {
        errors.push(ValidationError::MissingBindAddress);
    }
    if config.cert_file.is_some() != config.key_file.is_some() {
        errors.push(ValidationError::IncompleteTlsPair);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid_config() -> ProxyConfig {
        ProxyConfig {
            upstream_url: "http://localhost:11434".to_string(),
            auth_token: "secret123".to_string(),
            bind_address: ":8080".to_string(),
            cert_file: None,
            key_file: None,
            request_timeout_secs: None,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_all_missing_fields_reported_together() {
        let config = ProxyConfig {
            upstream_url: String::new(),
            auth_token: String::new(),
            bind_address: String::new(),
            cert_file: None,
            key_file: None,
            request_timeout_secs: None,
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::MissingUpstreamUrl));
        assert!(errors.contains(&ValidationError::MissingAuthToken));
        assert!(errors.contains(&ValidationError::MissingBindAddress));
    }

    #[test]
    fn test_cert_without_key_rejected() {
        let mut config = valid_config();
        config.cert_file = Some(PathBuf::from("cert.pem"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::IncompleteTlsPair]);
    }

    #[test]
    fn test_key_without_cert_rejected() {
        let mut config = valid_config();
        config.key_file = Some(PathBuf::from("key.pem"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::IncompleteTlsPair]);
    }

    #[test]
    fn test_full_tls_pair_accepted() {
        let mut config = valid_config();
        config.cert_file = Some(PathBuf::from("cert.pem"));
        config.key_file = Some(PathBuf::from("key.pem"));
        assert!(validate_config(&config).is_ok());
    }
}

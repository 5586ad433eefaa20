//! Configuration schema definitions.
//!
//! One flat struct covers the whole proxy. It is loaded once at startup and
//! never mutated afterwards; there is deliberately no reload path.

use std::path::{Path, PathBuf};

/// Root configuration for the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Base URL of the upstream server (e.g. "http://localhost:11434").
    /// Inbound path and query are appended to this verbatim.
    pub upstream_url: String,

    /// The single bearer token accepted on inbound requests.
    pub auth_token: String,

    /// Listener bind address (e.g. "0.0.0.0:8080", or ":8080" for all
    /// interfaces).
    pub bind_address: String,

    /// Path to the TLS certificate file (PEM). TLS serving is enabled only
    /// when both `cert_file` and `key_file` are set.
    pub cert_file: Option<PathBuf>,

    /// Path to the TLS private key file (PEM).
    pub key_file: Option<PathBuf>,

    /// Optional whole-request timeout in seconds. Unset by default: a slow
    /// or hanging upstream holds the client connection open indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl ProxyConfig {
    /// The TLS certificate/key pair, if TLS serving is configured.
    pub fn tls_files(&self) -> Option<(&Path, &Path)> {
        match (&self.cert_file, &self.key_file) {
            (Some(cert), Some(key)) => Some((cert.as_path(), key.as_path())),
            _ => None,
        }
    }

    /// Bind address with the `":port"` shorthand expanded to all interfaces.
    pub fn normalized_bind_address(&self) -> String {
        if self.bind_address.starts_with(':') {
            format!("0.0.0.0{}", self.bind_address)
        } else {
            self.bind_address.clone()
        }
    }
}

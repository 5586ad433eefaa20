//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Configured cert/key pair
//!     → tls.rs (existence + PEM content checks, rustls config)
//!     → TLS listener, or plaintext when no pair is configured
//! ```
//!
//! # Design Decisions
//! - TLS is all-or-nothing: both files or neither (validated in config)
//! - PEM problems are startup errors, not first-handshake surprises

pub mod tls;

pub use tls::load_tls_config;

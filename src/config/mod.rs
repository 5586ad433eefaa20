//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (line-oriented `key: value`)
//!     → loader.rs (read & parse)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → handed to the server at construction time
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup; there is no reload path
//! - Unknown keys and colon-less lines are ignored, which keeps the format
//!   tolerant of comments and future keys
//! - Validation separates syntactic (loader) from semantic checks, and
//!   reports every semantic problem at once

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ProxyConfig;
pub use validation::{validate_config, ValidationError};

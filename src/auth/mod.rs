//! Request authorization subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → raw Authorization header value (missing header ⇒ empty string)
//!     → bearer.rs (bounded parse, exact token comparison)
//!     → accept: strip credential, continue to forwarding
//!     → reject: 401, upstream never contacted
//! ```
//!
//! # Design Decisions
//! - The decision is a pure function over the header string; no clock, no
//!   I/O, no per-request state
//! - One configured token, compared byte-for-byte; no token store
//! - Malformed headers (no space, wrong scheme, extra whitespace) reject
//!   instead of erroring

pub mod bearer;

pub use bearer::Authorizer;

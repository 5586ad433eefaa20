//! Upstream dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Sanitized outbound request
//!     → UpstreamDispatch (injected at server construction)
//!     → client.rs (shared hyper client, default transport settings)
//!     → upstream response handed back to the forwarder for relaying
//! ```
//!
//! # Design Decisions
//! - Dispatch sits behind a trait so tests substitute doubles without
//!   touching the forwarder contract
//! - One shared client for the whole process; it holds no per-request
//!   state and is safe for concurrent use
//! - No timeouts, no retries: transport failures surface immediately

pub mod client;

pub use client::{DispatchError, HttpUpstream, UpstreamDispatch};

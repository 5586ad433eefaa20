//! Authenticating streaming reverse proxy for a local Ollama server.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 OLLAMA GATE                  │
//!                      │                                              │
//!   Client Request     │  ┌─────────┐   ┌─────────┐   ┌───────────┐  │
//!   ───────────────────┼─▶│  http   │──▶│  auth   │──▶│   http    │  │
//!                      │  │ server  │   │ bearer  │   │ forwarder │  │
//!                      │  └─────────┘   └─────────┘   └─────┬─────┘  │
//!                      │                                    │        │
//!                      │                                    ▼        │
//!   Client Response    │  ┌───────────┐              ┌───────────┐   │     Ollama
//!   ◀──────────────────┼──│ streaming │◀─────────────│ upstream  │◀──┼──── Server
//!                      │  │  relay    │              │  client   │   │
//!                      │  └───────────┘              └───────────┘   │
//!                      │                                             │
//!                      │  Cross-cutting: config · net/tls · lifecycle│
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! Every inbound request is gated on a configured bearer token, stripped of
//! its credential, forwarded verbatim (method, path, query, body stream) to
//! one fixed upstream, and the upstream body is relayed back in bounded
//! chunks as it arrives.

// Core subsystems
pub mod auth;
pub mod config;
pub mod http;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod net;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, catch-all routing, auth gate)
//!     → forward.rs (outbound construction, dispatch, streaming relay)
//!     → Send to client chunk-by-chunk
//! ```

pub mod forward;
pub mod server;

pub use forward::{ForwardError, RELAY_CHUNK_SIZE};
pub use server::{AppState, HttpServer};

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build server → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl-C → broadcast trigger → serve path drains and exits
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;

//! Process-level helpers
//!
//! Currently only shutdown signal handling.

pub mod signals;

pub use signals::shutdown_signal;

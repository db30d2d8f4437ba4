//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod overlay_updater;

// Re-export main functions
pub use overlay_updater::overlay_updater_task;

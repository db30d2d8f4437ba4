//! State management module
//!
//! This module contains the countdown timer, its overlay file, and the
//! application state shared with the HTTP handlers.

pub mod app_state;
pub mod overlay;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use overlay::{format_hms, OverlayFile};
pub use timer_state::{SubathonTimer, TimerSnapshot};

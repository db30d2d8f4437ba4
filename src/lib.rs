//! Subathon Timer - A countdown timer for stream subathons
//!
//! Donations, subscriptions and bits arriving through webhooks add time to a
//! single shared countdown. The remaining time is served over HTTP and kept
//! in a text file that OBS can display.

pub mod config;
pub mod state;
pub mod events;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, OverlayFile, SubathonTimer};
pub use events::MinutesPolicy;
pub use api::create_router;
pub use utils::signals::shutdown_signal;

//! Main application state shared by the HTTP handlers

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};

use crate::events::MinutesPolicy;
use super::SubathonTimer;

/// Application state handed to every route
#[derive(Debug)]
pub struct AppState {
    /// The single countdown, also owned by the overlay updater task
    pub timer: Arc<SubathonTimer>,
    /// Event-to-minutes conversion rates
    pub policy: MinutesPolicy,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(timer: Arc<SubathonTimer>, policy: MinutesPolicy, port: u16, host: String) -> Self {
        Self {
            timer,
            policy,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Remember the most recent action for `/status`
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OverlayFile;
    use tempfile::tempdir;

    #[test]
    fn records_last_action() {
        let dir = tempdir().unwrap();
        let timer = Arc::new(SubathonTimer::new(5, OverlayFile::new(dir.path().join("t.txt"))));
        let state = AppState::new(timer, MinutesPolicy::default(), 5000, "127.0.0.1".to_string());

        assert_eq!(state.get_last_action(), (None, None));

        state.record_action("donation");
        let (action, at) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("donation"));
        assert!(at.is_some());
        assert_eq!(state.get_uptime(), "0s");
    }
}

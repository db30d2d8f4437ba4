//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerSnapshot;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body of `/add_time` and `/set_time`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinutesRequest {
    #[serde(default)]
    pub minutes: i64,
}

/// API response structure for timer-changing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            minutes: None,
            changed: None,
            timer,
        }
    }

    pub fn ok(message: String, timer: TimerSnapshot) -> Self {
        Self::new("ok", message, timer)
    }

    pub fn error(message: String, timer: TimerSnapshot) -> Self {
        Self::new("error", message, timer)
    }

    pub fn with_minutes(mut self, minutes: i64) -> Self {
        self.minutes = Some(minutes);
        self
    }

    pub fn with_changed(mut self, changed: bool) -> Self {
        self.changed = Some(changed);
        self
    }
}

/// Response of `/api/time`, polled by the control panel and overlay page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeResponse {
    pub status: String,
    #[serde(flatten)]
    pub timer: TimerSnapshot,
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub overlay_path: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub current_time: String,
    pub is_paused: bool,
}

impl HealthResponse {
    pub fn ok(timer: &TimerSnapshot) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: VERSION.to_string(),
            current_time: timer.time.clone(),
            is_paused: timer.paused,
        }
    }
}

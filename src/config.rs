//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::{
    events::MinutesPolicy,
    state::{overlay::DEFAULT_PAUSED_PREFIX, OverlayFile},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "subathon-timer")]
#[command(about = "A subathon countdown timer driven by donation and subscription webhooks")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Countdown duration at startup, in minutes
    #[arg(short = 't', long, default_value = "60")]
    pub initial_minutes: i64,

    /// Text file rewritten with the remaining time for OBS
    #[arg(short, long, default_value = "output/overlay_timer.txt")]
    pub overlay_path: PathBuf,

    /// Text written before the remaining time while paused
    #[arg(long, default_value = DEFAULT_PAUSED_PREFIX)]
    pub paused_prefix: String,

    /// Overlay refresh period in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Minutes added per euro donated
    #[arg(long, default_value = "10")]
    pub minutes_per_euro: f64,

    /// Exchange rate applied to USD donations
    #[arg(long, default_value = "0.85")]
    pub usd_to_eur: f64,

    /// Minutes added per subscription
    #[arg(long, default_value = "30")]
    pub sub_minutes: i64,

    /// Minutes added per hundred bits cheered
    #[arg(long, default_value = "10")]
    pub minutes_per_hundred_bits: i64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Overlay refresh period, never shorter than 10ms
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }

    pub fn overlay_file(&self) -> OverlayFile {
        OverlayFile::with_paused_prefix(&self.overlay_path, &self.paused_prefix)
    }

    pub fn minutes_policy(&self) -> MinutesPolicy {
        MinutesPolicy {
            minutes_per_euro: self.minutes_per_euro,
            usd_to_eur: self.usd_to_eur,
            sub_minutes: self.sub_minutes,
            minutes_per_hundred_bits: self.minutes_per_hundred_bits,
        }
    }
}

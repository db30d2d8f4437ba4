//! Subathon countdown timer
//!
//! The timer is either running towards an end instant or paused with a frozen
//! remaining duration. Every operation goes through one mutex, and every
//! mutation rewrites the overlay file before the lock is released so the file
//! never lags behind or races the background updater.

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::overlay::{format_hms, OverlayFile};

/// Authoritative countdown representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Countdown {
    /// Counting down in real time towards `ends_at`
    Running { ends_at: Instant },
    /// Frozen; may hold a negative value after time removal, clamped on read
    Paused { remaining: TimeDelta },
}

impl Countdown {
    fn remaining(&self, now: Instant) -> Duration {
        match *self {
            Countdown::Running { ends_at } => ends_at.saturating_duration_since(now),
            Countdown::Paused { remaining } => remaining.to_std().unwrap_or(Duration::ZERO),
        }
    }

    fn is_paused(&self) -> bool {
        matches!(self, Countdown::Paused { .. })
    }
}

/// Convert signed minutes into a delta, saturating on overflow
fn minutes_delta(minutes: i64) -> TimeDelta {
    TimeDelta::try_minutes(minutes).unwrap_or(if minutes < 0 {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    })
}

/// Move an instant by a signed delta
fn shift(instant: Instant, delta: TimeDelta, now: Instant) -> Instant {
    if delta >= TimeDelta::zero() {
        let forward = delta.to_std().unwrap_or(Duration::ZERO);
        instant.checked_add(forward).unwrap_or(instant)
    } else {
        let backward = (-delta).to_std().unwrap_or(Duration::ZERO);
        // Out of range only when the end is unreachably far in the past
        instant.checked_sub(backward).unwrap_or(now)
    }
}

/// Consistent view of the timer taken under a single lock acquisition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Remaining time formatted as `HH:MM:SS`
    pub time: String,
    /// Exact text written to the overlay file
    pub display: String,
    pub paused: bool,
    pub remaining_seconds: u64,
}

/// Countdown timer shared between the HTTP handlers and the overlay updater
#[derive(Debug)]
pub struct SubathonTimer {
    countdown: Mutex<Countdown>,
    overlay: OverlayFile,
}

impl SubathonTimer {
    /// Create a running timer ending `initial_minutes` from now and write the
    /// overlay file once.
    pub fn new(initial_minutes: i64, overlay: OverlayFile) -> Self {
        let now = Instant::now();
        let timer = Self {
            countdown: Mutex::new(Countdown::Running {
                ends_at: shift(now, minutes_delta(initial_minutes), now),
            }),
            overlay,
        };

        info!(
            "Timer started with {} minutes, overlay at {}",
            initial_minutes,
            timer.overlay.path().display()
        );
        timer.save_to_file();
        timer
    }

    pub fn overlay(&self) -> &OverlayFile {
        &self.overlay
    }

    fn lock(&self) -> MutexGuard<'_, Countdown> {
        // The guarded value is plain data, valid even if a holder panicked
        self.countdown.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rewrite the overlay file; failures are logged, never propagated
    fn persist(&self, countdown: &Countdown, now: Instant) {
        let display = self
            .overlay
            .render(countdown.remaining(now), countdown.is_paused());

        if let Err(e) = self.overlay.write(&display) {
            warn!(
                "Failed to write overlay file {}: {}",
                self.overlay.path().display(),
                e
            );
        }
    }

    /// Add (or, with a negative value, remove) minutes from the countdown
    pub fn add_time(&self, minutes: i64) {
        let mut countdown = self.lock();
        let now = Instant::now();
        let delta = minutes_delta(minutes);

        *countdown = match *countdown {
            Countdown::Running { ends_at } => Countdown::Running {
                ends_at: shift(ends_at, delta, now),
            },
            Countdown::Paused { remaining } => Countdown::Paused {
                remaining: remaining.checked_add(&delta).unwrap_or(if delta < TimeDelta::zero() {
                    TimeDelta::MIN
                } else {
                    TimeDelta::MAX
                }),
            },
        };

        info!(
            "Added {} minutes, remaining {}",
            minutes,
            format_hms(countdown.remaining(now))
        );
        self.persist(&countdown, now);
    }

    /// Replace the remaining time outright
    pub fn set_time(&self, minutes: i64) {
        let mut countdown = self.lock();
        let now = Instant::now();
        let delta = minutes_delta(minutes);

        *countdown = match *countdown {
            Countdown::Running { .. } => Countdown::Running {
                ends_at: shift(now, delta, now),
            },
            Countdown::Paused { .. } => Countdown::Paused { remaining: delta },
        };

        info!("Timer set to {} minutes", minutes);
        self.persist(&countdown, now);
    }

    /// Freeze the countdown. Returns `false` if it was already paused.
    pub fn pause(&self) -> bool {
        let mut countdown = self.lock();
        let now = Instant::now();

        let Countdown::Running { ends_at } = *countdown else {
            debug!("Pause requested while already paused");
            return false;
        };

        let frozen = ends_at.saturating_duration_since(now);
        *countdown = Countdown::Paused {
            remaining: TimeDelta::from_std(frozen).unwrap_or(TimeDelta::MAX),
        };

        info!("Timer paused at {}", format_hms(frozen));
        self.persist(&countdown, now);
        true
    }

    /// Restart the countdown from the frozen value. Returns `false` if it was
    /// already running.
    pub fn resume(&self) -> bool {
        let mut countdown = self.lock();
        let now = Instant::now();

        let Countdown::Paused { remaining } = *countdown else {
            debug!("Resume requested while already running");
            return false;
        };

        let remaining = remaining.max(TimeDelta::zero());
        *countdown = Countdown::Running {
            ends_at: shift(now, remaining, now),
        };

        info!("Timer resumed with {} left", format_hms(countdown.remaining(now)));
        self.persist(&countdown, now);
        true
    }

    /// Non-negative time left on the countdown
    pub fn remaining(&self) -> Duration {
        self.lock().remaining(Instant::now())
    }

    pub fn is_paused(&self) -> bool {
        self.lock().is_paused()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let countdown = self.lock();
        let remaining = countdown.remaining(Instant::now());
        let paused = countdown.is_paused();

        TimerSnapshot {
            time: format_hms(remaining),
            display: self.overlay.render(remaining, paused),
            paused,
            remaining_seconds: remaining.as_secs(),
        }
    }

    /// Periodic rewrite. Skipped while paused: the pause transition already
    /// wrote the frozen value and it cannot change until the next mutation.
    pub fn refresh_overlay(&self) {
        let countdown = self.lock();
        if countdown.is_paused() {
            return;
        }

        let now = Instant::now();
        debug!("Refreshing overlay: {}", format_hms(countdown.remaining(now)));
        self.persist(&countdown, now);
    }

    /// Rewrite the overlay file regardless of the current mode
    pub fn save_to_file(&self) {
        let countdown = self.lock();
        self.persist(&countdown, Instant::now());
    }
}

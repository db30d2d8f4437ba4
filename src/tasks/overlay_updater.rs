//! Overlay updater background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval, MissedTickBehavior},
};
use tracing::info;

use crate::state::SubathonTimer;

/// Rewrite the overlay file every `period` while the timer runs.
///
/// Stops once `shutdown` flips to `true` or its sender is dropped.
pub async fn overlay_updater_task(
    timer: Arc<SubathonTimer>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("Starting overlay updater task ({}ms period)", period.as_millis());

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if *shutdown.borrow() {
                    break;
                }
                timer.refresh_overlay();
            }

            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("Overlay updater task stopped");
}

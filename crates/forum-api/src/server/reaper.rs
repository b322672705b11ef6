//! Background sweep of expired sessions
//!
//! Lazy expiry in the session manager stays authoritative; the sweep only
//! keeps abandoned rows from piling up.

use std::time::Duration;

use chrono::Utc;
use forum_service::SessionService;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Spawn the reaper; it exits once `stop` flips to `true` or its sender is dropped
pub fn spawn_session_reaper(
    state: AppState,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(period_secs = period.as_secs(), "Session reaper started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let sessions = SessionService::new(state.service_context());
                    match sessions.purge_expired(Utc::now()).await {
                        Ok(0) => debug!("No expired sessions to purge"),
                        Ok(removed) => info!(removed, "Purged expired sessions"),
                        Err(e) => warn!(error = %e, "Session purge failed"),
                    }
                }
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Session reaper stopped");
    })
}

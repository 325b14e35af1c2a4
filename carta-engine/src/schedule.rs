//! Open/closed schedule evaluation
//!
//! The storefront fails open: no schedule configuration, or a timezone
//! that does not resolve, means the store is treated as open rather than
//! blocking customers on a config mistake.
//!
//! Weekday indices are the business's local calendar, 0 = Sunday through
//! 6 = Saturday. Times are zero-padded "HH:MM", which makes plain string
//! comparison correct for the open-interval check.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use shared::models::Config;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// How often the watcher re-evaluates the schedule
const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Whether the store is open at the given instant
pub fn is_store_open_at(config: &Config, now: DateTime<Utc>) -> bool {
    let Some(schedule) = &config.schedule else {
        return true;
    };

    let tz: Tz = match schedule.timezone.parse() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(
                timezone = %schedule.timezone,
                "unrecognized schedule timezone, treating store as open"
            );
            return true;
        }
    };

    let local = now.with_timezone(&tz);
    let weekday = local.weekday().num_days_from_sunday().to_string();
    let current = format!("{:02}:{:02}", local.hour(), local.minute());

    // Missing entry and explicit null both mean closed today
    match schedule.days.get(&weekday) {
        Some(Some(day)) => day.start <= current && current <= day.end,
        Some(None) | None => false,
    }
}

/// Whether the store is open right now
pub fn is_store_open(config: &Config) -> bool {
    is_store_open_at(config, Utc::now())
}

/// Periodic open-status publisher
///
/// Re-evaluates the schedule once a minute and publishes transitions over
/// a watch channel. The consuming view cancels the token on teardown so a
/// stale task never keeps reporting.
pub struct OpenStatusWatcher {
    config: Arc<Config>,
    shutdown: CancellationToken,
    tx: watch::Sender<bool>,
}

impl OpenStatusWatcher {
    /// Build the watcher; the receiver starts with the current status
    pub fn new(config: Arc<Config>, shutdown: CancellationToken) -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(is_store_open(&config));
        (
            Self {
                config,
                shutdown,
                tx,
            },
            rx,
        )
    }

    /// Main loop: tick, re-evaluate, publish on change, stop on cancel
    pub async fn run(self) {
        tracing::info!("open status watcher started");

        let mut ticker = tokio::time::interval(CHECK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // First tick completes immediately; the channel already holds the
        // initial status
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let open = is_store_open(&self.config);
                    if *self.tx.borrow() != open {
                        tracing::info!(open, "store open status changed");
                        let _ = self.tx.send(open);
                    }
                }
            }
        }

        tracing::info!("open status watcher stopped");
    }
}

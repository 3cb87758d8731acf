//! Recurring inbox reconciliation.
//!
//! Arms the scheduler with the configured interval and keeps syncing until
//! interrupted. Sync failures are reported and retried on the next interval;
//! they never stop the watch.

use super::sync;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::scheduler::Scheduler;
use crate::{msg_error, msg_info, msg_print};
use anyhow::Result;
use std::time::Duration;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let sync_config = config.sync.unwrap_or_default();
    let interval = Duration::from_secs(sync_config.interval_hours * 3600);

    let mut scheduler = Scheduler::new(interval);
    msg_info!(Message::WatchStarted(sync_config.interval_hours));
    scheduler.schedule(|| async {
        if let Err(err) = sync::run().await {
            msg_error!(Message::SyncFailed(err.to_string()));
        }
    });

    tokio::signal::ctrl_c().await?;
    scheduler.unschedule();
    msg_print!(Message::WatchStopped);

    Ok(())
}

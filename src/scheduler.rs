//! In-process daily maintenance scheduler
//!
//! A spawned tokio task sleeps until the next UTC midnight, runs the daily
//! pass (food consumption plus the four treatment countdowns) and goes back
//! to sleep. The decrements go through the same audited store path as user
//! edits.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};

use crate::store::ApiaryStore;

/// Seconds until the next UTC midnight
fn seconds_until_midnight() -> u64 {
    let now = Utc::now();
    let tomorrow = (now + TimeDelta::days(1)).date_naive();
    let midnight = tomorrow
        .and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .unwrap_or(now);
    (midnight - now).num_seconds().max(1) as u64
}

/// Spawn the daily maintenance loop
pub fn spawn_daily_maintenance(store: Arc<ApiaryStore>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let wait = seconds_until_midnight();
            eprintln!("[Scheduler] Next maintenance run in {}s", wait);
            tokio::time::sleep(Duration::from_secs(wait)).await;

            if let Err(e) = store.run_daily_maintenance() {
                eprintln!("[Scheduler] Daily maintenance failed: {}", e);
            }
        }
    })
}

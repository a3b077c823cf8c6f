//! Change ledger and same-day history queries
//!
//! The ledger is append-only: [`record_changes`] is the only writer and no
//! update or delete exists. The "today" queries implement the latest-wins
//! policy: when one (apiary, field) pair changed several times on the same
//! calendar day only the most recent row counts. That is deliberate and
//! load-bearing for the dashboards - do not replace it with a sum of
//! deltas.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::history::{parse_history_int, ChangeDescriptor, TrackedField};
use crate::types::{ApiaryCounts, BoxStats, ChangeRecord};
use crate::utils::current_timestamp;

use super::{ApiaryStore, Database, StoreError, StoreResult};

/// Append one ledger row per descriptor, all sharing one commit instant
///
/// Only called from inside store mutations, so the rows land in the same
/// commit as the entity change they describe.
pub(crate) fn record_changes(
    db: &mut Database,
    user_id: u64,
    apiary_id: u64,
    descriptors: &[ChangeDescriptor],
) {
    let now = current_timestamp();
    for descriptor in descriptors {
        let record = ChangeRecord {
            id: db.next_history_id(),
            user_id,
            apiary_id,
            field: descriptor.field.as_str().to_string(),
            previous_value: descriptor.previous_value.clone(),
            new_value: descriptor.new_value.clone(),
            change_date: now,
        };
        db.history.push(record);
    }
}

/// All ledger rows for one apiary, verifying ownership first
///
/// An empty vec is a normal result; an apiary that was never updated has
/// no history.
pub fn history_for_apiary(
    store: &ApiaryStore,
    user_id: u64,
    apiary_id: u64,
) -> StoreResult<Vec<ChangeRecord>> {
    let db = store.db.lock();
    let apiary = db
        .apiaries
        .iter()
        .find(|a| a.id == apiary_id)
        .ok_or(StoreError::NotFound("apiary"))?;
    if apiary.user_id != user_id {
        return Err(StoreError::Forbidden("apiary"));
    }

    Ok(db
        .history
        .iter()
        .filter(|h| h.apiary_id == apiary_id)
        .cloned()
        .collect())
}

/// Accumulated result of one walk over today's harvest-field rows
#[derive(Debug, Default)]
struct TodayChanges {
    apiary_ids: HashSet<u64>,
    box_count: i64,
    box_medium: i64,
    box_small: i64,
}

fn record_date(record: &ChangeRecord) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(record.change_date, 0).map(|t| t.date_naive())
}

/// Walk today's box-field rows for one user with latest-wins dedup
///
/// Rows are ordered newest first; once an (apiary, field) pair has been
/// seen, older rows for that pair are skipped, so only each pair's most
/// recent same-day value contributes. Values parse through
/// [`parse_history_int`] - malformed rows count as zero, never error.
fn harvested_today_changes(db: &Database, user_id: u64, today: NaiveDate) -> TodayChanges {
    let mut rows: Vec<&ChangeRecord> = db
        .history
        .iter()
        .filter(|h| {
            h.user_id == user_id
                && TrackedField::HARVEST.iter().any(|f| f.as_str() == h.field)
                && record_date(h) == Some(today)
        })
        .collect();

    // Most recent first; ids break ties within one commit instant
    rows.sort_by(|a, b| (b.change_date, b.id).cmp(&(a.change_date, a.id)));

    let mut result = TodayChanges::default();
    let mut seen: HashSet<(u64, &str)> = HashSet::new();

    for row in rows {
        if !seen.insert((row.apiary_id, row.field.as_str())) {
            continue;
        }

        let value = parse_history_int(&row.new_value);
        match row.field.as_str() {
            "box" => result.box_count += value,
            "boxMedium" => result.box_medium += value,
            "boxSmall" => result.box_small += value,
            _ => {}
        }

        result.apiary_ids.insert(row.apiary_id);
    }

    result
}

/// Box totals harvested today (latest value per apiary and field)
pub fn harvested_today_box_stats(store: &ApiaryStore, user_id: u64) -> BoxStats {
    let db = store.db.lock();
    let data = harvested_today_changes(&db, user_id, Utc::now().date_naive());
    BoxStats::new(data.box_count, data.box_medium, data.box_small)
}

/// How many apiaries were harvested today, and how many hives they hold
///
/// The ledger does not store hives, so the hive total is a follow-up sum
/// over current apiary state restricted to the contributing apiaries.
pub fn harvested_today_counts(store: &ApiaryStore, user_id: u64) -> ApiaryCounts {
    let db = store.db.lock();
    let data = harvested_today_changes(&db, user_id, Utc::now().date_naive());

    let hive_count = if data.apiary_ids.is_empty() {
        0
    } else {
        db.apiaries
            .iter()
            .filter(|a| a.user_id == user_id && data.apiary_ids.contains(&a.id))
            .map(|a| a.hives.unwrap_or(0))
            .sum()
    };

    ApiaryCounts {
        apiary_count: data.apiary_ids.len(),
        hive_count,
    }
}

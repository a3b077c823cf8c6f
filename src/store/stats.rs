//! Cross-sectional aggregates over current apiary state
//!
//! These read the entity tables only, never the ledger. Null numeric
//! fields read as zero; a user with no apiaries gets zeros, not errors.

use crate::types::{Apiary, ApiaryCounts, BoxStats};

use super::{ApiaryStore, Database, StoreError, StoreResult};

fn has_harvested_boxes(apiary: &Apiary) -> bool {
    apiary.box_count.unwrap_or(0) > 0
        || apiary.box_medium.unwrap_or(0) > 0
        || apiary.box_small.unwrap_or(0) > 0
}

fn sum_hives<'a>(apiaries: impl Iterator<Item = &'a Apiary>) -> i64 {
    apiaries.map(|a| a.hives.unwrap_or(0)).sum()
}

fn box_stats_of(db: &Database, user_id: u64) -> BoxStats {
    let mut box_count = 0;
    let mut box_medium = 0;
    let mut box_small = 0;

    for apiary in db.apiaries.iter().filter(|a| a.user_id == user_id) {
        box_count += apiary.box_count.unwrap_or(0);
        box_medium += apiary.box_medium.unwrap_or(0);
        box_small += apiary.box_small.unwrap_or(0);
    }

    BoxStats::new(box_count, box_medium, box_small)
}

/// Apiary count and total hives for one user
pub fn apiary_counts(store: &ApiaryStore, user_id: u64) -> ApiaryCounts {
    let db = store.db.lock();
    let owned: Vec<&Apiary> = db.apiaries.iter().filter(|a| a.user_id == user_id).collect();
    ApiaryCounts {
        apiary_count: owned.len(),
        hive_count: sum_hives(owned.into_iter()),
    }
}

/// Cumulative harvested-box totals across all of a user's apiaries
pub fn box_stats(store: &ApiaryStore, user_id: u64) -> BoxStats {
    let db = store.db.lock();
    box_stats_of(&db, user_id)
}

/// Apiaries currently in harvest mode (settings.harvesting == true)
pub fn count_harvesting(store: &ApiaryStore, user_id: u64) -> usize {
    let db = store.db.lock();
    db.settings
        .iter()
        .filter(|s| s.apiary_user_id == user_id && s.harvesting)
        .filter(|s| db.apiaries.iter().any(|a| a.id == s.apiary_id))
        .count()
}

/// Apiaries with any harvested boxes, plus the hives they hold
pub fn harvested_counts(store: &ApiaryStore, user_id: u64) -> ApiaryCounts {
    let db = store.db.lock();
    let harvested: Vec<&Apiary> = db
        .apiaries
        .iter()
        .filter(|a| a.user_id == user_id && has_harvested_boxes(a))
        .collect();
    ApiaryCounts {
        apiary_count: harvested.len(),
        hive_count: sum_hives(harvested.into_iter()),
    }
}

/// Box snapshot for one apiary, verifying ownership
pub fn harvested_totals_for_apiary(
    store: &ApiaryStore,
    user_id: u64,
    apiary_id: u64,
) -> StoreResult<BoxStats> {
    let db = store.db.lock();
    let apiary = db
        .apiaries
        .iter()
        .find(|a| a.id == apiary_id)
        .ok_or(StoreError::NotFound("apiary"))?;
    if apiary.user_id != user_id {
        return Err(StoreError::Forbidden("apiary"));
    }

    Ok(BoxStats::new(
        apiary.box_count.unwrap_or(0),
        apiary.box_medium.unwrap_or(0),
        apiary.box_small.unwrap_or(0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Settings;
    use tempfile::TempDir;

    fn apiary(id: u64, user_id: u64) -> Apiary {
        Apiary {
            id,
            user_id,
            name: format!("Apiary {}", id),
            image: "apiary-default.png".to_string(),
            hives: None,
            status: "normal".to_string(),
            honey: None,
            levudex: None,
            sugar: None,
            box_count: None,
            box_medium: None,
            box_small: None,
            t_oxalic: None,
            t_amitraz: None,
            t_flumetrine: None,
            t_fence: None,
            t_comment: None,
            transhumance: None,
            latitude: None,
            longitude: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn test_store() -> (ApiaryStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ApiaryStore::open(dir.path().join("data.jsonl"));
        (store, dir)
    }

    #[test]
    fn test_null_fields_sum_as_zero() {
        let (store, _dir) = test_store();
        {
            let mut db = store.db.lock();
            let mut a = apiary(1, 1);
            a.hives = Some(5);
            a.box_count = Some(2);
            db.apiaries.push(a);
            db.apiaries.push(apiary(2, 1)); // everything null
        }

        let counts = apiary_counts(&store, 1);
        assert_eq!(counts.apiary_count, 2);
        assert_eq!(counts.hive_count, 5);

        let stats = box_stats(&store, 1);
        assert_eq!(stats.box_count, 2);
        assert_eq!(stats.box_medium, 0);
        assert_eq!(stats.total, 2);
    }

    #[test]
    fn test_user_with_no_apiaries_gets_zeros() {
        let (store, _dir) = test_store();
        assert_eq!(apiary_counts(&store, 42), ApiaryCounts::default());
        assert_eq!(box_stats(&store, 42), BoxStats::default());
        assert_eq!(harvested_counts(&store, 42), ApiaryCounts::default());
        assert_eq!(count_harvesting(&store, 42), 0);
    }

    #[test]
    fn test_harvested_counts_filters_by_boxes() {
        let (store, _dir) = test_store();
        {
            let mut db = store.db.lock();
            let mut a = apiary(1, 1);
            a.hives = Some(10);
            a.box_small = Some(1);
            db.apiaries.push(a);

            let mut b = apiary(2, 1);
            b.hives = Some(20);
            b.box_count = Some(0);
            db.apiaries.push(b);
        }

        let counts = harvested_counts(&store, 1);
        assert_eq!(counts.apiary_count, 1);
        assert_eq!(counts.hive_count, 10);
    }

    #[test]
    fn test_count_harvesting_reads_settings() {
        let (store, _dir) = test_store();
        {
            let mut db = store.db.lock();
            db.apiaries.push(apiary(1, 1));
            db.apiaries.push(apiary(2, 1));
            let mut s1 = Settings::new(1, 1, 1);
            s1.harvesting = true;
            db.settings.push(s1);
            db.settings.push(Settings::new(2, 2, 1));
        }

        assert_eq!(count_harvesting(&store, 1), 1);
    }

    #[test]
    fn test_per_apiary_totals() {
        let (store, _dir) = test_store();
        {
            let mut db = store.db.lock();
            let mut a = apiary(1, 1);
            a.box_count = Some(2);
            a.box_medium = Some(3);
            db.apiaries.push(a);
        }

        let stats = harvested_totals_for_apiary(&store, 1, 1).unwrap();
        assert_eq!(stats.box_count, 2);
        assert_eq!(stats.box_medium, 3);
        assert_eq!(stats.box_small, 0);
        assert_eq!(stats.total, 5);

        assert!(harvested_totals_for_apiary(&store, 1, 9).is_err());
        assert!(harvested_totals_for_apiary(&store, 2, 1).is_err());
    }
}

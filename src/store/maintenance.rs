//! Daily maintenance: food consumption and treatment-day countdowns
//!
//! The daily job goes through the same snapshot/diff/ledger path as a user
//! edit, so scheduled decrements leave the same audit trail a manual change
//! would. Counters never go below zero and an apiary already at zero (or
//! null) is left untouched, so the job writes no noise rows.

use crate::history::{diff, ApiarySnapshot, TrackedField};

use super::{history, ApiaryStore, StoreError, StoreResult};

/// Kilograms of food deducted from each stocked apiary per day
pub const DAILY_FOOD_CONSUMPTION: f64 = 1.0;

/// Decrement one treatment-day counter on every apiary that has days left
///
/// Returns the number of apiaries touched. All decrements and their ledger
/// rows land in a single commit; `updated_at` is left alone because nothing
/// the owner did changed.
pub fn subtract_one_day_treatment(store: &ApiaryStore, field: TrackedField) -> StoreResult<usize> {
    if !TrackedField::TREATMENTS.contains(&field) {
        return Err(StoreError::Conflict(format!(
            "'{}' is not a treatment counter",
            field
        )));
    }

    let mut db = store.db.lock();
    let backup = db.clone();

    let mut pending = Vec::new();
    for apiary in db.apiaries.iter_mut() {
        let current = match field {
            TrackedField::TOxalic => apiary.t_oxalic,
            TrackedField::TAmitraz => apiary.t_amitraz,
            TrackedField::TFlumetrine => apiary.t_flumetrine,
            TrackedField::TFence => apiary.t_fence,
            _ => unreachable!(),
        };
        let days = match current {
            Some(days) if days > 0 => days,
            _ => continue,
        };

        let before = ApiarySnapshot::of(apiary);
        match field {
            TrackedField::TOxalic => apiary.t_oxalic = Some(days - 1),
            TrackedField::TAmitraz => apiary.t_amitraz = Some(days - 1),
            TrackedField::TFlumetrine => apiary.t_flumetrine = Some(days - 1),
            TrackedField::TFence => apiary.t_fence = Some(days - 1),
            _ => unreachable!(),
        }
        let after = ApiarySnapshot::of(apiary);

        pending.push((apiary.user_id, apiary.id, diff(&before, &after)));
    }

    let affected = pending.len();
    for (user_id, apiary_id, descriptors) in pending {
        history::record_changes(&mut db, user_id, apiary_id, &descriptors);
    }

    if affected > 0 {
        store.commit(&mut db, backup)?;
    }
    Ok(affected)
}

/// Deduct one day of food from every apiary with stock remaining
///
/// Honey, levudex and sugar each drop by [`DAILY_FOOD_CONSUMPTION`], floored
/// at zero. Returns the number of apiaries touched.
pub fn subtract_food(store: &ApiaryStore) -> StoreResult<usize> {
    let mut db = store.db.lock();
    let backup = db.clone();

    let mut pending = Vec::new();
    for apiary in db.apiaries.iter_mut() {
        let stocked = [apiary.honey, apiary.levudex, apiary.sugar]
            .iter()
            .any(|v| v.map(|x| x > 0.0).unwrap_or(false));
        if !stocked {
            continue;
        }

        let before = ApiarySnapshot::of(apiary);
        apiary.honey = apiary.honey.map(|v| (v - DAILY_FOOD_CONSUMPTION).max(0.0));
        apiary.levudex = apiary.levudex.map(|v| (v - DAILY_FOOD_CONSUMPTION).max(0.0));
        apiary.sugar = apiary.sugar.map(|v| (v - DAILY_FOOD_CONSUMPTION).max(0.0));
        let after = ApiarySnapshot::of(apiary);

        let descriptors = diff(&before, &after);
        if !descriptors.is_empty() {
            pending.push((apiary.user_id, apiary.id, descriptors));
        }
    }

    let affected = pending.len();
    for (user_id, apiary_id, descriptors) in pending {
        history::record_changes(&mut db, user_id, apiary_id, &descriptors);
    }

    if affected > 0 {
        store.commit(&mut db, backup)?;
    }
    Ok(affected)
}

/// Run the whole daily pass: food first, then the four treatment counters
pub fn run_daily(store: &ApiaryStore) -> StoreResult<()> {
    let fed = subtract_food(store)?;
    eprintln!("[Maintenance] Food deducted on {} apiaries", fed);

    for field in TrackedField::TREATMENTS {
        let n = subtract_one_day_treatment(store, field)?;
        if n > 0 {
            eprintln!("[Maintenance] {} counted down on {} apiaries", field, n);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CreateApiary, UpdateApiary};
    use tempfile::TempDir;

    fn test_store() -> (ApiaryStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ApiaryStore::open(dir.path().join("data.jsonl"));
        (store, dir)
    }

    fn apiary_with(store: &ApiaryStore, user_id: u64, changes: UpdateApiary) -> u64 {
        let id = store
            .create_apiary(
                user_id,
                CreateApiary {
                    name: "Valley".to_string(),
                    ..Default::default()
                },
            )
            .unwrap()
            .apiary
            .id;
        store.update_apiary(user_id, id, changes).unwrap();
        id
    }

    #[test]
    fn test_treatment_countdown_writes_ledger_rows() {
        let (store, _dir) = test_store();
        let id = apiary_with(
            &store,
            1,
            UpdateApiary {
                t_oxalic: Some(3),
                ..Default::default()
            },
        );
        let rows_before = store.history_for_apiary(1, id).unwrap().len();

        let affected = subtract_one_day_treatment(&store, TrackedField::TOxalic).unwrap();
        assert_eq!(affected, 1);

        let detail = store.get_apiary(1, id).unwrap();
        assert_eq!(detail.apiary.t_oxalic, Some(2));

        let history = store.history_for_apiary(1, id).unwrap();
        assert_eq!(history.len(), rows_before + 1);
        let row = history.last().unwrap();
        assert_eq!(row.field, "tOxalic");
        assert_eq!(row.previous_value, "3");
        assert_eq!(row.new_value, "2");
    }

    #[test]
    fn test_zero_counter_is_left_alone() {
        let (store, _dir) = test_store();
        let id = apiary_with(
            &store,
            1,
            UpdateApiary {
                t_amitraz: Some(0),
                ..Default::default()
            },
        );
        let rows_before = store.history_for_apiary(1, id).unwrap().len();

        let affected = subtract_one_day_treatment(&store, TrackedField::TAmitraz).unwrap();
        assert_eq!(affected, 0);
        assert_eq!(store.history_for_apiary(1, id).unwrap().len(), rows_before);
    }

    #[test]
    fn test_non_treatment_field_rejected() {
        let (store, _dir) = test_store();
        assert!(subtract_one_day_treatment(&store, TrackedField::Box).is_err());
        assert!(subtract_one_day_treatment(&store, TrackedField::Honey).is_err());
    }

    #[test]
    fn test_food_floors_at_zero() {
        let (store, _dir) = test_store();
        let id = apiary_with(
            &store,
            1,
            UpdateApiary {
                honey: Some(0.4),
                levudex: Some(5.0),
                ..Default::default()
            },
        );

        let affected = subtract_food(&store).unwrap();
        assert_eq!(affected, 1);

        let apiary = store.get_apiary(1, id).unwrap().apiary;
        assert_eq!(apiary.honey, Some(0.0));
        assert_eq!(apiary.levudex, Some(4.0));
        // Sugar was already 0 and stays there
        assert_eq!(apiary.sugar, Some(0.0));

        // Ledger rows: honey 0.4 -> 0 and levudex 5 -> 4
        let fields: Vec<String> = store
            .history_for_apiary(1, id)
            .unwrap()
            .iter()
            .map(|h| h.field.clone())
            .collect();
        assert!(fields.contains(&"honey".to_string()));
        assert!(fields.contains(&"levudex".to_string()));
    }

    #[test]
    fn test_empty_apiary_untouched_by_food_job() {
        let (store, _dir) = test_store();
        let id = apiary_with(&store, 1, UpdateApiary::default());
        let rows_before = store.history_for_apiary(1, id).unwrap().len();

        let affected = subtract_food(&store).unwrap();
        assert_eq!(affected, 0);
        assert_eq!(store.history_for_apiary(1, id).unwrap().len(), rows_before);
    }

    #[test]
    fn test_updated_at_preserved_by_daily_job() {
        let (store, _dir) = test_store();
        let id = apiary_with(
            &store,
            1,
            UpdateApiary {
                t_fence: Some(2),
                ..Default::default()
            },
        );
        let stamp = store.get_apiary(1, id).unwrap().apiary.updated_at;

        subtract_one_day_treatment(&store, TrackedField::TFence).unwrap();
        assert_eq!(store.get_apiary(1, id).unwrap().apiary.updated_at, stamp);
    }
}

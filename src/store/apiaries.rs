//! Apiary CRUD with audited updates
//!
//! Every update captures a snapshot before mutating, diffs it against the
//! result and appends one ledger row per changed tracked field, all inside
//! the same commit. Creation writes no ledger rows (there is nothing to
//! diff against) and deletion never touches existing rows.

use crate::history::{diff, ApiarySnapshot};
use crate::types::{default_image, Apiary, ApiaryDetail, CreateApiary, Settings, UpdateApiary};
use crate::utils::current_timestamp;

use super::{history, ApiaryStore, Database, StoreError, StoreResult};

fn detail(db: &Database, apiary: Apiary) -> ApiaryDetail {
    let settings = db
        .settings
        .iter()
        .find(|s| s.apiary_id == apiary.id)
        .cloned();
    ApiaryDetail { apiary, settings }
}

/// Create an apiary together with its default settings row
pub fn create_apiary(
    store: &ApiaryStore,
    user_id: u64,
    data: CreateApiary,
) -> StoreResult<ApiaryDetail> {
    let mut db = store.db.lock();
    let backup = db.clone();
    let now = current_timestamp();

    let apiary = Apiary {
        id: db.next_apiary_id(),
        user_id,
        name: data.name,
        image: data.image.unwrap_or_else(default_image),
        hives: data.hives.or(Some(0)),
        status: data.status.unwrap_or_else(|| "normal".to_string()),
        honey: data.honey.or(Some(0.0)),
        levudex: data.levudex.or(Some(0.0)),
        sugar: data.sugar.or(Some(0.0)),
        box_count: data.box_count.or(Some(0)),
        box_medium: data.box_medium.or(Some(0)),
        box_small: data.box_small.or(Some(0)),
        t_oxalic: data.t_oxalic.or(Some(0)),
        t_amitraz: data.t_amitraz.or(Some(0)),
        t_flumetrine: data.t_flumetrine.or(Some(0)),
        t_fence: data.t_fence.or(Some(0)),
        t_comment: data.t_comment.or_else(|| Some(String::new())),
        transhumance: data.transhumance.or(Some(0)),
        latitude: data.latitude,
        longitude: data.longitude,
        created_at: now,
        updated_at: now,
    };

    let settings = Settings::new(db.next_settings_id(), apiary.id, user_id);

    db.apiaries.push(apiary.clone());
    db.settings.push(settings.clone());
    store.commit(&mut db, backup)?;

    Ok(ApiaryDetail {
        apiary,
        settings: Some(settings),
    })
}

pub fn list_by_user(store: &ApiaryStore, user_id: u64) -> Vec<ApiaryDetail> {
    let db = store.db.lock();
    db.apiaries
        .iter()
        .filter(|a| a.user_id == user_id)
        .map(|a| detail(&db, a.clone()))
        .collect()
}

/// Fetch one apiary, verifying ownership
pub fn get_apiary(store: &ApiaryStore, user_id: u64, apiary_id: u64) -> StoreResult<ApiaryDetail> {
    let db = store.db.lock();
    let apiary = db
        .apiaries
        .iter()
        .find(|a| a.id == apiary_id)
        .ok_or(StoreError::NotFound("apiary"))?;
    if apiary.user_id != user_id {
        return Err(StoreError::Forbidden("apiary"));
    }
    Ok(detail(&db, apiary.clone()))
}

/// Apply a partial update and record the resulting diff in the ledger
///
/// Snapshot, mutation and ledger append all commit together; a failed
/// persist rolls every part back.
pub fn update_apiary(
    store: &ApiaryStore,
    user_id: u64,
    apiary_id: u64,
    changes: UpdateApiary,
) -> StoreResult<Apiary> {
    let mut db = store.db.lock();
    let backup = db.clone();

    let (owner, before, updated) = {
        let apiary = db
            .apiaries
            .iter_mut()
            .find(|a| a.id == apiary_id)
            .ok_or(StoreError::NotFound("apiary"))?;
        if apiary.user_id != user_id {
            return Err(StoreError::Forbidden("apiary"));
        }

        let before = ApiarySnapshot::of(apiary);

        if let Some(name) = changes.name {
            apiary.name = name;
        }
        if let Some(hives) = changes.hives {
            apiary.hives = Some(hives);
        }
        if let Some(status) = changes.status {
            apiary.status = status;
        }
        if let Some(image) = changes.image {
            apiary.image = image;
        }
        if let Some(honey) = changes.honey {
            apiary.honey = Some(honey);
        }
        if let Some(levudex) = changes.levudex {
            apiary.levudex = Some(levudex);
        }
        if let Some(sugar) = changes.sugar {
            apiary.sugar = Some(sugar);
        }
        if let Some(box_count) = changes.box_count {
            apiary.box_count = Some(box_count);
        }
        if let Some(box_medium) = changes.box_medium {
            apiary.box_medium = Some(box_medium);
        }
        if let Some(box_small) = changes.box_small {
            apiary.box_small = Some(box_small);
        }
        if let Some(t_oxalic) = changes.t_oxalic {
            apiary.t_oxalic = Some(t_oxalic);
        }
        if let Some(t_amitraz) = changes.t_amitraz {
            apiary.t_amitraz = Some(t_amitraz);
        }
        if let Some(t_flumetrine) = changes.t_flumetrine {
            apiary.t_flumetrine = Some(t_flumetrine);
        }
        if let Some(t_fence) = changes.t_fence {
            apiary.t_fence = Some(t_fence);
        }
        if let Some(t_comment) = changes.t_comment {
            apiary.t_comment = Some(t_comment);
        }
        if let Some(transhumance) = changes.transhumance {
            apiary.transhumance = Some(transhumance);
        }
        if let Some(latitude) = changes.latitude {
            apiary.latitude = Some(latitude);
        }
        if let Some(longitude) = changes.longitude {
            apiary.longitude = Some(longitude);
        }
        apiary.updated_at = current_timestamp();

        (apiary.user_id, before, apiary.clone())
    };

    let after = ApiarySnapshot::of(&updated);
    let descriptors = diff(&before, &after);
    history::record_changes(&mut db, owner, apiary_id, &descriptors);

    store.commit(&mut db, backup)?;
    Ok(updated)
}

/// Delete an apiary, its settings and its tasks; ledger rows are retained
pub fn delete_apiary(store: &ApiaryStore, user_id: u64, apiary_id: u64) -> StoreResult<()> {
    let mut db = store.db.lock();
    let backup = db.clone();

    let apiary = db
        .apiaries
        .iter()
        .find(|a| a.id == apiary_id)
        .ok_or(StoreError::NotFound("apiary"))?;
    if apiary.user_id != user_id {
        return Err(StoreError::Forbidden("apiary"));
    }

    db.apiaries.retain(|a| a.id != apiary_id);
    db.settings.retain(|s| s.apiary_id != apiary_id);
    db.tasks.retain(|t| t.apiary_id != Some(apiary_id));

    store.commit(&mut db, backup)
}

#[cfg(test)]
mod tests {
    use super::super::{ApiaryStore, StoreError};
    use crate::types::{CreateApiary, UpdateApiary};
    use tempfile::TempDir;

    fn test_store() -> (ApiaryStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ApiaryStore::open(dir.path().join("data.jsonl"));
        (store, dir)
    }

    fn create(store: &ApiaryStore, user_id: u64, name: &str) -> u64 {
        store
            .create_apiary(
                user_id,
                CreateApiary {
                    name: name.to_string(),
                    ..Default::default()
                },
            )
            .unwrap()
            .apiary
            .id
    }

    #[test]
    fn test_create_writes_no_history() {
        let (store, _dir) = test_store();
        let id = create(&store, 1, "Valley");

        let detail = store.get_apiary(1, id).unwrap();
        assert_eq!(detail.apiary.box_count, Some(0));
        assert!(detail.settings.is_some());
        assert!(store.history_for_apiary(1, id).unwrap().is_empty());
    }

    #[test]
    fn test_update_appends_one_row_per_changed_field() {
        let (store, _dir) = test_store();
        let id = create(&store, 1, "Valley");

        store
            .update_apiary(
                1,
                id,
                UpdateApiary {
                    hives: Some(8),
                    box_count: Some(3),
                    ..Default::default()
                },
            )
            .unwrap();

        let history = store.history_for_apiary(1, id).unwrap();
        assert_eq!(history.len(), 2);

        let box_row = history.iter().find(|h| h.field == "box").unwrap();
        assert_eq!(box_row.previous_value, "0");
        assert_eq!(box_row.new_value, "3");
        assert_eq!(box_row.user_id, 1);
        assert_eq!(box_row.apiary_id, id);
    }

    #[test]
    fn test_noop_update_appends_nothing() {
        let (store, _dir) = test_store();
        let id = create(&store, 1, "Valley");

        store.update_apiary(1, id, UpdateApiary::default()).unwrap();
        assert!(store.history_for_apiary(1, id).unwrap().is_empty());
    }

    #[test]
    fn test_ownership_enforced() {
        let (store, _dir) = test_store();
        let id = create(&store, 1, "Valley");

        let err = store.update_apiary(2, id, UpdateApiary::default());
        assert!(matches!(err, Err(StoreError::Forbidden(_))));

        let err = store.get_apiary(2, id);
        assert!(matches!(err, Err(StoreError::Forbidden(_))));

        let err = store.get_apiary(1, 999);
        assert!(matches!(err, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_delete_retains_history() {
        let (store, _dir) = test_store();
        let id = create(&store, 1, "Valley");

        store
            .update_apiary(
                1,
                id,
                UpdateApiary {
                    hives: Some(4),
                    ..Default::default()
                },
            )
            .unwrap();
        store.delete_apiary(1, id).unwrap();

        // Entity and settings gone, ledger rows still there
        assert!(matches!(
            store.get_apiary(1, id),
            Err(StoreError::NotFound(_))
        ));
        let db = store.db.lock();
        assert!(db.settings.is_empty());
        assert_eq!(db.history.len(), 1);
    }

    #[test]
    fn test_coordinates_are_not_audited() {
        let (store, _dir) = test_store();
        let id = create(&store, 1, "Valley");

        store
            .update_apiary(
                1,
                id,
                UpdateApiary {
                    latitude: Some(-34.9),
                    longitude: Some(-57.9),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(store.history_for_apiary(1, id).unwrap().is_empty());
    }
}

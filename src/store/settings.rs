//! Settings operations

use crate::types::{Settings, UpdateSettings};

use super::{ApiaryStore, StoreError, StoreResult};

/// Apply a partial update to the settings row of one apiary
pub fn update_settings(
    store: &ApiaryStore,
    user_id: u64,
    apiary_id: u64,
    changes: UpdateSettings,
) -> StoreResult<Settings> {
    let mut db = store.db.lock();
    let backup = db.clone();

    let updated = {
        let settings = db
            .settings
            .iter_mut()
            .find(|s| s.apiary_id == apiary_id)
            .ok_or(StoreError::NotFound("settings"))?;
        if settings.apiary_user_id != user_id {
            return Err(StoreError::Forbidden("settings"));
        }

        if let Some(v) = changes.honey {
            settings.honey = v;
        }
        if let Some(v) = changes.levudex {
            settings.levudex = v;
        }
        if let Some(v) = changes.sugar {
            settings.sugar = v;
        }
        if let Some(v) = changes.box_count {
            settings.box_count = v;
        }
        if let Some(v) = changes.box_medium {
            settings.box_medium = v;
        }
        if let Some(v) = changes.box_small {
            settings.box_small = v;
        }
        if let Some(v) = changes.t_oxalic {
            settings.t_oxalic = v;
        }
        if let Some(v) = changes.t_amitraz {
            settings.t_amitraz = v;
        }
        if let Some(v) = changes.t_flumetrine {
            settings.t_flumetrine = v;
        }
        if let Some(v) = changes.t_fence {
            settings.t_fence = v;
        }
        if let Some(v) = changes.t_comment {
            settings.t_comment = v;
        }
        if let Some(v) = changes.transhumance {
            settings.transhumance = v;
        }
        if let Some(v) = changes.harvesting {
            settings.harvesting = v;
        }

        settings.clone()
    };

    store.commit(&mut db, backup)?;
    Ok(updated)
}

/// Set the harvesting flag on every settings row the user owns
pub fn set_harvesting_for_all(
    store: &ApiaryStore,
    user_id: u64,
    harvesting: bool,
) -> StoreResult<usize> {
    let mut db = store.db.lock();
    let backup = db.clone();

    let mut updated = 0;
    for settings in db
        .settings
        .iter_mut()
        .filter(|s| s.apiary_user_id == user_id)
    {
        if settings.harvesting != harvesting {
            settings.harvesting = harvesting;
            updated += 1;
        }
    }

    if updated > 0 {
        store.commit(&mut db, backup)?;
    }
    Ok(updated)
}

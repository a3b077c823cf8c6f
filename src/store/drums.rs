//! Honey drum operations

use crate::types::{CreateDrum, Drum, DrumSummary, UpdateDrum};
use crate::utils::current_timestamp;

use super::{ApiaryStore, StoreError, StoreResult};

pub fn list_by_user(store: &ApiaryStore, user_id: u64) -> Vec<Drum> {
    let db = store.db.lock();
    db.drums
        .iter()
        .filter(|d| d.user_id == user_id)
        .cloned()
        .collect()
}

/// Register a drum; the code must be unique per user
pub fn create_drum(store: &ApiaryStore, user_id: u64, data: CreateDrum) -> StoreResult<Drum> {
    let mut db = store.db.lock();
    let backup = db.clone();

    if db
        .drums
        .iter()
        .any(|d| d.user_id == user_id && d.code == data.code)
    {
        return Err(StoreError::Conflict(format!(
            "drum code '{}' already exists",
            data.code
        )));
    }

    let now = current_timestamp();
    let drum = Drum {
        id: db.next_drum_id(),
        user_id,
        code: data.code,
        tare: data.tare,
        weight: data.weight,
        sold: false,
        created_at: now,
        updated_at: now,
    };

    db.drums.push(drum.clone());
    store.commit(&mut db, backup)?;
    Ok(drum)
}

pub fn update_drum(
    store: &ApiaryStore,
    user_id: u64,
    drum_id: u64,
    changes: UpdateDrum,
) -> StoreResult<Drum> {
    let mut db = store.db.lock();
    let backup = db.clone();

    if let Some(code) = &changes.code {
        if db
            .drums
            .iter()
            .any(|d| d.user_id == user_id && d.id != drum_id && d.code == *code)
        {
            return Err(StoreError::Conflict(format!(
                "drum code '{}' already exists",
                code
            )));
        }
    }

    let updated = {
        let drum = db
            .drums
            .iter_mut()
            .find(|d| d.id == drum_id)
            .ok_or(StoreError::NotFound("drum"))?;
        if drum.user_id != user_id {
            return Err(StoreError::Forbidden("drum"));
        }

        if let Some(code) = changes.code {
            drum.code = code;
        }
        if let Some(tare) = changes.tare {
            drum.tare = tare;
        }
        if let Some(weight) = changes.weight {
            drum.weight = weight;
        }
        if let Some(sold) = changes.sold {
            drum.sold = sold;
        }
        drum.updated_at = current_timestamp();

        drum.clone()
    };

    store.commit(&mut db, backup)?;
    Ok(updated)
}

pub fn delete_drum(store: &ApiaryStore, user_id: u64, drum_id: u64) -> StoreResult<()> {
    let mut db = store.db.lock();
    let backup = db.clone();

    let drum = db
        .drums
        .iter()
        .find(|d| d.id == drum_id)
        .ok_or(StoreError::NotFound("drum"))?;
    if drum.user_id != user_id {
        return Err(StoreError::Forbidden("drum"));
    }

    db.drums.retain(|d| d.id != drum_id);
    store.commit(&mut db, backup)
}

/// Drum totals for one user; net weight counts unsold drums only
pub fn summary(store: &ApiaryStore, user_id: u64) -> DrumSummary {
    let db = store.db.lock();
    let mut summary = DrumSummary::default();

    for drum in db.drums.iter().filter(|d| d.user_id == user_id) {
        summary.drum_count += 1;
        if !drum.sold {
            summary.unsold_count += 1;
            summary.net_weight += drum.net_weight();
        }
    }

    summary
}

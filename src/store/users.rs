//! User account operations

use crate::types::{Role, User};
use crate::utils::current_timestamp;

use super::{ApiaryStore, StoreError, StoreResult};

/// Register a new user; the caller supplies an already-hashed password
pub fn register_user(
    store: &ApiaryStore,
    name: String,
    surname: String,
    email: String,
    password_hash: String,
) -> StoreResult<User> {
    let mut db = store.db.lock();
    let backup = db.clone();

    if db
        .users
        .iter()
        .any(|u| u.email.eq_ignore_ascii_case(&email))
    {
        return Err(StoreError::Conflict(format!(
            "email '{}' is already registered",
            email
        )));
    }

    let user = User {
        id: db.next_user_id(),
        name,
        surname,
        email,
        password_hash,
        role: Role::User,
        created_at: current_timestamp(),
    };

    db.users.push(user.clone());
    store.commit(&mut db, backup)?;
    Ok(user)
}

pub fn find_by_email(store: &ApiaryStore, email: &str) -> Option<User> {
    let db = store.db.lock();
    db.users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(email))
        .cloned()
}

pub fn get_user(store: &ApiaryStore, user_id: u64) -> Option<User> {
    let db = store.db.lock();
    db.users.iter().find(|u| u.id == user_id).cloned()
}

/// Delete a user and everything they own
///
/// Apiaries, settings, tasks and drums go; ledger rows stay. The audit
/// trail outlives its entities.
pub fn delete_user(store: &ApiaryStore, user_id: u64) -> StoreResult<()> {
    let mut db = store.db.lock();
    let backup = db.clone();

    if !db.users.iter().any(|u| u.id == user_id) {
        return Err(StoreError::NotFound("user"));
    }

    db.users.retain(|u| u.id != user_id);
    db.apiaries.retain(|a| a.user_id != user_id);
    db.settings.retain(|s| s.apiary_user_id != user_id);
    db.tasks.retain(|t| t.user_id != user_id);
    db.drums.retain(|d| d.user_id != user_id);

    store.commit(&mut db, backup)
}

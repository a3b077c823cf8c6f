//! Task operations

use crate::types::{CreateTask, Task, UpdateTask};
use crate::utils::current_timestamp;

use super::{ApiaryStore, StoreError, StoreResult};

pub fn list_by_user(store: &ApiaryStore, user_id: u64) -> Vec<Task> {
    let db = store.db.lock();
    db.tasks
        .iter()
        .filter(|t| t.user_id == user_id)
        .cloned()
        .collect()
}

/// Create a task; a linked apiary must exist and belong to the user
pub fn create_task(store: &ApiaryStore, user_id: u64, data: CreateTask) -> StoreResult<Task> {
    let mut db = store.db.lock();
    let backup = db.clone();

    if let Some(apiary_id) = data.apiary_id {
        let apiary = db
            .apiaries
            .iter()
            .find(|a| a.id == apiary_id)
            .ok_or(StoreError::NotFound("apiary"))?;
        if apiary.user_id != user_id {
            return Err(StoreError::Forbidden("apiary"));
        }
    }

    let now = current_timestamp();
    let task = Task {
        id: db.next_task_id(),
        user_id,
        apiary_id: data.apiary_id,
        title: data.title,
        description: data.description,
        completed: false,
        due_date: data.due_date,
        created_at: now,
        updated_at: now,
    };

    db.tasks.push(task.clone());
    store.commit(&mut db, backup)?;
    Ok(task)
}

pub fn update_task(
    store: &ApiaryStore,
    user_id: u64,
    task_id: u64,
    changes: UpdateTask,
) -> StoreResult<Task> {
    let mut db = store.db.lock();
    let backup = db.clone();

    let updated = {
        let task = db
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(StoreError::NotFound("task"))?;
        if task.user_id != user_id {
            return Err(StoreError::Forbidden("task"));
        }

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = Some(description);
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = Some(due_date);
        }
        task.updated_at = current_timestamp();

        task.clone()
    };

    store.commit(&mut db, backup)?;
    Ok(updated)
}

pub fn delete_task(store: &ApiaryStore, user_id: u64, task_id: u64) -> StoreResult<()> {
    let mut db = store.db.lock();
    let backup = db.clone();

    let task = db
        .tasks
        .iter()
        .find(|t| t.id == task_id)
        .ok_or(StoreError::NotFound("task"))?;
    if task.user_id != user_id {
        return Err(StoreError::Forbidden("task"));
    }

    db.tasks.retain(|t| t.id != task_id);
    store.commit(&mut db, backup)
}

#[cfg(test)]
mod tests {
    use super::super::{ApiaryStore, StoreError};
    use crate::types::{CreateApiary, CreateTask, UpdateTask};
    use tempfile::TempDir;

    fn test_store() -> (ApiaryStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ApiaryStore::open(dir.path().join("data.jsonl"));
        (store, dir)
    }

    fn new_task(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: None,
            apiary_id: None,
            due_date: None,
        }
    }

    #[test]
    fn test_create_and_complete() {
        let (store, _dir) = test_store();

        let task = store.create_task(1, new_task("Check queen")).unwrap();
        assert!(!task.completed);

        let task = store
            .update_task(
                1,
                task.id,
                UpdateTask {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(task.completed);
        assert_eq!(store.list_tasks(1).len(), 1);
    }

    #[test]
    fn test_linked_apiary_must_be_owned() {
        let (store, _dir) = test_store();
        let apiary = store
            .create_apiary(
                1,
                CreateApiary {
                    name: "Valley".to_string(),
                    ..Default::default()
                },
            )
            .unwrap()
            .apiary;

        let mut data = new_task("Feed");
        data.apiary_id = Some(apiary.id);
        let err = store.create_task(2, data);
        assert!(matches!(err, Err(StoreError::Forbidden(_))));

        let mut data = new_task("Feed");
        data.apiary_id = Some(999);
        let err = store.create_task(1, data);
        assert!(matches!(err, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_ownership_enforced() {
        let (store, _dir) = test_store();
        let task = store.create_task(1, new_task("Inspect")).unwrap();

        assert!(store.update_task(2, task.id, UpdateTask::default()).is_err());
        assert!(store.delete_task(2, task.id).is_err());
        assert!(store.list_tasks(2).is_empty());

        store.delete_task(1, task.id).unwrap();
        assert!(store.list_tasks(1).is_empty());
    }
}

//! Beekeeping task types

use serde::{Deserialize, Serialize};

/// A to-do item, optionally linked to one apiary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    #[serde(rename = "userId")]
    pub user_id: u64,
    #[serde(rename = "apiaryId", default, skip_serializing_if = "Option::is_none")]
    pub apiary_id: Option<u64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: i64,
}

/// Request body for creating a task
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "apiaryId")]
    pub apiary_id: Option<u64>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<i64>,
}

/// Partial update request for a task
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<i64>,
}

//! Change ledger row type
//!
//! One row records a single field's before/after value for one apiary at one
//! timestamp. Rows are write-once: nothing in the store ever updates or
//! deletes them, and deleting an apiary leaves its rows behind on purpose so
//! the audit trail survives the entity.

use serde::{Deserialize, Serialize};

/// An immutable entry in the apiary change ledger
///
/// Values are stored as their string rendering regardless of source type;
/// the empty string encodes null. Readers reconstructing numbers must go
/// through [`crate::history::parse_history_int`], which defaults to zero on
/// anything unparseable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub id: u64,
    #[serde(rename = "userId")]
    pub user_id: u64,
    #[serde(rename = "apiaryId")]
    pub apiary_id: u64,
    pub field: String,
    #[serde(rename = "previousValue", default)]
    pub previous_value: String,
    #[serde(rename = "newValue", default)]
    pub new_value: String,
    #[serde(rename = "changeDate")]
    pub change_date: i64,
}

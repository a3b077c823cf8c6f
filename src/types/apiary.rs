//! Apiary types
//!
//! An apiary is the auditable record of this system: every tracked-field
//! change to it lands in the change ledger (see the `history` module).
//! Numeric quantities are `Option` - a missing value means "never set" and
//! is read as zero by every aggregate.

use serde::{Deserialize, Serialize};

use super::Settings;

/// Default image reference for apiaries created without one
pub fn default_image() -> String {
    "apiary-default.png".to_string()
}

fn default_status() -> String {
    "normal".to_string()
}

/// An apiary record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apiary {
    pub id: u64,
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub name: String,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hives: Option<i64>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honey: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levudex: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    #[serde(rename = "box", default, skip_serializing_if = "Option::is_none")]
    pub box_count: Option<i64>,
    #[serde(rename = "boxMedium", default, skip_serializing_if = "Option::is_none")]
    pub box_medium: Option<i64>,
    #[serde(rename = "boxSmall", default, skip_serializing_if = "Option::is_none")]
    pub box_small: Option<i64>,
    #[serde(rename = "tOxalic", default, skip_serializing_if = "Option::is_none")]
    pub t_oxalic: Option<i64>,
    #[serde(rename = "tAmitraz", default, skip_serializing_if = "Option::is_none")]
    pub t_amitraz: Option<i64>,
    #[serde(rename = "tFlumetrine", default, skip_serializing_if = "Option::is_none")]
    pub t_flumetrine: Option<i64>,
    #[serde(rename = "tFence", default, skip_serializing_if = "Option::is_none")]
    pub t_fence: Option<i64>,
    #[serde(rename = "tComment", default, skip_serializing_if = "Option::is_none")]
    pub t_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transhumance: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: i64,
}

/// Apiary plus its settings row, for detail responses
#[derive(Debug, Clone, Serialize)]
pub struct ApiaryDetail {
    #[serde(flatten)]
    pub apiary: Apiary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

/// Request body for creating an apiary
///
/// Quantities left out default to zero, matching what a fresh apiary looks
/// like in the mobile app.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateApiary {
    pub name: String,
    pub hives: Option<i64>,
    pub status: Option<String>,
    pub image: Option<String>,
    pub honey: Option<f64>,
    pub levudex: Option<f64>,
    pub sugar: Option<f64>,
    #[serde(rename = "box")]
    pub box_count: Option<i64>,
    #[serde(rename = "boxMedium")]
    pub box_medium: Option<i64>,
    #[serde(rename = "boxSmall")]
    pub box_small: Option<i64>,
    #[serde(rename = "tOxalic")]
    pub t_oxalic: Option<i64>,
    #[serde(rename = "tAmitraz")]
    pub t_amitraz: Option<i64>,
    #[serde(rename = "tFlumetrine")]
    pub t_flumetrine: Option<i64>,
    #[serde(rename = "tFence")]
    pub t_fence: Option<i64>,
    #[serde(rename = "tComment")]
    pub t_comment: Option<String>,
    pub transhumance: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Partial update request for an apiary
///
/// `None` means "leave unchanged"; only provided fields are applied and
/// only applied fields can show up in the change ledger.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApiary {
    pub name: Option<String>,
    pub hives: Option<i64>,
    pub status: Option<String>,
    pub image: Option<String>,
    pub honey: Option<f64>,
    pub levudex: Option<f64>,
    pub sugar: Option<f64>,
    #[serde(rename = "box")]
    pub box_count: Option<i64>,
    #[serde(rename = "boxMedium")]
    pub box_medium: Option<i64>,
    #[serde(rename = "boxSmall")]
    pub box_small: Option<i64>,
    #[serde(rename = "tOxalic")]
    pub t_oxalic: Option<i64>,
    #[serde(rename = "tAmitraz")]
    pub t_amitraz: Option<i64>,
    #[serde(rename = "tFlumetrine")]
    pub t_flumetrine: Option<i64>,
    #[serde(rename = "tFence")]
    pub t_fence: Option<i64>,
    #[serde(rename = "tComment")]
    pub t_comment: Option<String>,
    pub transhumance: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

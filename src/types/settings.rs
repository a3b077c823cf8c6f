//! Per-apiary settings
//!
//! One row per apiary. The booleans control which fields the client shows;
//! `harvesting` marks an apiary as being in harvest mode. Settings are
//! created together with their apiary and removed when it is deleted.
//! They are not tracked by the change ledger.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Settings row for one apiary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub id: u64,
    #[serde(rename = "apiaryId")]
    pub apiary_id: u64,
    #[serde(rename = "apiaryUserId")]
    pub apiary_user_id: u64,
    #[serde(default = "default_true")]
    pub honey: bool,
    #[serde(default = "default_true")]
    pub levudex: bool,
    #[serde(default = "default_true")]
    pub sugar: bool,
    #[serde(rename = "box", default = "default_true")]
    pub box_count: bool,
    #[serde(rename = "boxMedium", default = "default_true")]
    pub box_medium: bool,
    #[serde(rename = "boxSmall", default = "default_true")]
    pub box_small: bool,
    #[serde(rename = "tOxalic", default = "default_true")]
    pub t_oxalic: bool,
    #[serde(rename = "tAmitraz", default = "default_true")]
    pub t_amitraz: bool,
    #[serde(rename = "tFlumetrine", default = "default_true")]
    pub t_flumetrine: bool,
    #[serde(rename = "tFence", default = "default_true")]
    pub t_fence: bool,
    #[serde(rename = "tComment", default = "default_true")]
    pub t_comment: bool,
    #[serde(default = "default_true")]
    pub transhumance: bool,
    #[serde(default)]
    pub harvesting: bool,
}

impl Settings {
    /// Default settings for a freshly created apiary
    pub fn new(id: u64, apiary_id: u64, apiary_user_id: u64) -> Self {
        Self {
            id,
            apiary_id,
            apiary_user_id,
            honey: true,
            levudex: true,
            sugar: true,
            box_count: true,
            box_medium: true,
            box_small: true,
            t_oxalic: true,
            t_amitraz: true,
            t_flumetrine: true,
            t_fence: true,
            t_comment: true,
            transhumance: true,
            harvesting: false,
        }
    }
}

/// Partial update request for settings; `None` leaves a flag unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSettings {
    pub honey: Option<bool>,
    pub levudex: Option<bool>,
    pub sugar: Option<bool>,
    #[serde(rename = "box")]
    pub box_count: Option<bool>,
    #[serde(rename = "boxMedium")]
    pub box_medium: Option<bool>,
    #[serde(rename = "boxSmall")]
    pub box_small: Option<bool>,
    #[serde(rename = "tOxalic")]
    pub t_oxalic: Option<bool>,
    #[serde(rename = "tAmitraz")]
    pub t_amitraz: Option<bool>,
    #[serde(rename = "tFlumetrine")]
    pub t_flumetrine: Option<bool>,
    #[serde(rename = "tFence")]
    pub t_fence: Option<bool>,
    #[serde(rename = "tComment")]
    pub t_comment: Option<bool>,
    pub transhumance: Option<bool>,
    pub harvesting: Option<bool>,
}

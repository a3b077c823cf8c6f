//! Honey drum types

use serde::{Deserialize, Serialize};

/// A honey drum (container) owned by a user
///
/// `tare` is the empty weight, `weight` the gross weight; both in kilograms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drum {
    pub id: u64,
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub code: String,
    pub tare: f64,
    pub weight: f64,
    #[serde(default)]
    pub sold: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: i64,
}

impl Drum {
    /// Net honey weight (gross minus tare), floored at zero
    pub fn net_weight(&self) -> f64 {
        (self.weight - self.tare).max(0.0)
    }
}

/// Request body for registering a drum
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDrum {
    pub code: String,
    pub tare: f64,
    pub weight: f64,
}

/// Partial update request for a drum
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDrum {
    pub code: Option<String>,
    pub tare: Option<f64>,
    pub weight: Option<f64>,
    pub sold: Option<bool>,
}

/// Per-user drum summary
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrumSummary {
    #[serde(rename = "drumCount")]
    pub drum_count: usize,
    #[serde(rename = "unsoldCount")]
    pub unsold_count: usize,
    #[serde(rename = "netWeight")]
    pub net_weight: f64,
}

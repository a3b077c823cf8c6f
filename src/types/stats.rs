//! Aggregate result types
//!
//! Ephemeral, computed per request, never persisted.

use serde::Serialize;

/// Totals for the three harvested box sizes plus their sum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoxStats {
    #[serde(rename = "box")]
    pub box_count: i64,
    #[serde(rename = "boxMedium")]
    pub box_medium: i64,
    #[serde(rename = "boxSmall")]
    pub box_small: i64,
    pub total: i64,
}

impl BoxStats {
    pub fn new(box_count: i64, box_medium: i64, box_small: i64) -> Self {
        Self {
            box_count,
            box_medium,
            box_small,
            total: box_count + box_medium + box_small,
        }
    }
}

/// Apiary count paired with the hive total over those apiaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApiaryCounts {
    #[serde(rename = "apiaryCount")]
    pub apiary_count: usize,
    #[serde(rename = "hiveCount")]
    pub hive_count: i64,
}

//! Field-level diff engine for apiary records
//!
//! The tracked-field set is declared once as data ([`TrackedField::ALL`]);
//! diffing compares the rendered value of each tracked field between two
//! snapshots taken before and after a mutation. Attributes outside the set
//! (ownership, coordinates, timestamps) never produce a descriptor.

use crate::types::Apiary;

/// A field of the apiary record that participates in change history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedField {
    Name,
    Hives,
    Status,
    Image,
    Honey,
    Levudex,
    Sugar,
    Box,
    BoxMedium,
    BoxSmall,
    TOxalic,
    TAmitraz,
    TFlumetrine,
    TFence,
    TComment,
    Transhumance,
}

impl TrackedField {
    /// All tracked fields, in declared order. Diff output follows this order.
    pub const ALL: [TrackedField; 16] = [
        TrackedField::Name,
        TrackedField::Hives,
        TrackedField::Status,
        TrackedField::Image,
        TrackedField::Honey,
        TrackedField::Levudex,
        TrackedField::Sugar,
        TrackedField::Box,
        TrackedField::BoxMedium,
        TrackedField::BoxSmall,
        TrackedField::TOxalic,
        TrackedField::TAmitraz,
        TrackedField::TFlumetrine,
        TrackedField::TFence,
        TrackedField::TComment,
        TrackedField::Transhumance,
    ];

    /// The three harvested-box counters the "today" queries aggregate over
    pub const HARVEST: [TrackedField; 3] = [
        TrackedField::Box,
        TrackedField::BoxMedium,
        TrackedField::BoxSmall,
    ];

    /// The treatment-day counters decremented by the daily job
    pub const TREATMENTS: [TrackedField; 4] = [
        TrackedField::TOxalic,
        TrackedField::TAmitraz,
        TrackedField::TFlumetrine,
        TrackedField::TFence,
    ];

    /// Ledger field name (matches the wire name of the apiary attribute)
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackedField::Name => "name",
            TrackedField::Hives => "hives",
            TrackedField::Status => "status",
            TrackedField::Image => "image",
            TrackedField::Honey => "honey",
            TrackedField::Levudex => "levudex",
            TrackedField::Sugar => "sugar",
            TrackedField::Box => "box",
            TrackedField::BoxMedium => "boxMedium",
            TrackedField::BoxSmall => "boxSmall",
            TrackedField::TOxalic => "tOxalic",
            TrackedField::TAmitraz => "tAmitraz",
            TrackedField::TFlumetrine => "tFlumetrine",
            TrackedField::TFence => "tFence",
            TrackedField::TComment => "tComment",
            TrackedField::Transhumance => "transhumance",
        }
    }
}

impl std::fmt::Display for TrackedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable value snapshot of an apiary's tracked fields
///
/// Captured with [`ApiarySnapshot::of`] before a mutation and passed by
/// value to [`diff`]. A `None` entry means the field is null.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiarySnapshot {
    pub name: Option<String>,
    pub hives: Option<i64>,
    pub status: Option<String>,
    pub image: Option<String>,
    pub honey: Option<f64>,
    pub levudex: Option<f64>,
    pub sugar: Option<f64>,
    pub box_count: Option<i64>,
    pub box_medium: Option<i64>,
    pub box_small: Option<i64>,
    pub t_oxalic: Option<i64>,
    pub t_amitraz: Option<i64>,
    pub t_flumetrine: Option<i64>,
    pub t_fence: Option<i64>,
    pub t_comment: Option<String>,
    pub transhumance: Option<i64>,
}

impl ApiarySnapshot {
    /// Capture the tracked fields of an apiary
    pub fn of(apiary: &Apiary) -> Self {
        Self {
            name: Some(apiary.name.clone()),
            hives: apiary.hives,
            status: Some(apiary.status.clone()),
            image: Some(apiary.image.clone()),
            honey: apiary.honey,
            levudex: apiary.levudex,
            sugar: apiary.sugar,
            box_count: apiary.box_count,
            box_medium: apiary.box_medium,
            box_small: apiary.box_small,
            t_oxalic: apiary.t_oxalic,
            t_amitraz: apiary.t_amitraz,
            t_flumetrine: apiary.t_flumetrine,
            t_fence: apiary.t_fence,
            t_comment: apiary.t_comment.clone(),
            transhumance: apiary.transhumance,
        }
    }

    /// Render one field as its ledger string; `None` for null
    fn render(&self, field: TrackedField) -> Option<String> {
        match field {
            TrackedField::Name => self.name.clone(),
            TrackedField::Hives => self.hives.map(|v| v.to_string()),
            TrackedField::Status => self.status.clone(),
            TrackedField::Image => self.image.clone(),
            TrackedField::Honey => self.honey.map(|v| v.to_string()),
            TrackedField::Levudex => self.levudex.map(|v| v.to_string()),
            TrackedField::Sugar => self.sugar.map(|v| v.to_string()),
            TrackedField::Box => self.box_count.map(|v| v.to_string()),
            TrackedField::BoxMedium => self.box_medium.map(|v| v.to_string()),
            TrackedField::BoxSmall => self.box_small.map(|v| v.to_string()),
            TrackedField::TOxalic => self.t_oxalic.map(|v| v.to_string()),
            TrackedField::TAmitraz => self.t_amitraz.map(|v| v.to_string()),
            TrackedField::TFlumetrine => self.t_flumetrine.map(|v| v.to_string()),
            TrackedField::TFence => self.t_fence.map(|v| v.to_string()),
            TrackedField::TComment => self.t_comment.clone(),
            TrackedField::Transhumance => self.transhumance.map(|v| v.to_string()),
        }
    }
}

/// One field-level difference between two snapshots
///
/// Values are the ledger string renderings; the empty string encodes null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDescriptor {
    pub field: TrackedField,
    pub previous_value: String,
    pub new_value: String,
}

/// Compute the tracked-field differences between two snapshots
///
/// Pure function. Emits one descriptor per field whose value differs;
/// `None == None` is no change, `None` vs any concrete value is a change.
/// Output order follows [`TrackedField::ALL`].
pub fn diff(before: &ApiarySnapshot, after: &ApiarySnapshot) -> Vec<ChangeDescriptor> {
    TrackedField::ALL
        .iter()
        .filter_map(|&field| {
            let prev = before.render(field);
            let next = after.render(field);
            if prev == next {
                None
            } else {
                Some(ChangeDescriptor {
                    field,
                    previous_value: prev.unwrap_or_default(),
                    new_value: next.unwrap_or_default(),
                })
            }
        })
        .collect()
}

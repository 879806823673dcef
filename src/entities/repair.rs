//! Repair log entity type
//!
//! A repair log is an immutable record of one maintenance event on a mold.
//! It carries a snapshot of the mold's name at creation time; a later mold
//! rename does not rewrite history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::identity::EntityId;

/// One maintenance event on a mold. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairLog {
    /// Unique identifier
    pub id: EntityId,

    /// Owning mold
    pub mold_id: EntityId,

    /// Mold name as it read when the repair was logged
    pub mold_name: String,

    /// Calendar day the repair was logged
    pub date: NaiveDate,

    /// Technician who performed the work
    pub technician: String,

    /// Free-text description of the work
    pub description: String,

    /// Labels of parts replaced during the repair
    #[serde(default)]
    pub parts_replaced: Vec<String>,

    /// Time spent, in hours
    pub duration_hours: f64,

    /// Repair cost, if tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// Caller-supplied fields for logging a repair. The technician falls back
/// to the session user and then a generic label; parts come in as one
/// comma-separated string the way the intake form captures them.
#[derive(Debug, Clone, Default)]
pub struct RepairDraft {
    pub description: String,
    pub technician: Option<String>,
    pub parts: String,
    pub duration_hours: Option<f64>,
    pub cost: Option<f64>,
}

/// Split a comma-separated parts string into labels: trim each segment,
/// drop empty ones, keep the order of the survivors.
pub fn split_parts_replaced(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

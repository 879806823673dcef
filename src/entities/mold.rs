//! Injection mold entity type

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::identity::{EntityId, EntityPrefix};
use crate::entities::repair::RepairLog;

/// Operational status of a mold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ToolStatus {
    #[default]
    Active,
    InRepair,
    Retired,
}

impl ToolStatus {
    /// Product-locale label shown to operators
    pub fn label(&self) -> &'static str {
        match self {
            ToolStatus::Active => "Активна",
            ToolStatus::InRepair => "В Ремонт",
            ToolStatus::Retired => "Бракувана",
        }
    }
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolStatus::Active => write!(f, "active"),
            ToolStatus::InRepair => write!(f, "in-repair"),
            ToolStatus::Retired => write!(f, "retired"),
        }
    }
}

impl std::str::FromStr for ToolStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ToolStatus::Active),
            "in-repair" | "in_repair" => Ok(ToolStatus::InRepair),
            "retired" => Ok(ToolStatus::Retired),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// An injection mold tracked by the system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mold {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Serial number. Freeform; used as a secondary search key, uniqueness
    /// is by convention only.
    pub serial_number: String,

    /// Manufacturer name
    pub manufacturer: String,

    /// Cumulative shot count (approximates tool wear)
    pub total_shots: u64,

    /// Number of cavities
    pub cavities: u32,

    /// Current operational status
    #[serde(default)]
    pub status: ToolStatus,

    /// Repair log entries, newest first
    #[serde(default)]
    pub repair_history: Vec<RepairLog>,

    /// Optional image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Mold {
    /// Rough wear indicator from the shot count
    pub fn shots_per_cavity(&self) -> u64 {
        if self.cavities == 0 {
            return self.total_shots;
        }
        self.total_shots / u64::from(self.cavities)
    }

    /// Case-insensitive substring match against name and serial number
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.serial_number.to_lowercase().contains(&query)
    }
}

/// Caller-supplied fields for a new mold; anything blank or omitted gets
/// the documented default at creation time.
#[derive(Debug, Clone, Default)]
pub struct MoldDraft {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub total_shots: Option<u64>,
    pub cavities: Option<u32>,
    pub image: Option<String>,
}

impl MoldDraft {
    /// Materialize the draft into a mold with a fresh identity.
    /// New molds always start Active with an empty repair history.
    pub fn build(self) -> Mold {
        let serial_number = match self.serial_number.filter(|s| !s.trim().is_empty()) {
            Some(sn) => sn,
            None => format!("SN-{}", chrono::Utc::now().timestamp_millis()),
        };

        Mold {
            id: EntityId::new(EntityPrefix::Mold),
            name: self
                .name
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Нова Матрица".to_string()),
            serial_number,
            manufacturer: self
                .manufacturer
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Gotmar Internal".to_string()),
            total_shots: self.total_shots.unwrap_or(0),
            cavities: self.cavities.unwrap_or(4),
            status: ToolStatus::Active,
            repair_history: Vec::new(),
            image: self.image.filter(|s| !s.trim().is_empty()),
        }
    }
}

//! Spare part entity type

use serde::{Deserialize, Serialize};

use crate::core::identity::{EntityId, EntityPrefix};

/// Fixed restock increment applied by an "order" operation
pub const RESTOCK_QUANTITY: u32 = 10;

/// A stocked consumable or replacement component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparePart {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Stock-keeping unit. Freeform; uniqueness by convention only.
    pub sku: String,

    /// Quantity on hand
    pub quantity: u32,

    /// Reorder threshold
    pub min_quantity: u32,

    /// Storage location label
    pub location: String,
}

impl SparePart {
    /// A part is low on stock once quantity falls to its reorder threshold
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

/// Caller-supplied fields for a new spare part
#[derive(Debug, Clone, Default)]
pub struct PartDraft {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<u32>,
    pub min_quantity: Option<u32>,
    pub location: Option<String>,
}

impl PartDraft {
    /// Materialize the draft into a part with a fresh identity
    pub fn build(self) -> SparePart {
        let sku = match self.sku.filter(|s| !s.trim().is_empty()) {
            Some(sku) => sku,
            None => format!("SKU-{}", chrono::Utc::now().timestamp_millis()),
        };

        SparePart {
            id: EntityId::new(EntityPrefix::Part),
            name: self
                .name
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Нова част".to_string()),
            sku,
            quantity: self.quantity.unwrap_or(0),
            min_quantity: self.min_quantity.unwrap_or(0),
            location: self
                .location
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Склад".to_string()),
        }
    }
}

//! Persistence collaborator: three named JSON slots
//!
//! Storage is a serialization mirror of the in-memory store, never a
//! second owner. `load` cannot fail: any slot that is absent or unreadable
//! yields the fixed seed data instead. Saves are per-slot with no
//! cross-slot transaction; a crash between two saves can leave slots
//! inconsistent on reload, which is an accepted risk for a single-tenant
//! workspace.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::seed;
use crate::core::workspace::Workspace;
use crate::entities::{AuthorizedUser, Mold, SparePart};

/// The three fixed collection names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Molds,
    Parts,
    Users,
}

impl Slot {
    pub fn file_name(&self) -> &'static str {
        match self {
            Slot::Molds => "molds.json",
            Slot::Parts => "parts.json",
            Slot::Users => "users.json",
        }
    }
}

/// All three collections as loaded from storage (or seeded)
#[derive(Debug)]
pub struct Snapshot {
    pub molds: Vec<Mold>,
    pub parts: Vec<SparePart>,
    pub users: Vec<AuthorizedUser>,
}

/// Errors surfaced by save operations. Loads never fail.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to serialize {slot}: {source}")]
    Serialize {
        slot: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The persistence seam consumed by the CLI
pub trait Storage {
    /// Load all three collections, substituting seed data for any slot
    /// that is missing or unreadable.
    fn load(&self) -> Snapshot;

    fn save_molds(&self, molds: &[Mold]) -> Result<(), StorageError>;
    fn save_parts(&self, parts: &[SparePart]) -> Result<(), StorageError>;
    fn save_users(&self, users: &[AuthorizedUser]) -> Result<(), StorageError>;
}

/// File-backed storage: one pretty-printed JSON file per slot inside the
/// workspace state dir.
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    pub fn new(workspace: &Workspace) -> Self {
        Self {
            dir: workspace.state_dir(),
        }
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(slot.file_name())
    }

    fn load_slot<T: serde::de::DeserializeOwned>(&self, slot: Slot) -> Option<Vec<T>> {
        let contents = std::fs::read_to_string(self.slot_path(slot)).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Load a slot, seeding it when empty. Seeding an absent slot writes
    /// the seed back immediately so its identities are assigned exactly
    /// once; later loads read the same ids. An unreadable (corrupt) slot
    /// also yields seed data but is not overwritten here.
    fn load_or_seed<T>(&self, slot: Slot, seed: fn() -> Vec<T>) -> Vec<T>
    where
        T: serde::Serialize + serde::de::DeserializeOwned,
    {
        if let Some(items) = self.load_slot(slot) {
            return items;
        }
        let items = seed();
        if !self.slot_path(slot).exists() {
            // Load never fails; a failed first write just means the next
            // load seeds again.
            let _ = self.save_slot(slot, &items);
        }
        items
    }

    fn save_slot<T: serde::Serialize>(
        &self,
        slot: Slot,
        value: &[T],
    ) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(value).map_err(|e| {
            StorageError::Serialize {
                slot: slot.file_name(),
                source: e,
            }
        })?;
        let path = self.slot_path(slot);
        std::fs::write(&path, contents)
            .map_err(|source| StorageError::Write { path, source })
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> Snapshot {
        Snapshot {
            molds: self.load_or_seed(Slot::Molds, seed::seed_molds),
            parts: self.load_or_seed(Slot::Parts, seed::seed_parts),
            users: self.load_or_seed(Slot::Users, seed::seed_users),
        }
    }

    fn save_molds(&self, molds: &[Mold]) -> Result<(), StorageError> {
        self.save_slot(Slot::Molds, molds)
    }

    fn save_parts(&self, parts: &[SparePart]) -> Result<(), StorageError> {
        self.save_slot(Slot::Parts, parts)
    }

    fn save_users(&self, users: &[AuthorizedUser]) -> Result<(), StorageError> {
        self.save_slot(Slot::Users, users)
    }
}

//! In-memory state container and mutation operations
//!
//! The [`Store`] exclusively owns the three collections (molds, parts,
//! users) plus the transient view state (selected mold, search text) and
//! the session identity for one running invocation. Persistence is a
//! serialization mirror; whatever the store holds is authoritative.
//!
//! Mutations run one at a time and the last write wins. Mutating by an id
//! that does not exist is an explicit error here rather than the source's
//! silent no-op, so callers can tell the operator what happened.

use chrono::Utc;
use thiserror::Error;

use crate::core::auth::{AuthError, Authenticator, SharedSecret};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::entities::repair::split_parts_replaced;
use crate::entities::{
    AuthorizedUser, Mold, MoldDraft, PartDraft, RepairDraft, RepairLog, Role, SparePart,
    ToolStatus, RESTOCK_QUANTITY,
};

/// Failures of store mutations. Validation failures abort with no partial
/// effect; NotFound variants replace the source's silent no-ops.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Моля въведете валиден имейл адрес.")]
    InvalidEmail,

    #[error("no mold with id {0}")]
    MoldNotFound(EntityId),

    #[error("no spare part with id {0}")]
    PartNotFound(EntityId),

    #[error("no user with id {0}")]
    UserNotFound(EntityId),

    #[error("no mold selected")]
    NoMoldSelected,
}

/// Mold counts by status for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_molds: usize,
    pub active_molds: usize,
    pub in_repair_molds: usize,
}

/// The state & mutation core
#[derive(Debug, Default)]
pub struct Store {
    molds: Vec<Mold>,
    parts: Vec<SparePart>,
    users: Vec<AuthorizedUser>,

    current_user: Option<AuthorizedUser>,
    selected_mold: Option<EntityId>,
    search: String,
}

impl Store {
    /// Build a store over loaded (or seeded) collections
    pub fn new(
        molds: Vec<Mold>,
        parts: Vec<SparePart>,
        users: Vec<AuthorizedUser>,
    ) -> Self {
        Self {
            molds,
            parts,
            users,
            current_user: None,
            selected_mold: None,
            search: String::new(),
        }
    }

    // ===== Session =====

    /// Authenticate against the roster with the shared passphrase and, on
    /// success, establish the session identity. Failure leaves the session
    /// untouched.
    pub fn authenticate(
        &mut self,
        email: &str,
        passphrase: &str,
        shared_secret: &str,
    ) -> Result<AuthorizedUser, AuthError> {
        let user = SharedSecret::new(&self.users, shared_secret)
            .authenticate(email, passphrase)?;
        self.current_user = Some(user.clone());
        Ok(user)
    }

    /// Adopt a previously authenticated identity (restored session)
    pub fn resume_session(&mut self, user: AuthorizedUser) {
        self.current_user = Some(user);
    }

    /// End the session: clears the identity and all transient selection
    /// state (selected mold, search text).
    pub fn end_session(&mut self) {
        self.current_user = None;
        self.selected_mold = None;
        self.search.clear();
    }

    pub fn current_user(&self) -> Option<&AuthorizedUser> {
        self.current_user.as_ref()
    }

    // ===== Molds =====

    pub fn molds(&self) -> &[Mold] {
        &self.molds
    }

    /// Create a mold from a draft and append it to the inventory. Total:
    /// blank fields are defaulted, never rejected.
    pub fn add_mold(&mut self, draft: MoldDraft) -> &Mold {
        self.molds.push(draft.build());
        &self.molds[self.molds.len() - 1]
    }

    pub fn find_mold(&self, id: &EntityId) -> Option<&Mold> {
        self.molds.iter().find(|m| &m.id == id)
    }

    /// Replace the status of exactly the matching mold. Idempotent; any
    /// status may transition to any other, Retired included.
    pub fn set_mold_status(
        &mut self,
        id: &EntityId,
        status: ToolStatus,
    ) -> Result<(), StoreError> {
        let mold = self
            .molds
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| StoreError::MoldNotFound(id.clone()))?;
        mold.status = status;
        Ok(())
    }

    /// Target a mold for repair logging and the detail views
    pub fn select_mold(&mut self, id: &EntityId) -> Result<(), StoreError> {
        if self.find_mold(id).is_none() {
            return Err(StoreError::MoldNotFound(id.clone()));
        }
        self.selected_mold = Some(id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_mold = None;
    }

    /// The currently selected mold, if the selection still resolves
    pub fn selected_mold(&self) -> Option<&Mold> {
        self.selected_mold.as_ref().and_then(|id| self.find_mold(id))
    }

    /// Log a repair against the selected mold. The entry snapshots the
    /// mold's current name, is prepended to its history, and the mold is
    /// forced back to Active: a logged repair means the tool returned to
    /// service, overriding any status set moments earlier.
    pub fn log_repair(&mut self, draft: RepairDraft) -> Result<&RepairLog, StoreError> {
        let mold_id = self
            .selected_mold
            .clone()
            .ok_or(StoreError::NoMoldSelected)?;

        let technician = draft
            .technician
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.current_user.as_ref().map(|u| u.email.clone()))
            .unwrap_or_else(|| "Служител".to_string());

        let mold = self
            .molds
            .iter_mut()
            .find(|m| m.id == mold_id)
            .ok_or_else(|| StoreError::MoldNotFound(mold_id.clone()))?;

        let repair = RepairLog {
            id: EntityId::new(EntityPrefix::Rep),
            mold_id: mold.id.clone(),
            mold_name: mold.name.clone(),
            date: Utc::now().date_naive(),
            technician,
            description: draft.description,
            parts_replaced: split_parts_replaced(&draft.parts),
            duration_hours: draft.duration_hours.unwrap_or(1.0),
            cost: draft.cost,
        };

        mold.repair_history.insert(0, repair);
        mold.status = ToolStatus::Active;
        Ok(&mold.repair_history[0])
    }

    // ===== Spare parts =====

    pub fn parts(&self) -> &[SparePart] {
        &self.parts
    }

    /// Create a spare part from a draft and append it to stock
    pub fn add_part(&mut self, draft: PartDraft) -> &SparePart {
        self.parts.push(draft.build());
        &self.parts[self.parts.len() - 1]
    }

    pub fn find_part(&self, id: &EntityId) -> Option<&SparePart> {
        self.parts.iter().find(|p| &p.id == id)
    }

    /// Simulated restock: add a fixed 10 units to the part's quantity.
    /// Returns the new quantity; min_quantity is untouched.
    pub fn order_part(&mut self, id: &EntityId) -> Result<u32, StoreError> {
        let part = self
            .parts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::PartNotFound(id.clone()))?;
        part.quantity += RESTOCK_QUANTITY;
        Ok(part.quantity)
    }

    // ===== Roster =====

    pub fn users(&self) -> &[AuthorizedUser] {
        &self.users
    }

    /// Append a roster entry. The only validation is syntactic: the email
    /// must be non-empty and contain an '@'.
    pub fn add_user(&mut self, email: &str, role: Role) -> Result<&AuthorizedUser, StoreError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(StoreError::InvalidEmail);
        }

        self.users.push(AuthorizedUser {
            id: EntityId::new(EntityPrefix::User),
            email: email.to_string(),
            role,
            added_at: Utc::now().date_naive(),
        });
        Ok(&self.users[self.users.len() - 1])
    }

    /// Remove a roster entry by identity. Interactive confirmation is the
    /// caller's responsibility.
    pub fn remove_user(&mut self, id: &EntityId) -> Result<AuthorizedUser, StoreError> {
        let index = self
            .users
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| StoreError::UserNotFound(id.clone()))?;
        Ok(self.users.remove(index))
    }

    // ===== Derived views (recomputed per read, never cached) =====

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Molds whose name or serial number contains the current search text
    /// as a case-insensitive substring. Empty search returns everything.
    pub fn filtered_molds(&self) -> Vec<&Mold> {
        self.molds
            .iter()
            .filter(|m| m.matches_search(&self.search))
            .collect()
    }

    /// Every mold's repair history flattened, newest date first. The sort
    /// is stable, so same-day entries keep inventory order.
    pub fn all_repairs(&self) -> Vec<&RepairLog> {
        let mut repairs: Vec<&RepairLog> = self
            .molds
            .iter()
            .flat_map(|m| m.repair_history.iter())
            .collect();
        repairs.sort_by(|a, b| b.date.cmp(&a.date));
        repairs
    }

    /// Mold counts for the dashboard
    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_molds: self.molds.len(),
            active_molds: self
                .molds
                .iter()
                .filter(|m| m.status == ToolStatus::Active)
                .count(),
            in_repair_molds: self
                .molds
                .iter()
                .filter(|m| m.status == ToolStatus::InRepair)
                .count(),
        }
    }

    /// Parts at or below their reorder threshold, in stock order
    pub fn low_stock_parts(&self) -> Vec<&SparePart> {
        self.parts.iter().filter(|p| p.is_low_stock()).collect()
    }
}

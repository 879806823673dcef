//! Domain entities: molds, repair logs, spare parts, authorized users

pub mod mold;
pub mod part;
pub mod repair;
pub mod user;

pub use mold::{Mold, MoldDraft, ToolStatus};
pub use part::{PartDraft, SparePart, RESTOCK_QUANTITY};
pub use repair::{split_parts_replaced, RepairDraft, RepairLog};
pub use user::{AuthorizedUser, Role};

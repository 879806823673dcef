//! Core module - identity, state container, auth, config and workspace

pub mod auth;
pub mod config;
pub mod identity;
pub mod seed;
pub mod session;
pub mod store;
pub mod workspace;

pub use auth::{AuthError, Authenticator, SharedSecret, DEFAULT_PASSPHRASE};
pub use config::Config;
pub use identity::{EntityId, EntityPrefix, IdParseError};
pub use session::Session;
pub use store::{DashboardStats, Store, StoreError};
pub use workspace::{Workspace, WorkspaceError};

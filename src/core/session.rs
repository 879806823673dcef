//! Login session persisted between CLI invocations
//!
//! The dashboard kept the logged-in user in component state; a CLI gets a
//! fresh process per command, so the established identity lives in a small
//! session file inside the workspace state dir instead. This is view
//! state, not one of the three persistence slots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::workspace::Workspace;

/// The established session identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Email of the authenticated roster entry
    pub email: String,

    /// Calendar day the session was established
    pub logged_in_at: NaiveDate,
}

impl Session {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            logged_in_at: chrono::Utc::now().date_naive(),
        }
    }

    fn path(workspace: &Workspace) -> PathBuf {
        workspace.state_dir().join("session.yaml")
    }

    /// Load the current session, if one exists
    pub fn load(workspace: &Workspace) -> Option<Self> {
        Self::load_from_path(&Self::path(workspace))
    }

    fn load_from_path(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        serde_yml::from_str(&contents).ok()
    }

    /// Save the session to the workspace state dir
    pub fn save(&self, workspace: &Workspace) -> std::io::Result<()> {
        let contents = serde_yml::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(Self::path(workspace), contents)
    }

    /// End the session by removing the session file. Missing file is fine:
    /// logging out twice is not an error.
    pub fn clear(workspace: &Workspace) -> std::io::Result<()> {
        let path = Self::path(workspace);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_session_roundtrip() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();

        assert!(Session::load(&ws).is_none());

        let session = Session::new("admin@moldmaster.pro");
        session.save(&ws).unwrap();

        let loaded = Session::load(&ws).unwrap();
        assert_eq!(loaded.email, "admin@moldmaster.pro");
        assert_eq!(loaded.logged_in_at, session.logged_in_at);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();

        Session::new("a@b.com").save(&ws).unwrap();
        Session::clear(&ws).unwrap();
        assert!(Session::load(&ws).is_none());
        Session::clear(&ws).unwrap();
    }
}

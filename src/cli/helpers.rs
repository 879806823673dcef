//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::identity::EntityId;
use crate::core::{Session, Store, Workspace};
use crate::storage::{JsonStorage, Storage};

/// Resolve the workspace from --workspace or by directory discovery
pub fn open_workspace(global: &GlobalOpts) -> Result<Workspace> {
    match &global.workspace {
        Some(path) => Workspace::discover_from(path).into_diagnostic(),
        None => Workspace::discover().into_diagnostic(),
    }
}

/// Load the three collections into a store and resume the saved session,
/// if its email still resolves against the roster.
pub fn load_store(workspace: &Workspace) -> Store {
    let snapshot = JsonStorage::new(workspace).load();
    let mut store = Store::new(snapshot.molds, snapshot.parts, snapshot.users);

    if let Some(session) = Session::load(workspace) {
        let user = store
            .users()
            .iter()
            .find(|u| u.matches_email(&session.email))
            .cloned();
        if let Some(user) = user {
            store.resume_session(user);
        }
    }

    store
}

/// Format an EntityId for display, truncating if too long
pub fn format_short_id(id: &EntityId) -> String {
    let s = id.to_string();
    if s.len() > 16 {
        format!("{}...", &s[..13])
    } else {
        s
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;

    #[test]
    fn test_format_short_id() {
        let id = EntityId::new(EntityPrefix::Mold);
        let formatted = format_short_id(&id);
        // prefixed ULIDs are 30+ chars, so they truncate
        assert!(formatted.len() <= 16);
        assert!(formatted.ends_with("..."));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        // char-based, so multibyte labels do not split mid-character
        assert_eq!(truncate_str("Изхвъргач 12мм", 8), "Изхвъ...");
    }

    #[test]
    fn test_load_store_seeds_fresh_workspace() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let store = load_store(&ws);
        assert_eq!(store.molds().len(), 3);
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_load_store_resumes_session() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        Session::new("admin@moldmaster.pro").save(&ws).unwrap();

        let store = load_store(&ws);
        assert_eq!(
            store.current_user().map(|u| u.email.as_str()),
            Some("admin@moldmaster.pro")
        );
    }

    #[test]
    fn test_load_store_drops_stale_session() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        Session::new("gone@gotmar.com").save(&ws).unwrap();

        let store = load_store(&ws);
        assert!(store.current_user().is_none());
    }
}

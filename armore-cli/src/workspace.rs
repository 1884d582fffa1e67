//! Session persisted between invocations
//!
//! Snippets and the open session share one data directory. An unreadable or
//! corrupt session file starts a fresh session instead of failing.

use std::path::Path;

use anyhow::Result;
use armore_files::{FileSession, FileStorage, SnippetStore, Storage};
use armore_spec::{SessionState, SESSION_KEY};
use tracing::warn;

pub struct Workspace {
    session_storage: FileStorage,
    pub session: FileSession<FileStorage>,
}

impl Workspace {
    pub fn open(dir: &Path) -> Self {
        let session_storage = FileStorage::new(dir);
        let state = load_state(&session_storage);
        let store = SnippetStore::new(FileStorage::new(dir));

        Workspace {
            session_storage,
            session: FileSession::with_state(store, state),
        }
    }

    /// Write the session back to disk
    pub fn persist(&mut self) -> Result<()> {
        let text = serde_json::to_string(self.session.state())?;
        self.session_storage.set(SESSION_KEY, &text)?;
        Ok(())
    }

    /// Replace the session with a fresh one, keeping the store
    pub fn reset(&mut self, state: SessionState) {
        let store = SnippetStore::new(FileStorage::new(self.session_storage.dir()));
        self.session = FileSession::with_state(store, state);
    }
}

fn load_state(storage: &FileStorage) -> SessionState {
    let text = match storage.get(SESSION_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return SessionState::new(),
        Err(e) => {
            warn!(error = %e, "session unreadable, starting fresh");
            return SessionState::new();
        }
    };

    serde_json::from_str(&text).unwrap_or_else(|e| {
        warn!(error = %e, "session corrupt, starting fresh");
        SessionState::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_fresh_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::open(dir.path());
        assert_eq!(workspace.session.state(), &SessionState::new());
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let mut workspace = Workspace::open(dir.path());
        workspace.session.rename("main.asm");
        workspace.session.save_current().unwrap();
        workspace.persist().unwrap();

        let reopened = Workspace::open(dir.path());
        assert_eq!(reopened.session.state().name, "main.asm");
        assert!(reopened.session.state().is_opened_as("main.asm"));
        assert!(reopened.session.store().contains("main.asm"));
    }

    #[test]
    fn test_corrupt_session_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("session.json"), "{oops").unwrap();

        let workspace = Workspace::open(dir.path());
        assert_eq!(workspace.session.state(), &SessionState::new());
    }

    #[test]
    fn test_reset_keeps_snippets() {
        let dir = tempfile::tempdir().unwrap();
        let mut workspace = Workspace::open(dir.path());
        workspace.session.rename("keep.asm");
        workspace.session.save_current().unwrap();

        workspace.reset(SessionState::new());
        assert_eq!(workspace.session.state().opened_name, None);
        assert!(workspace.session.store().contains("keep.asm"));
    }
}

//! File session controller
//!
//! Owns the editor's `SessionState` and is the only writer of it. Saving
//! follows one rule: the file the session was opened (or last saved) as may
//! always be overwritten; any other existing name is refused, so retyping the
//! name field never clobbers an unrelated file.

use std::fs;
use std::path::Path;

use armore_spec::SessionState;
use tracing::{debug, info};

use crate::error::{Result, SessionError, StorageError};
use crate::fuzzy::FilePicker;
use crate::share::{self, ShareState};
use crate::storage::Storage;
use crate::store::SnippetStore;

/// A file dropped onto the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    pub name: String,
    pub contents: String,
}

impl DroppedFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        DroppedFile {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Read a file from disk; the name is its final path component
    pub fn read(path: &Path) -> std::result::Result<Self, StorageError> {
        let contents = fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(DroppedFile { name, contents })
    }
}

pub struct FileSession<S> {
    store: SnippetStore<S>,
    state: SessionState,
}

impl<S: Storage> FileSession<S> {
    /// Fresh session over `store`
    pub fn new(store: SnippetStore<S>) -> Self {
        Self::with_state(store, SessionState::new())
    }

    /// Resume a previously persisted session
    pub fn with_state(store: SnippetStore<S>, state: SessionState) -> Self {
        FileSession { store, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &SnippetStore<S> {
        &self.store
    }

    pub fn into_parts(self) -> (SnippetStore<S>, SessionState) {
        (self.store, self.state)
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.state.source = source.into();
    }

    /// Edit the file name field
    pub fn rename(&mut self, name: impl Into<String>) {
        self.state.name = name.into();
    }

    /// Whether `save_current` would write, and if not, why
    pub fn check_save(&self) -> Result<()> {
        let name = &self.state.name;
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if !self.state.is_opened_as(name) && self.store.contains(name) {
            return Err(SessionError::NameCollision { name: name.clone() });
        }
        Ok(())
    }

    /// Save the session under its current name
    pub fn save_current(&mut self) -> Result<()> {
        if let Err(e) = self.check_save() {
            debug!(name = %self.state.name, error = %e, "save refused");
            return Err(e);
        }

        self.store.save(&self.state.name, &self.state.source)?;
        self.state.opened_name = Some(self.state.name.clone());
        Ok(())
    }

    /// Load a stored snippet into the session
    pub fn open(&mut self, name: &str) -> Result<()> {
        let snippet = self.store.get(name).ok_or_else(|| SessionError::NotFound {
            name: name.to_string(),
        })?;

        self.state.source = snippet.source;
        self.state.name = snippet.name;
        self.state.opened_name = Some(name.to_string());
        info!(%name, "snippet opened");
        Ok(())
    }

    /// Delete a stored snippet.
    ///
    /// Deleting the open file leaves `opened_name` pointing at it, so the next
    /// save simply recreates it.
    pub fn delete_snippet(&mut self, name: &str) -> Result<()> {
        self.store.delete(name)?;
        Ok(())
    }

    /// Take over a dropped file. Anything but exactly one file is ignored.
    pub fn import_dropped(&mut self, mut files: Vec<DroppedFile>) -> bool {
        if files.len() != 1 {
            debug!(count = files.len(), "ignoring drop");
            return false;
        }

        if let Some(file) = files.pop() {
            info!(name = %file.name, "file imported");
            self.state.source = file.contents;
            self.state.name = file.name;
        }
        true
    }

    /// Pre-populate from a share link
    pub fn load_shared(&mut self, shared: ShareState) {
        self.state.source = shared.source;
        self.state.name = shared.name;
    }

    /// Share token for the current source and name
    pub fn share_token(&self) -> String {
        share::encode(&self.state.source, &self.state.name)
    }

    /// Picker over the stored names
    pub fn picker(&self) -> FilePicker {
        FilePicker::new(self.store.names())
    }
}

//! Snippets and the editing session

use serde::{Deserialize, Serialize};

/// A named, persisted source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub name: String,
    pub source: String,
}

impl Snippet {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Snippet {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// State of the editor session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Source text in the editor
    pub source: String,

    /// Contents of the file name field
    pub name: String,

    /// Name the session was last opened or saved under (`None` if never)
    pub opened_name: Option<String>,
}

impl SessionState {
    /// Fresh, never-saved session holding the demo program
    pub fn new() -> Self {
        SessionState {
            source: crate::DEFAULT_PROGRAM.to_string(),
            name: String::new(),
            opened_name: None,
        }
    }

    /// Session holding the given text, not yet saved anywhere
    pub fn with_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        SessionState {
            source: source.into(),
            name: name.into(),
            opened_name: None,
        }
    }

    /// True if the session was last opened or saved as `name`
    pub fn is_opened_as(&self, name: &str) -> bool {
        self.opened_name.as_deref() == Some(name)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

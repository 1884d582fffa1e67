//! Snippet store
//!
//! All snippets live under the single storage key `files` as one JSON object
//! mapping each name to `{ "code": <source> }`. `save` and `delete` are plain
//! primitives; overwrite protection belongs to the session.

use std::collections::BTreeMap;

use armore_spec::{Snippet, FILES_KEY};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::{DecodeError, StorageError};
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredSnippet {
    code: String,
}

type Payload = BTreeMap<String, StoredSnippet>;

/// Parse the stored payload, skipping entries without a string `code`
fn decode_payload(text: &str) -> Result<Payload, DecodeError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(entries) = value else {
        return Err(DecodeError::NotAnObject);
    };

    let mut payload = Payload::new();
    for (name, entry) in entries {
        match serde_json::from_value::<StoredSnippet>(entry) {
            Ok(snippet) => {
                payload.insert(name, snippet);
            }
            Err(e) => warn!(%name, error = %e, "skipping malformed stored snippet"),
        }
    }
    Ok(payload)
}

fn encode_payload(payload: &Payload) -> String {
    let entries: Map<String, Value> = payload
        .iter()
        .map(|(name, snippet)| {
            let mut entry = Map::new();
            entry.insert("code".to_string(), Value::String(snippet.code.clone()));
            (name.clone(), Value::Object(entry))
        })
        .collect();
    Value::Object(entries).to_string()
}

/// Named snippets persisted in a `Storage` backend
#[derive(Debug, Clone)]
pub struct SnippetStore<S> {
    backend: S,
}

impl<S: Storage> SnippetStore<S> {
    pub fn new(backend: S) -> Self {
        SnippetStore { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Stored payload; unreadable or corrupt storage reads as empty
    fn load(&self) -> Payload {
        let text = match self.backend.get(FILES_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return Payload::new(),
            Err(e) => {
                warn!(error = %e, "snippet storage unreadable, treating as empty");
                return Payload::new();
            }
        };

        decode_payload(&text).unwrap_or_else(|e| {
            warn!(error = %e, "snippet storage corrupt, treating as empty");
            Payload::new()
        })
    }

    fn persist(&mut self, payload: &Payload) -> Result<(), StorageError> {
        self.backend.set(FILES_KEY, &encode_payload(payload))
    }

    /// All snippets, keyed and ordered by name
    pub fn list(&self) -> BTreeMap<String, Snippet> {
        self.load()
            .into_iter()
            .map(|(name, stored)| {
                let snippet = Snippet::new(name.clone(), stored.code);
                (name, snippet)
            })
            .collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.load().into_keys().collect()
    }

    pub fn get(&self, name: &str) -> Option<Snippet> {
        self.load()
            .remove(name)
            .map(|stored| Snippet::new(name, stored.code))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.load().contains_key(name)
    }

    /// Insert or overwrite `name`
    pub fn save(&mut self, name: &str, source: &str) -> Result<(), StorageError> {
        let mut payload = self.load();
        payload.insert(
            name.to_string(),
            StoredSnippet {
                code: source.to_string(),
            },
        );
        self.persist(&payload)?;
        info!(%name, bytes = source.len(), "snippet saved");
        Ok(())
    }

    /// Remove `name`; absent names are ignored
    pub fn delete(&mut self, name: &str) -> Result<(), StorageError> {
        let mut payload = self.load();
        if payload.remove(name).is_none() {
            return Ok(());
        }
        self.persist(&payload)?;
        info!(%name, "snippet deleted");
        Ok(())
    }
}

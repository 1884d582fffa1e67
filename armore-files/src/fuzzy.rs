//! Open-file picker filtering
//!
//! Despite the name this is plain substring containment: a name matches when
//! it contains the query verbatim. No ranking, no edit distance.

use crate::error::Result;
use crate::session::FileSession;
use crate::storage::Storage;

/// Names containing `query`, in their original order.
///
/// An empty query keeps every name.
pub fn filter<T>(names: &[T], query: &str) -> Vec<T>
where
    T: AsRef<str> + Clone,
{
    names
        .iter()
        .filter(|name| matches(name.as_ref(), query))
        .cloned()
        .collect()
}

fn matches(name: &str, query: &str) -> bool {
    query.is_empty() || name.contains(query)
}

/// State of the open-file picker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePicker {
    names: Vec<String>,
    query: String,
}

impl FilePicker {
    pub fn new(names: Vec<String>) -> Self {
        FilePicker {
            names,
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Replace the listing, e.g. after a delete
    pub fn refresh(&mut self, names: Vec<String>) {
        self.names = names;
    }

    /// Delete `name` through `session` and reload the listing; the query stays
    pub fn delete<S: Storage>(&mut self, session: &mut FileSession<S>, name: &str) -> Result<()> {
        session.delete_snippet(name)?;
        self.refresh(session.store().names());
        Ok(())
    }

    /// Names shown for the current query
    pub fn visible(&self) -> Vec<String> {
        filter(&self.names, &self.query)
    }

    /// True when the picker shows "No items found."
    pub fn is_empty(&self) -> bool {
        !self.names.iter().any(|name| matches(name, &self.query))
    }
}

//! Request and response bodies of the remote endpoints
//!
//! Every request is `{ "data": <input> }`. Assemble and link answer
//! `{ "data": { "data": <artifact> } }`; execute answers with the output
//! lines in the same nesting, or one level flatter.

use armore_spec::Artifact;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of every stage request
#[derive(Debug, Serialize)]
pub struct StageRequest<'a, T: Serialize + ?Sized> {
    pub data: &'a T,
}

/// `{ "data": T }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Assemble and link response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArtifactResponse {
    pub data: Envelope<Artifact>,
}

impl ArtifactResponse {
    pub fn into_artifact(self) -> Artifact {
        self.data.data
    }
}

/// Execute response
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExecuteResponse {
    Nested { data: Envelope<Vec<String>> },
    Flat { data: Vec<String> },
}

impl ExecuteResponse {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            ExecuteResponse::Nested { data } => data.data,
            ExecuteResponse::Flat { data } => data,
        }
    }
}

/// Extract the server's message from an error body.
///
/// Looks at `message`, `error` and `data.message` in a JSON body, takes a
/// top-level JSON string, or takes a non-empty plain-text body as is. Blank
/// messages count as absent.
pub fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return Some(body.to_string()),
    };

    let candidates = [
        Some(&value),
        value.get("message"),
        value.get("error"),
        value.get("data").and_then(|d| d.get("message")),
        value.get("data"),
    ];

    let message = candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string);
    message
}

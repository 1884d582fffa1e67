//! Opaque stage artifacts

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output of one pipeline stage, consumed as input by the next.
///
/// The encoding is owned by the remote service; the client forwards the
/// value byte-for-byte and never looks inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artifact(Value);

impl Artifact {
    pub fn new(value: Value) -> Self {
        Artifact(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Artifact {
    fn from(value: Value) -> Self {
        Artifact(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transparent_serialization() {
        let artifact = Artifact::new(json!({"type": "Buffer", "data": [1, 2, 3]}));
        let text = serde_json::to_string(&artifact).unwrap();
        assert_eq!(text, r#"{"data":[1,2,3],"type":"Buffer"}"#);

        let back: Artifact = serde_json::from_str(&text).unwrap();
        assert_eq!(back, artifact);
    }

    #[test]
    fn test_string_artifact() {
        let artifact: Artifact = json!("ELF...").into();
        assert_eq!(artifact.as_value(), &json!("ELF..."));
        assert_eq!(artifact.into_value(), json!("ELF..."));
    }
}

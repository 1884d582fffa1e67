//! Remote build errors

use armore_spec::{ConfigError, Stage};
use thiserror::Error;

/// Failure of one remote stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Network failure or timeout; no usable response
    #[error("{stage} request failed: {message}")]
    Transport { stage: Stage, message: String },

    /// Service answered with a non-success status
    #[error("{stage} rejected with status {status}: {message}")]
    Remote {
        stage: Stage,
        status: u16,
        message: String,
    },

    /// Success status, but the body does not match the stage's schema
    #[error("{stage} returned an unexpected response: {message}")]
    Malformed { stage: Stage, message: String },
}

impl BuildError {
    pub fn transport(stage: Stage, message: impl Into<String>) -> Self {
        BuildError::Transport {
            stage,
            message: message.into(),
        }
    }

    pub fn remote(stage: Stage, status: u16, message: impl Into<String>) -> Self {
        BuildError::Remote {
            stage,
            status,
            message: message.into(),
        }
    }

    /// Stage the failure happened in
    pub fn stage(&self) -> Stage {
        match self {
            BuildError::Transport { stage, .. }
            | BuildError::Remote { stage, .. }
            | BuildError::Malformed { stage, .. } => *stage,
        }
    }

    /// Text shown to the user.
    ///
    /// For `Remote` this is the server's own message when it sent one.
    pub fn user_message(&self) -> &str {
        match self {
            BuildError::Transport { message, .. }
            | BuildError::Remote { message, .. }
            | BuildError::Malformed { message, .. } => message,
        }
    }
}

/// Errors constructing a client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = BuildError::remote(Stage::Link, 400, "bad opcode");
        assert_eq!(err.to_string(), "link rejected with status 400: bad opcode");

        let err = BuildError::transport(Stage::Assemble, "Network Error");
        assert_eq!(err.to_string(), "assemble request failed: Network Error");
    }

    #[test]
    fn test_user_message_is_verbatim() {
        let err = BuildError::remote(Stage::Link, 400, "bad opcode");
        assert_eq!(err.user_message(), "bad opcode");
        assert_eq!(err.stage(), Stage::Link);

        let err = BuildError::Malformed {
            stage: Stage::Execute,
            message: "missing field `data`".to_string(),
        };
        assert_eq!(err.user_message(), "missing field `data`");
        assert_eq!(err.stage(), Stage::Execute);
    }

    #[test]
    fn test_config_error_from() {
        let err: ClientError = ConfigError::ZeroTimeout.into();
        assert!(err.to_string().contains("greater than zero"));
    }
}

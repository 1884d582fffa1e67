//! Run errors

use armore_spec::{RunId, Stage, ERROR_BANNER};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("A pipeline run is already in progress ({active})")]
    Busy { active: RunId },

    #[error("{stage} failed: {message}")]
    Stage {
        run: RunId,
        stage: Stage,
        message: String,
    },
}

impl RunError {
    /// Text the terminal shows for this error
    pub fn report(&self) -> String {
        match self {
            RunError::Busy { .. } => self.to_string(),
            RunError::Stage { message, .. } => format!("{}{}", ERROR_BANNER, message),
        }
    }
}

pub type Result<T> = std::result::Result<T, RunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_report() {
        let err = RunError::Stage {
            run: RunId(3),
            stage: Stage::Link,
            message: "bad opcode".to_string(),
        };
        assert_eq!(err.report(), "**ERROR**\n\nbad opcode");
        assert_eq!(err.to_string(), "link failed: bad opcode");
    }

    #[test]
    fn test_busy_report() {
        let err = RunError::Busy { active: RunId(1) };
        assert_eq!(err.report(), "A pipeline run is already in progress (run#1)");
    }
}

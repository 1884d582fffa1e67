//! Pipeline stages and run state

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the remote build pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Assemble,
    Link,
    Execute,
}

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Stage; 3] = [Stage::Assemble, Stage::Link, Stage::Execute];

    pub const fn name(&self) -> &'static str {
        match self {
            Stage::Assemble => "assemble",
            Stage::Link => "link",
            Stage::Execute => "execute",
        }
    }

    /// Terminal text shown while the stage is in flight
    pub const fn announcement(&self) -> &'static str {
        match self {
            Stage::Assemble => "Assembling...",
            Stage::Link => "Linking ...",
            Stage::Execute => "Running ...",
        }
    }

    /// Terminal text shown once the stage succeeded.
    ///
    /// Execute has none: its output replaces the readout directly.
    pub const fn acknowledgement(&self) -> Option<&'static str> {
        match self {
            Stage::Assemble => Some("Assembling ✔️"),
            Stage::Link => Some("Linking ✔️"),
            Stage::Execute => None,
        }
    }

    /// Run state while this stage is in flight
    pub const fn running_state(&self) -> PipelineState {
        match self {
            Stage::Assemble => PipelineState::Assembling,
            Stage::Link => PipelineState::Linking,
            Stage::Execute => PipelineState::Executing,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

/// State of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Assembling,
    Linking,
    Executing,
    Done,
    Failed { stage: Stage, message: String },
}

impl PipelineState {
    /// True while a stage is in flight
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            PipelineState::Assembling | PipelineState::Linking | PipelineState::Executing
        )
    }

    /// True once the run reached `Done` or `Failed`
    pub fn is_finished(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed { .. })
    }

    /// Stage currently in flight, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineState::Assembling => Some(Stage::Assemble),
            PipelineState::Linking => Some(Stage::Link),
            PipelineState::Executing => Some(Stage::Execute),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert_eq!(Stage::ALL, [Stage::Assemble, Stage::Link, Stage::Execute]);
    }

    #[test]
    fn test_stage_texts() {
        assert_eq!(Stage::Assemble.announcement(), "Assembling...");
        assert_eq!(Stage::Link.announcement(), "Linking ...");
        assert_eq!(Stage::Execute.announcement(), "Running ...");
        assert_eq!(Stage::Assemble.acknowledgement(), Some("Assembling ✔️"));
        assert_eq!(Stage::Link.acknowledgement(), Some("Linking ✔️"));
        assert_eq!(Stage::Execute.acknowledgement(), None);
    }

    #[test]
    fn test_running_state_round_trip() {
        for stage in Stage::ALL {
            let state = stage.running_state();
            assert!(state.is_active());
            assert!(!state.is_finished());
            assert_eq!(state.stage(), Some(stage));
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PipelineState::Idle.is_active());
        assert!(!PipelineState::Idle.is_finished());
        assert!(PipelineState::Done.is_finished());

        let failed = PipelineState::Failed {
            stage: Stage::Link,
            message: "bad opcode".to_string(),
        };
        assert!(failed.is_finished());
        assert_eq!(failed.stage(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Stage::Execute.to_string(), "execute");
        assert_eq!(RunId(7).to_string(), "run#7");
    }

    #[test]
    fn test_stage_serde_name() {
        let json = serde_json::to_string(&Stage::Link).unwrap();
        assert_eq!(json, "\"link\"");
    }
}

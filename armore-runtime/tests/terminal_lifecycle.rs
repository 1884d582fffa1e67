//! Terminal lifecycle tests
//!
//! Closing the readout mid-run, reopening it, and watching frames arrive.

use std::time::Duration;

use armore_client::{BuildError, BuildService};
use armore_runtime::{Orchestrator, Terminal, Timing};
use armore_spec::{Artifact, Config, PipelineState, Stage};
use async_trait::async_trait;
use serde_json::json;

/// Toolchain answering instantly with fixed artifacts
struct Instant;

#[async_trait]
impl BuildService for Instant {
    async fn assemble(&self, _source: &str) -> armore_client::Result<Artifact> {
        Ok(Artifact::new(json!({"type": "Buffer", "data": [1]})))
    }

    async fn link(&self, _assembled: &Artifact) -> armore_client::Result<Artifact> {
        Ok(Artifact::new(json!({"type": "Buffer", "data": [2]})))
    }

    async fn execute(&self, _linked: &Artifact) -> armore_client::Result<Vec<String>> {
        Ok(vec!["Hello Innsbruck!".to_string()])
    }
}

/// Toolchain that cannot be reached
struct Offline;

#[async_trait]
impl BuildService for Offline {
    async fn assemble(&self, _source: &str) -> armore_client::Result<Artifact> {
        Err(BuildError::transport(Stage::Assemble, "Network Error"))
    }

    async fn link(&self, _assembled: &Artifact) -> armore_client::Result<Artifact> {
        unreachable!("link after failed assemble")
    }

    async fn execute(&self, _linked: &Artifact) -> armore_client::Result<Vec<String>> {
        unreachable!("execute after failed assemble")
    }
}

#[tokio::test(start_paused = true)]
async fn test_closing_terminal_drops_late_output() {
    let terminal = Terminal::new();
    let orch = Orchestrator::new(Instant, terminal.clone(), &Config::default());

    // Frames: 0 Assembling..., 100 ✔, 300 Linking ..., 400 ✔, 600 Running ...
    let closer = async {
        tokio::time::sleep(Duration::from_millis(350)).await;
        terminal.close();
    };
    let (result, ()) = tokio::join!(orch.run("src"), closer);

    // The run still completes for the caller
    assert_eq!(result.unwrap().text(), "Hello Innsbruck!");
    assert_eq!(orch.state(), PipelineState::Done);

    // but nothing after the close reached the screen
    assert!(!terminal.is_open());
    assert_eq!(terminal.text(), "Linking ...");
    assert_eq!(
        terminal.history(),
        vec!["Assembling...", "Assembling ✔️", "Linking ..."]
    );
}

#[tokio::test]
async fn test_reopening_starts_fresh_run_display() {
    let terminal = Terminal::new();
    let orch = Orchestrator::with_timing(Instant, terminal.clone(), Timing::NONE);

    orch.run("first").await.unwrap();
    terminal.close();
    orch.run("second").await.unwrap();

    assert!(terminal.is_open());
    assert_eq!(terminal.text(), "Hello Innsbruck!");
    assert_eq!(
        terminal.history(),
        vec![
            "Assembling...",
            "Assembling ✔️",
            "Linking ...",
            "Linking ✔️",
            "Running ...",
            "Hello Innsbruck!",
        ]
    );
}

#[tokio::test]
async fn test_watch_receiver_sees_final_frame() {
    let terminal = Terminal::new();
    let mut rx = terminal.subscribe();
    let orch = Orchestrator::with_timing(Offline, terminal.clone(), Timing::NONE);

    let err = orch.run("src").await.unwrap_err();
    assert_eq!(err.report(), "**ERROR**\n\nNetwork Error");

    assert!(rx.has_changed().unwrap());
    let view = rx.borrow_and_update().clone();
    assert!(view.open);
    assert_eq!(view.text, "**ERROR**\n\nNetwork Error");
}

//! `BuildService` trait: the boundary between the orchestrator and the
//! remote toolchain.

use std::sync::Arc;

use armore_spec::Artifact;
use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait BuildService: Send + Sync {
    /// Assemble source text into an object artifact.
    async fn assemble(&self, source: &str) -> Result<Artifact>;

    /// Link an assembled artifact into an executable artifact.
    async fn link(&self, assembled: &Artifact) -> Result<Artifact>;

    /// Execute a linked artifact, returning its captured output lines.
    async fn execute(&self, linked: &Artifact) -> Result<Vec<String>>;
}

#[async_trait]
impl<T: BuildService + ?Sized> BuildService for Arc<T> {
    async fn assemble(&self, source: &str) -> Result<Artifact> {
        (**self).assemble(source).await
    }

    async fn link(&self, assembled: &Artifact) -> Result<Artifact> {
        (**self).link(assembled).await
    }

    async fn execute(&self, linked: &Artifact) -> Result<Vec<String>> {
        (**self).execute(linked).await
    }
}

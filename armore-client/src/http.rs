//! HTTP implementation of `BuildService`

use armore_spec::{Artifact, Config, Stage};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{BuildError, ClientError, Result};
use crate::service::BuildService;
use crate::wire::{self, ArtifactResponse, ExecuteResponse, StageRequest};

/// Remote build client over reqwest
#[derive(Debug, Clone)]
pub struct HttpBuildClient {
    http: Client,
    config: Config,
}

impl HttpBuildClient {
    /// Create a client; every request carries `config.timeout`
    pub fn new(config: Config) -> std::result::Result<Self, ClientError> {
        config.validate()?;

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// POST `{ "data": input }` to a stage endpoint and decode the reply
    async fn post<B, R>(&self, stage: Stage, input: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self
            .config
            .endpoint_url(stage)
            .map_err(|e| BuildError::transport(stage, e.to_string()))?;

        debug!(%stage, %url, "sending stage request");

        let response = self
            .http
            .post(url)
            .json(&StageRequest { data: input })
            .send()
            .await
            .map_err(|e| self.transport_error(stage, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = wire::error_message(&body).unwrap_or_else(|| {
                format!("Request failed with status code {}", status.as_u16())
            });
            warn!(%stage, status = status.as_u16(), %message, "stage rejected");
            return Err(BuildError::remote(stage, status.as_u16(), message));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(stage, e))?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!(%stage, error = %e, "unexpected response body");
            BuildError::Malformed {
                stage,
                message: format!("Unexpected {} response: {}", stage, e),
            }
        })
    }

    fn transport_error(&self, stage: Stage, err: reqwest::Error) -> BuildError {
        let message = if err.is_timeout() {
            format!("timeout of {}ms exceeded", self.config.timeout.as_millis())
        } else {
            format!("Network Error: {}", err)
        };
        warn!(%stage, %message, "stage request failed");
        BuildError::transport(stage, message)
    }
}

#[async_trait]
impl BuildService for HttpBuildClient {
    async fn assemble(&self, source: &str) -> Result<Artifact> {
        let response: ArtifactResponse = self.post(Stage::Assemble, source).await?;
        Ok(response.into_artifact())
    }

    async fn link(&self, assembled: &Artifact) -> Result<Artifact> {
        let response: ArtifactResponse = self.post(Stage::Link, assembled).await?;
        Ok(response.into_artifact())
    }

    async fn execute(&self, linked: &Artifact) -> Result<Vec<String>> {
        let response: ExecuteResponse = self.post(Stage::Execute, linked).await?;
        Ok(response.into_lines())
    }
}

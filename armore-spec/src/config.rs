//! # Configuration
//!
//! Where the remote build service lives, how long each call may take, and
//! how long each terminal frame stays visible before the pipeline moves on.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::stage::Stage;

/// Environment variable selecting the deployment mode
pub const ENV_DEPLOYMENT: &str = "ARMORE_ENV";

/// Environment variable overriding the service base URL
pub const ENV_API_URL: &str = "ARMORE_API_URL";

/// Environment variable overriding the per-call timeout in milliseconds
pub const ENV_TIMEOUT_MS: &str = "ARMORE_TIMEOUT_MS";

/// Deployment mode, selecting the default service URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Deployment {
    #[default]
    Local,
    Hosted,
}

impl Deployment {
    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Deployment::Local => "http://localhost",
            Deployment::Hosted => "https://api.armore.khadimfall.com",
        }
    }
}

impl FromStr for Deployment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "dev" | "development" => Ok(Deployment::Local),
            "hosted" | "prod" | "production" => Ok(Deployment::Hosted),
            other => Err(ConfigError::UnknownDeployment(other.to_string())),
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deployment::Local => f.write_str("local"),
            Deployment::Hosted => f.write_str("hosted"),
        }
    }
}

/// Endpoint paths, relative to the base URL.
///
/// The defaults keep the service's own spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub assemble: String,
    pub link: String,
    pub execute: String,
}

impl Endpoints {
    pub fn path(&self, stage: Stage) -> &str {
        match stage {
            Stage::Assemble => &self.assemble,
            Stage::Link => &self.link,
            Stage::Execute => &self.execute,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            assemble: "/assambler/assamble".to_string(),
            link: "/assambler/link".to_string(),
            execute: "/exec".to_string(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub deployment: Deployment,
    /// Service base URL, without trailing slash
    pub base_url: String,
    /// Per-call timeout
    pub timeout: Duration,
    /// Minimum time a stage announcement stays visible
    pub announce_delay: Duration,
    /// Minimum time a stage acknowledgement stays visible
    pub acknowledge_delay: Duration,
    /// Minimum time "Running ..." stays visible before execute is called
    pub launch_delay: Duration,
    pub endpoints: Endpoints,
}

impl Config {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
    pub const DEFAULT_ANNOUNCE_DELAY: Duration = Duration::from_millis(100);
    pub const DEFAULT_ACKNOWLEDGE_DELAY: Duration = Duration::from_millis(200);
    pub const DEFAULT_LAUNCH_DELAY: Duration = Duration::from_millis(200);

    /// Default configuration for a deployment mode
    pub fn for_deployment(deployment: Deployment) -> Self {
        Config {
            deployment,
            base_url: deployment.default_base_url().to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            announce_delay: Self::DEFAULT_ANNOUNCE_DELAY,
            acknowledge_delay: Self::DEFAULT_ACKNOWLEDGE_DELAY,
            launch_delay: Self::DEFAULT_LAUNCH_DELAY,
            endpoints: Endpoints::default(),
        }
    }

    /// Configuration from `ARMORE_ENV`, `ARMORE_API_URL` and `ARMORE_TIMEOUT_MS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let deployment = match lookup(ENV_DEPLOYMENT) {
            Some(mode) => mode.parse()?,
            None => Deployment::default(),
        };

        let mut config = Self::for_deployment(deployment);

        if let Some(url) = lookup(ENV_API_URL) {
            config = config.with_base_url(url);
        }

        if let Some(ms) = lookup(ENV_TIMEOUT_MS) {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(ms.clone()))?;
            config.timeout = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Drop the display intervals, for tests and non-interactive use
    pub fn without_delays(mut self) -> Self {
        self.announce_delay = Duration::ZERO;
        self.acknowledge_delay = Duration::ZERO;
        self.launch_delay = Duration::ZERO;
        self
    }

    /// Full URL of a stage endpoint
    pub fn endpoint_url(&self, stage: Stage) -> Result<Url, ConfigError> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoints.path(stage).trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_deployment(Deployment::default())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ {} @ {}, timeout: {} ms, frames: {}/{}/{} ms }}",
            self.deployment,
            self.base_url,
            self.timeout.as_millis(),
            self.announce_delay.as_millis(),
            self.acknowledge_delay.as_millis(),
            self.launch_delay.as_millis(),
        )
    }
}

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Unsupported URL scheme: {0} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("Timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Invalid timeout: {0:?} (expected milliseconds)")]
    InvalidTimeout(String),

    #[error("Unknown deployment mode: {0:?}")]
    UnknownDeployment(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.deployment, Deployment::Local);
        assert_eq!(config.base_url, "http://localhost");
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.announce_delay, Duration::from_millis(100));
        assert_eq!(config.acknowledge_delay, Duration::from_millis(200));
        assert_eq!(config.launch_delay, Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hosted_deployment() {
        let config = Config::for_deployment(Deployment::Hosted);
        assert_eq!(config.base_url, "https://api.armore.khadimfall.com");
    }

    #[test]
    fn test_endpoint_urls() {
        let config = Config::default();
        assert_eq!(
            config.endpoint_url(Stage::Assemble).unwrap().as_str(),
            "http://localhost/assambler/assamble"
        );
        assert_eq!(
            config.endpoint_url(Stage::Link).unwrap().as_str(),
            "http://localhost/assambler/link"
        );
        assert_eq!(
            config.endpoint_url(Stage::Execute).unwrap().as_str(),
            "http://localhost/exec"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let config = Config::default().with_base_url("https://example.com/api/");
        assert_eq!(config.base_url, "https://example.com/api");
        assert_eq!(
            config.endpoint_url(Stage::Execute).unwrap().as_str(),
            "https://example.com/api/exec"
        );
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENV_DEPLOYMENT, "production"),
            (ENV_TIMEOUT_MS, "2500"),
        ]))
        .unwrap();
        assert_eq!(config.deployment, Deployment::Hosted);
        assert_eq!(config.base_url, "https://api.armore.khadimfall.com");
        assert_eq!(config.timeout, Duration::from_millis(2500));

        let config = Config::from_lookup(lookup(&[
            (ENV_DEPLOYMENT, "hosted"),
            (ENV_API_URL, "http://127.0.0.1:8080/"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_from_lookup_errors() {
        assert_eq!(
            Config::from_lookup(lookup(&[(ENV_DEPLOYMENT, "staging")])).unwrap_err(),
            ConfigError::UnknownDeployment("staging".to_string())
        );
        assert_eq!(
            Config::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "soon")])).unwrap_err(),
            ConfigError::InvalidTimeout("soon".to_string())
        );
        assert_eq!(
            Config::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "0")])).unwrap_err(),
            ConfigError::ZeroTimeout
        );
    }

    #[test]
    fn test_validation() {
        let config = Config::default().with_base_url("ftp://example.com");
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::UnsupportedScheme("ftp".to_string())
        );

        let config = Config::default().with_base_url("not a url");
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidBaseUrl { .. }
        ));
    }

    #[test]
    fn test_without_delays() {
        let config = Config::default().without_delays();
        assert!(config.announce_delay.is_zero());
        assert!(config.acknowledge_delay.is_zero());
        assert!(config.launch_delay.is_zero());
        assert_eq!(config.timeout, Config::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_display() {
        let config = Config::default();
        assert_eq!(
            config.to_string(),
            "Config { local @ http://localhost, timeout: 15000 ms, frames: 100/200/200 ms }"
        );
    }
}

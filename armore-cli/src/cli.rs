//! Command-line arguments

use std::path::PathBuf;

use anyhow::Result;
use armore_spec::config::{ENV_API_URL, ENV_DEPLOYMENT, ENV_TIMEOUT_MS};
use armore_spec::{Config, Deployment};
use clap::{Parser, Subcommand};

/// Edit, store, share and run ARM assembly snippets against the ARMore service
#[derive(Debug, Parser)]
#[command(name = "armore", version, about)]
pub struct Cli {
    /// Directory holding saved snippets and the current session
    #[arg(long, global = true, env = "ARMORE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Deployment whose service URL to use (local or hosted)
    #[arg(long, global = true)]
    pub deployment: Option<Deployment>,

    /// Service base URL, overriding the deployment default
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a fresh session with the demo program
    New {
        /// File name for the new session
        name: Option<String>,
    },
    /// Print the session's name and source
    Show,
    /// Load a file from disk into the session
    Edit { path: PathBuf },
    /// Set the session's file name
    Name { name: String },
    /// Save the session under its file name
    Save,
    /// Open a saved snippet
    Open { name: String },
    /// Delete a saved snippet
    Delete { name: String },
    /// List saved snippets, optionally filtered
    List { query: Option<String> },
    /// Assemble, link and execute the session (or a file)
    Run {
        /// Run this file instead of the session source
        path: Option<PathBuf>,
    },
    /// Print a share link for the session
    Share {
        /// Editor page the link points at
        #[arg(long, default_value = "https://armore.khadimfall.com/")]
        page_url: String,
    },
    /// Load a session from a share link or token
    Load { link: String },
    /// Print the editor keyboard shortcuts
    Keys,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn config(&self) -> Result<Config> {
        self.config_with(|key| std::env::var(key).ok())
    }

    /// Flags take precedence per variable; anything not given on the
    /// command line comes from `lookup`.
    pub fn config_with<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config::from_lookup(|key| {
            let flag = match key {
                ENV_DEPLOYMENT => self.deployment.map(|d| d.to_string()),
                ENV_API_URL => self.api_url.clone(),
                ENV_TIMEOUT_MS => self.timeout_ms.map(|ms| ms.to_string()),
                _ => None,
            };
            flag.or_else(|| lookup(key))
        })?;
        Ok(config)
    }

    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".armore"),
        }
    }
}

//! ARMore remote build client
//!
//! Typed access to the three remote toolchain endpoints. Each stage is one
//! POST whose output feeds the next stage.
//!
//! ## Example
//!
//! ```rust,no_run
//! use armore_client::{BuildService, HttpBuildClient};
//! use armore_spec::Config;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpBuildClient::new(Config::default())?;
//! let assembled = client.assemble("MOV r0, #1").await?;
//! let linked = client.link(&assembled).await?;
//! let lines = client.execute(&linked).await?;
//! println!("{}", lines.join("\n"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod service;
pub mod wire;

pub use error::{BuildError, ClientError, Result};
pub use http::HttpBuildClient;
pub use service::BuildService;

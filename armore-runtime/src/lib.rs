//! # ARMore Runtime
//!
//! Drives a source file through the remote build pipeline and reports each
//! step on a terminal-style status readout.
//!
//! ## Features
//!
//! - **Staged feedback**: every stage is announced and acknowledged, with a
//!   minimum display interval so fast transitions stay visible
//! - **Single active run**: a second run while one is in flight is rejected
//! - **Detachable display**: closing the terminal hides a run without
//!   cancelling it; its late output is dropped
//!
//! ## Example
//!
//! ```rust,no_run
//! use armore_client::HttpBuildClient;
//! use armore_runtime::{Orchestrator, Terminal};
//! use armore_spec::Config;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = HttpBuildClient::new(config.clone())?;
//! let orchestrator = Orchestrator::new(client, Terminal::new(), &config);
//!
//! match orchestrator.run(armore_spec::DEFAULT_PROGRAM).await {
//!     Ok(transcript) => println!("{}", transcript.text()),
//!     Err(err) => eprintln!("{}", err.report()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod orchestrator;
pub mod terminal;

pub use error::{Result, RunError};
pub use orchestrator::{Orchestrator, Timing, Transcript};
pub use terminal::{Terminal, TerminalView, Ticket};

//! # ARMore core types
//!
//! Shared vocabulary for the ARMore toolchain client: the remote build
//! pipeline stages, the opaque artifacts passed between them, named snippets
//! and the editing session they belong to.
//!
//! ## Key Features
//! - `Stage` / `PipelineState`: the assemble → link → execute state machine
//! - `Artifact`: opaque stage output, forwarded verbatim to the next stage
//! - `Snippet` / `SessionState`: persisted source files and the open session
//! - `Config`: remote endpoint, timeouts and display intervals

pub mod artifact;
pub mod config;
pub mod session;
pub mod stage;

pub use artifact::Artifact;
pub use config::{Config, ConfigError, Deployment, Endpoints};
pub use session::{SessionState, Snippet};
pub use stage::{PipelineState, RunId, Stage};

/// Storage key holding the snippet map: `{ name: { "code": source } }`
pub const FILES_KEY: &str = "files";

/// Storage key holding the persisted editing session
pub const SESSION_KEY: &str = "session";

/// Prefix shown in the terminal when a stage fails
pub const ERROR_BANNER: &str = "**ERROR**\n\n";

/// Program loaded into a fresh session
pub const DEFAULT_PROGRAM: &str = r#".data
msg:
.ascii "Hello Innsbruck!"
len = . - msg
.align
.global _start
_start:
MOV r0, #1
LDR r1, =msg
LDR r2, =len
MOV r7, #4
SWI #0

MOV r0, #0
MOV r7, #1
SWI #0
"#;

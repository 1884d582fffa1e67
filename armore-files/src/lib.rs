//! ARMore files
//!
//! Everything the editor keeps on the client side: named snippets in local
//! storage, the session that edits them, the picker filter, share links and
//! keyboard shortcuts.
//!
//! ## Example
//!
//! ```rust
//! use armore_files::{share, FileSession, MemoryStorage, SnippetStore};
//!
//! let mut session = FileSession::new(SnippetStore::new(MemoryStorage::new()));
//! session.rename("hello.asm");
//! session.save_current().unwrap();
//!
//! let token = session.share_token();
//! let shared = share::decode(&token).unwrap();
//! assert_eq!(shared.name, "hello.asm");
//! ```

pub mod error;
pub mod fuzzy;
pub mod keymap;
pub mod session;
pub mod share;
pub mod storage;
pub mod store;

pub use error::{DecodeError, SessionError, StorageError};
pub use fuzzy::{filter, FilePicker};
pub use keymap::{Action, Binding, Key, KeyChord, KeyParseError, Keymap};
pub use session::{DroppedFile, FileSession};
pub use share::ShareState;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::SnippetStore;

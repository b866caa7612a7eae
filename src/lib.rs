//! Stylized small-caps text translation with Minecraft color-code
//! preservation and a persisted translation history.
//!
//! The crate has two halves:
//!
//! - [`translate`]: the transform engine, a pure total function that maps
//!   Latin and Cyrillic letters to small-caps lookalikes and digits to
//!   subscripts while passing color codes (`&a`, `§4`, `&#1a2b3c`,
//!   `<#1a2b3c>`) through verbatim.
//! - [`Session`]: the state container around the engine: current
//!   source/translated text, a debounced and deduplicated translation
//!   history, a dark-mode flag, and persistence of the durable subset
//!   through a pluggable [`SessionStorage`] backend.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use gen2_caps::{MemoryStorage, Session, translate};
//!
//! #[tokio::main]
//! async fn main() {
//!     assert_eq!(translate("&aHello 123"), "&aʜᴇʟʟᴏ ₁₂₃");
//!
//!     let session = Session::new(Arc::new(MemoryStorage::new()));
//!     session.restore().await;
//!     session.set_source_text("Hello");
//!     // After the quiet period a history entry is committed and the
//!     // durable subset is saved.
//! }
//! ```

pub mod codes;
pub mod glyphs;
pub mod session;
pub mod state;
pub mod storage;
pub mod translator;

pub use codes::MARKERS;
pub use glyphs::substitute;
pub use session::{Clock, HISTORY_DEBOUNCE, STORAGE_KEY, Session, SystemClock};
pub use state::{Action, HistoryItem, PersistedState, SessionState, reduce};
pub use storage::{
    JsonFileStorage, MemoryMode, MemoryStorage, SessionStorage, StorageError, StorageResult,
};
pub use translator::translate;

/// Verbosity level for debug logging from the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// No debug logging
    Silent = 0,
    /// Log only persistence problems (default)
    Normal = 1,
    /// Also log restored state, superseded timers and discarded duplicates
    Verbose = 2,
}

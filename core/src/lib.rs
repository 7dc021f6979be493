//! Fetch coordination core.
//!
//! Data flow: trigger (manual command or note-open event) → [`Fetcher`]
//! checks preconditions → [`prompt`] builds the request text from enabled
//! languages and recent history → the active provider adapter generates
//! entries → the fetcher records words into history, persists settings, and
//! renders the markdown block → [`writer`] appends it to the resolved daily
//! note exactly once.
//!
//! Two independent duplicate guards exist: the fetcher's in-flight flag
//! (suppresses near-simultaneous auto-triggers before either has written
//! anything) and the writer's content-based sentinel check (covers notes
//! that already carry a generated block).

mod fetcher;
pub mod prompt;
pub mod render;
mod vault;
pub mod writer;

pub use fetcher::{FetchError, Fetcher, LiveSource, Notifier, TracingNotifier, WordSource};
pub use render::SENTINEL_HEADER;
pub use vault::{FsVault, MemoryVault, Vault};
pub use writer::{AppendOutcome, StorageError};

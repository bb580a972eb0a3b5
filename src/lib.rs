// Library exports for embedding the tab session core in an editor
//
// The core is single-threaded: `TabSession` methods take `&mut self` and run
// each command to completion, including the cache write on close. Hosts that
// share a session across threads wrap it in their own lock
// (`parking_lot::Mutex` is what the in-memory store uses).

/// Crate version, for the CLI banner and embedders.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod clock;
pub mod history;
pub mod metadata_cache;
pub mod persistence;
pub mod recovery;
pub mod session;
pub mod tab;

pub use folio_config::Config;
pub use folio_store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use history::ActiveSelector;
pub use metadata_cache::{CacheSnapshot, MetadataCache, MetadataCacheEntry};
pub use persistence::PersistenceGateway;
pub use recovery::{ContentLookup, NoContentLookup, RecoveryResolver, ResolvedContent, ResumeTarget};
pub use session::TabSession;
pub use tab::{Tab, TabDescriptor, TabId, TabKind, TabRegistry, TabUpdate};

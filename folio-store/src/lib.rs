//! Durable key-value store backends for the folio tab/session manager.
//!
//! The tab session persists one blob per project. This crate defines the
//! [`KeyValueStore`] seam the session writes through, plus two backends:
//!
//! - [`FileStore`]: one file per key under a directory, written atomically
//! - [`MemoryStore`]: process-local map, used by tests and embedders that
//!   provide their own durability

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// A durable key-value store addressed by namespace keys.
///
/// Implementations must complete writes before returning: callers rely on a
/// successful `save` meaning the bytes survive a process exit.
pub trait KeyValueStore {
    /// Read the bytes stored under `key`, or `None` if nothing is stored.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the bytes stored under `key`.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).save(key, bytes)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

//! Typed error types for folio-store.

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by a [`KeyValueStore`](crate::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read, written, or removed.
    #[error("Store I/O failed for '{}': {source}", path.display())]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped to a storage location.
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),
}

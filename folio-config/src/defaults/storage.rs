//! Defaults for the durable key-value store.

use std::path::PathBuf;

/// Prefix joined with the project id to form the storage key of a cache blob.
pub fn namespace_prefix() -> String {
    "tab-metadata-cache:".to_string()
}

/// `None` means "use `<config dir>/data`".
pub fn data_dir() -> Option<PathBuf> {
    None
}

//! Defaults for the in-memory tab session.

/// Maximum number of previously-active tab ids kept in the MRU history.
pub fn history_limit() -> usize {
    10
}

/// Maximum number of closed-tab entries kept in the metadata cache per project.
pub fn cache_capacity() -> usize {
    50
}

pub fn log_level() -> crate::types::LogLevel {
    crate::types::LogLevel::Off
}

//! Default value functions for configuration.
//!
//! Each sub-module groups related `default_*` free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes on `Config` fields.

mod session;
mod storage;

// ── Tab session bounds ─────────────────────────────────────────────────────
pub use session::{cache_capacity, history_limit, log_level};

// ── Durable storage ────────────────────────────────────────────────────────
pub use storage::{data_dir, namespace_prefix};

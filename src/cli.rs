//! Command-line interface for folio.
//!
//! The binary inspects and maintains the persisted closed-tab caches that
//! editor sessions leave behind in the data directory.

use crate::metadata_cache::{MetadataCache, MetadataCacheEntry};
use crate::persistence::PersistenceGateway;
use crate::recovery::{NoContentLookup, RecoveryResolver};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_config::{Config, LogLevel};
use folio_store::FileStore;
use std::io::Write;
use std::path::PathBuf;

/// folio - tab session and closed-tab cache manager for document editors
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/folio/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the cache blobs (overrides the config file)
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level for the debug log file (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the closed tabs cached for a project, most recent first
    Cache {
        /// Project identifier
        #[arg(long, short)]
        project: String,
    },
    /// Show the document a project would resume with
    Resume {
        /// Project identifier
        #[arg(long, short)]
        project: String,
    },
    /// Delete a project's cached closed tabs
    Clear {
        /// Project identifier
        #[arg(long, short)]
        project: String,
    },
}

impl Cli {
    /// Load the config file and apply command-line overrides
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        Ok(config)
    }
}

/// Execute a parsed command, writing human-readable output to `out`
pub fn run(cli: &Cli, config: &Config, out: &mut impl Write) -> Result<()> {
    let data_dir = config.effective_data_dir();
    log::info!("Using data directory {:?}", data_dir);
    let gateway = PersistenceGateway::new(FileStore::new(data_dir), config.namespace_prefix.clone());

    match &cli.command {
        Commands::Cache { project } => {
            let cache = MetadataCache::from_snapshot(gateway.load(project), config.cache_capacity);
            if cache.is_empty() {
                writeln!(out, "No closed tabs cached for project {project}")?;
            }
            for entry in cache.by_recency() {
                writeln!(out, "{}", format_entry(entry))?;
            }
        }
        Commands::Resume { project } => {
            let empty = MetadataCache::new(config.cache_capacity);
            match RecoveryResolver::suggest_resume_target(project, &gateway, &empty, &NoContentLookup)
            {
                Some(target) => {
                    write!(out, "Resume \"{}\"", target.title)?;
                    if let Some(content_id) = &target.linked_content_id {
                        write!(out, " (content {content_id}, not checked against live content)")?;
                    }
                    writeln!(out)?;
                }
                None => writeln!(out, "Nothing to resume for project {project}")?,
            }
        }
        Commands::Clear { project } => {
            if !gateway.clear(project) {
                anyhow::bail!("Failed to clear cached tabs for project {project}");
            }
            writeln!(out, "Cleared cached tabs for project {project}")?;
        }
    }
    out.flush().context("Failed to flush output")?;
    Ok(())
}

fn format_entry(entry: &MetadataCacheEntry) -> String {
    let when = chrono::DateTime::from_timestamp_millis(entry.last_accessed_at)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| entry.last_accessed_at.to_string());
    match &entry.linked_content_id {
        Some(content_id) => format!("{when}  {}  {}  [{content_id}]", entry.id, entry.title),
        None => format!("{when}  {}  {}", entry.id, entry.title),
    }
}

//! Command-line arguments and the validated run configuration.

use std::path::PathBuf;

use clap::Parser;
use linear::{LinearConfig, DEFAULT_ENDPOINT};
use mirror::{MirrorError, SyncMode, SyncOptions, DOC_COLLECTIONS};

/// Environment variable holding the Linear API key.
pub const API_KEY_ENV: &str = "LINEAR_API_KEY";

/// Sync docs to Linear issues with checkbox conversion.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Apply updates to Linear (default is a dry run)
    #[arg(long)]
    pub apply: bool,

    /// Limit number of docs to process
    #[arg(long)]
    pub limit: Option<usize>,

    /// Directory scanned for markdown documents
    #[arg(long, env = "DOCS_MIRROR_ROOT", default_value = "docs")]
    pub docs_root: PathBuf,

    /// Linear GraphQL endpoint
    #[arg(long, env = "LINEAR_API_URL", default_value = DEFAULT_ENDPOINT)]
    pub api_url: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "DOCS_MIRROR_LOG_JSON", default_value = "false")]
    pub log_json: bool,
}

/// Everything a run needs, validated before any I/O.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub linear: LinearConfig,
    pub sync: SyncOptions,
}

impl CliConfig {
    /// Combines parsed arguments with the API key from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Configuration`] when the API key is absent or
    /// empty.
    pub fn from_args(args: &Args, api_key: Option<String>) -> Result<Self, MirrorError> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| MirrorError::Configuration {
                message: format!("{API_KEY_ENV} is required in environment."),
            })?;

        let mode = if args.apply {
            SyncMode::Apply
        } else {
            SyncMode::Preview
        };

        Ok(Self {
            linear: LinearConfig {
                endpoint: args.api_url.clone(),
                api_key,
            },
            sync: SyncOptions {
                docs_root: args.docs_root.clone(),
                collections: DOC_COLLECTIONS,
                mode,
                limit: args.limit,
            },
        })
    }
}

//! Subcommand implementations

pub mod check;
pub mod diff;
pub mod generate;
pub mod ls;
pub mod update;

use apisync_engine::{ApiSyncConfig, OriginFetcher, ReconciliationSession};
use clap::Args;
use std::path::Path;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Data source to work on (defaults to the first configured origin)
    #[arg(long)]
    pub source: Option<String>,
}

/// Load config, open a session on the requested source and make it ready
pub async fn open_session(
    config_path: &Path,
    source: Option<&str>,
) -> Result<ReconciliationSession, Box<dyn std::error::Error>> {
    let config = ApiSyncConfig::load(config_path)?;
    let fetcher = OriginFetcher::new(config.base_dir.clone());
    let mut session = ReconciliationSession::new(config, fetcher);
    session.ready().await?;

    if let Some(name) = source {
        if session.current_config()?.name != name {
            session.select_data_source(name).await?;
        }
    }
    Ok(session)
}

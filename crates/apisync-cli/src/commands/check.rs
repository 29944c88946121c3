//! `apisync check`

use apisync_engine::{ApiSyncConfig, OriginFetcher, ReconciliationSession};
use std::path::Path;

use super::CommandResult;

pub async fn execute(config_path: &Path) -> CommandResult {
    let config = ApiSyncConfig::load(config_path)?;
    let fetcher = OriginFetcher::new(config.base_dir.clone());
    let session = ReconciliationSession::new(config, fetcher);

    let sources = session.check_lock().await?;
    let endpoints: usize = sources.iter().map(|ds| ds.endpoint_count()).sum();
    println!(
        "lock OK: {} data source(s), {} endpoint(s)",
        sources.len(),
        endpoints
    );
    Ok(())
}

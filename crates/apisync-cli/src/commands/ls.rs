//! `apisync ls`

use apisync_engine::ApiSyncConfig;
use std::path::Path;

use super::CommandResult;

pub fn execute(config_path: &Path) -> CommandResult {
    let config = ApiSyncConfig::load(config_path)?;
    let locked = if apisync_store::lock_exists(&config.out_dir) {
        apisync_store::load_lock(&config.out_dir)?
    } else {
        Vec::new()
    };

    for origin in &config.origins {
        match locked.iter().find(|ds| ds.name == origin.name) {
            Some(ds) => println!(
                "{}\t{} module(s), {} endpoint(s), {} shared type(s)",
                origin.name,
                ds.modules.len(),
                ds.endpoint_count(),
                ds.shared_types.len()
            ),
            None => println!("{}\tnot locked", origin.name),
        }
    }
    Ok(())
}

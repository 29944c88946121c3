//! `apisync generate`

use apisync_engine::DeclarationGenerator;
use std::path::Path;

use super::{open_session, CommandResult, SourceArgs};

pub async fn execute(config_path: &Path, args: SourceArgs) -> CommandResult {
    let mut session = open_session(config_path, args.source.as_deref()).await?;
    let files = session.regenerate(&DeclarationGenerator).await?;
    println!(
        "wrote {} file(s) to {}",
        files,
        session.config().out_dir.display()
    );
    Ok(())
}

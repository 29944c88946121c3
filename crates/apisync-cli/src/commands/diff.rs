//! `apisync diff`

use apisync_core::render_diff_summary;
use clap::Args;
use std::path::Path;

use super::{open_session, CommandResult};

#[derive(Debug, Args)]
pub struct DiffArgs {
    #[arg(long)]
    pub source: Option<String>,

    /// Print the report as JSON instead of Markdown
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(config_path: &Path, args: DiffArgs) -> CommandResult {
    let mut session = open_session(config_path, args.source.as_deref()).await?;
    let report = session.calc_diffs()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_diff_summary(report));
    }
    Ok(())
}

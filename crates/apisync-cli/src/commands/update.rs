//! Merge commands: `update-shared-type`, `update-module`,
//! `update-endpoint` and `accept-all`
//!
//! Every command merges into the local snapshot, then regenerates the
//! client and persists the lock.

use apisync_core::diff::ChangeKind;
use apisync_core::errors::{ExError, ExErrorKind};
use apisync_core::model::EndpointRef;
use apisync_engine::{DeclarationGenerator, ReconciliationSession};
use clap::Args;
use std::path::Path;

use super::{open_session, CommandResult, SourceArgs};

#[derive(Debug, Args)]
pub struct NamesArgs {
    #[arg(required = true)]
    pub names: Vec<String>,

    #[arg(long)]
    pub source: Option<String>,
}

#[derive(Debug, Args)]
pub struct ModuleArgs {
    #[arg(required = true)]
    pub names: Vec<String>,

    #[arg(long)]
    pub source: Option<String>,

    /// Merge modules whose changes would normally be resolved per endpoint
    #[arg(long)]
    pub force: bool,
}

async fn finish(session: &mut ReconciliationSession) -> CommandResult {
    let files = session.regenerate(&DeclarationGenerator).await?;
    println!("regenerated {} file(s)", files);
    Ok(())
}

pub async fn execute_shared_types(config_path: &Path, args: NamesArgs) -> CommandResult {
    let mut session = open_session(config_path, args.source.as_deref()).await?;
    for name in &args.names {
        let outcome = session.merge_shared_type(name)?;
        println!("shared type {}: {:?}", name, outcome);
    }
    finish(&mut session).await
}

pub async fn execute_modules(config_path: &Path, args: ModuleArgs) -> CommandResult {
    let mut session = open_session(config_path, args.source.as_deref()).await?;

    if !args.force {
        let report = session.calc_diffs()?;
        for name in &args.names {
            if let Some(change) = report.module(name) {
                if change.kind == ChangeKind::Modified && !change.is_selectable() {
                    return Err(ExError::new(ExErrorKind::InvalidInput)
                        .with_op("update_module")
                        .with_entity(name.clone())
                        .with_message(
                            "module has several changes; accept them with update-endpoint or pass --force",
                        )
                        .with_candidates(
                            change
                                .endpoint_changes
                                .iter()
                                .map(|c| format!("{}.{}", name, c.name))
                                .collect(),
                        )
                        .into());
                }
            }
        }
    }

    for name in &args.names {
        let outcome = session.merge_module(name)?;
        println!("module {}: {:?}", name, outcome);
    }
    finish(&mut session).await
}

pub async fn execute_endpoints(config_path: &Path, args: NamesArgs) -> CommandResult {
    let targets = args
        .names
        .iter()
        .map(|raw| EndpointRef::parse(raw).map_err(ExError::from))
        .collect::<Result<Vec<_>, _>>()?;

    let mut session = open_session(config_path, args.source.as_deref()).await?;
    let report = session.merge_endpoints(&targets)?;
    for (target, outcome) in &report.applied {
        println!("endpoint {}: {:?}", target, outcome);
    }
    for skipped in &report.skipped {
        println!("endpoint {}: skipped ({})", skipped.target, skipped.reason);
    }
    finish(&mut session).await
}

pub async fn execute_accept_all(config_path: &Path, args: SourceArgs) -> CommandResult {
    let mut session = open_session(config_path, args.source.as_deref()).await?;
    session.replace_all()?;
    println!("accepted remote schema for {}", session.current_config()?.name);
    finish(&mut session).await
}

//! apisync CLI
//!
//! Command-line interface for reviewing and accepting remote API schema
//! changes and regenerating client declarations

use apisync_core::logging_facility::{self, Profile};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "apisync")]
#[command(about = "apisync - keep a generated API client in sync with its backend", long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "APISYNC_CONFIG", default_value = apisync_engine::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Human-readable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate the lock on disk
    Check,
    /// List configured data sources and what the lock holds for each
    Ls,
    /// Show differences between the lock and the remote schema
    Diff(commands::diff::DiffArgs),
    /// Accept remote versions of shared types
    UpdateSharedType(commands::update::NamesArgs),
    /// Accept remote versions of whole modules
    UpdateModule(commands::update::ModuleArgs),
    /// Accept remote versions of single endpoints (`module.endpoint`)
    UpdateEndpoint(commands::update::NamesArgs),
    /// Replace the local snapshot with the remote schema
    AcceptAll(commands::SourceArgs),
    /// Regenerate client declarations from the lock
    Generate(commands::SourceArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        logging_facility::init(Profile::Development);
    } else if std::env::var_os("RUST_LOG").is_some() {
        logging_facility::init(Profile::Production);
    }

    let config = cli.config;
    let result = match cli.command {
        Commands::Check => commands::check::execute(&config).await,
        Commands::Ls => commands::ls::execute(&config),
        Commands::Diff(args) => commands::diff::execute(&config, args).await,
        Commands::UpdateSharedType(args) => {
            commands::update::execute_shared_types(&config, args).await
        }
        Commands::UpdateModule(args) => commands::update::execute_modules(&config, args).await,
        Commands::UpdateEndpoint(args) => commands::update::execute_endpoints(&config, args).await,
        Commands::AcceptAll(args) => commands::update::execute_accept_all(&config, args).await,
        Commands::Generate(args) => commands::generate::execute(&config, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

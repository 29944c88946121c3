//! apisync engine - orchestration layer
//!
//! Ties configuration, remote fetching, the snapshot store and the core
//! reconciliation kernel together in a [`ReconciliationSession`].

pub mod config;
pub mod errors;
pub mod fetcher;
pub mod session;

pub use apisync_core::render::{CodeGenerator, DeclarationGenerator, FileTree};
pub use config::{ApiSyncConfig, DataSourceConfig, DEFAULT_CONFIG_FILE};
pub use fetcher::{OriginFetcher, RemoteFetcher};
pub use session::ReconciliationSession;

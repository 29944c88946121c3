//! apisync core - schema model and reconciliation kernel
//!
//! This crate provides:
//! - The canonical schema model (data sources, modules, endpoints, shared types)
//! - A pure name-level diff engine with endpoint sub-diffs
//! - Operator-driven merge operations at shared-type, module and endpoint granularity
//! - Validation rules (missing names, naming convention, dangling references)
//! - The code generator boundary and a TypeScript declaration generator
//! - Error and logging facilities shared by the other crates

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod render;
pub mod rules;

#[doc(hidden)]
pub use apisync_core_types;

// Re-export commonly used types
pub use diff::{diff_data_sources, render_diff_summary, ChangeEntry, ChangeKind, DiffReport};
pub use errors::{ApiSyncError, ExError, ExErrorKind, Result};
pub use model::{DataSource, Endpoint, EndpointRef, Module, SharedType};
pub use ops::{MergeOutcome, MergeReport};
pub use render::{CodeGenerator, DeclarationGenerator, FileTree};

//! Schema diff engine.
//!
//! Compares a local and a remote data source name by name and produces
//! change entries an operator can accept at shared-type, module or endpoint
//! granularity.
//!
//! ```
//! use apisync_core::diff::{diff_data_sources, render_diff_summary};
//! use apisync_core::model::DataSource;
//!
//! let report = diff_data_sources(&DataSource::new("a"), &DataSource::new("a"));
//! assert!(report.is_empty());
//! println!("{}", render_diff_summary(&report));
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: output depends only on the two inputs; the engine never errors.
//! - **Completeness**: every name outside the unchanged intersection appears
//!   exactly once.
//! - **Determinism**: `Added*`, then `Removed*`, then `Modified*`, each in the
//!   order of its source collection.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{diff, diff_data_sources, diff_modules, diff_shared_types, DiffSubject};
pub use human_summary::render_diff_summary;
pub use model::{ChangeEntry, ChangeKind, DiffReport, EntityKind, Resolution};

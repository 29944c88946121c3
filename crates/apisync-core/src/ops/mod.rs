//! Operator-approved merges from a remote data source into a local one.
//!
//! Merges mutate only the local side and never re-run diffs.

pub mod merge_ops;

pub use merge_ops::{
    merge_endpoints, merge_module, merge_shared_type, replace_all, MergeOutcome, MergeReport,
    SkippedMerge,
};

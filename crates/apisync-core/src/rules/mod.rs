//! Validation rules run before generation and by the `check` command.

pub mod invariants;
pub mod validation;

pub use validation::{
    check_naming_convention, validate_path_names, validate_references, validate_sources,
};

//! Canonical schema model
//!
//! A [`DataSource`] owns its [`Module`]s and [`SharedType`]s; a module owns
//! its [`Endpoint`]s. Every collection is a [`NamedList`], so names are
//! unique per owner and lookups go through the name index.

pub mod data_source;
pub mod data_type;
pub mod endpoint;
pub mod endpoint_ref;
pub mod module;
pub mod named_list;
pub mod shared_type;

pub use data_source::DataSource;
pub use data_type::DataType;
pub use endpoint::{Endpoint, HttpMethod, ParamLocation, Parameter};
pub use endpoint_ref::EndpointRef;
pub use module::Module;
pub use named_list::{Named, NamedList};
pub use shared_type::{Property, SharedType};

//! Core types shared across apisync crates
//!
//! Foundational types used by the error and logging facilities:
//!
//! - **Correlation**: `SessionId` tags every log line emitted by one
//!   reconciliation session
//! - **Sensitive data**: `Sensitive<T>` keeps origin tokens out of logs
//! - **Schema constants**: canonical structured-logging field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::SessionId;
pub use sensitive::Sensitive;

//! Canonical schema constants for structured logging and events
//!
//! Every log line emitted through the `log_op_*` macros uses these keys.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_SESSION_ID: &str = "session_id";

// Entity identifiers
pub const FIELD_DATA_SOURCE: &str = "data_source";
pub const FIELD_MODULE: &str = "module";
pub const FIELD_ENDPOINT: &str = "endpoint";
pub const FIELD_SHARED_TYPE: &str = "shared_type";

// Collection sizes
pub const FIELD_MODULE_COUNT: &str = "module_count";
pub const FIELD_SHARED_TYPE_COUNT: &str = "shared_type_count";
pub const FIELD_CHANGE_COUNT: &str = "change_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

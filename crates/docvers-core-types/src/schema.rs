//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between the core, the engine
//! layer and anything that asserts on captured log output.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Versioning context
pub const FIELD_VERSION: &str = "version";
pub const FIELD_ENTITY_KEY: &str = "entity_key";
pub const FIELD_DESTINATION: &str = "destination";

// Collection sizes
pub const FIELD_VERSION_COUNT: &str = "version_count";
pub const FIELD_OUTPUT_COUNT: &str = "output_count";
pub const FIELD_ENTRY_COUNT: &str = "entry_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_DETAIL: &str = "err_detail";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

//! Command orchestration layer.
//!
//! Each command loads its inputs through [`crate::config`], runs the pure
//! core operation and reports the outcome.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The core uses only `tracing::debug!()`/`tracing::warn!()` for internal details.

pub mod changelog;
pub mod expand;

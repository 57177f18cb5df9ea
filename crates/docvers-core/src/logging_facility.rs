//! Structured logging facility for docvers
//!
//! - Single initialization point via `init(profile)`
//! - Boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! The engine layer owns start/end boundary events. Core algorithms only emit
//! `tracing::debug!` for version steps and `tracing::warn!` for identity key
//! collisions.
//!
//! # Usage
//!
//! ```rust
//! use docvers_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

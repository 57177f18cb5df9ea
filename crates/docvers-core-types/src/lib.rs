//! Core types shared across docvers facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! logging facility in `docvers-core` and by every layer that emits or
//! asserts on structured log events.

pub mod schema;

//! Changelog indexer.
//!
//! Turns raw per-version API content into a per-version list of what was
//! added, updated, deprecated or removed.
//!
//! ## Entry point
//!
//! ```ignore
//! use docvers_core::changelog::build_changelog_report;
//!
//! let report = build_changelog_report(&versions, &per_version, &ctx);
//! let summary = docvers_core::changelog::render_changelog_summary(&report);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical reports; indexes are
//!   ordered maps keyed by structural [`crate::identity::EntityKey`]s.
//! - **One mark per subtree**: only the outermost entity of a newly added
//!   subtree is tagged `added`.
//! - **Retained tags once**: a retained tag such as `deprecated` is reported
//!   in the version that introduced it, not in every later one.

pub mod engine;
pub mod human_summary;
pub mod index;
pub mod model;

pub use engine::{build_changelog, build_changelog_report};
pub use human_summary::render_changelog_summary;
pub use index::{ApiEntry, ApiMap};
pub use model::{ChangelogEntry, ChangelogItem, VersionChangelog};

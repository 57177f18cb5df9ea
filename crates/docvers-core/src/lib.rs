//! docvers Core - versioned documentation merge and changelog engine
//!
//! This crate holds the pure, I/O-free kernel:
//! - the entity tree model and lifecycle tags
//! - identity resolution over structural key paths
//! - the tree merge engine and the tag lifecycle filter
//! - the version sequencer, which expands one document into one per version
//! - the changelog indexer and the organised-entity sorter
//! - the error and logging facilities shared with the engine layer

pub mod changelog;
pub mod context;
pub mod errors;
pub mod identity;
pub mod lifecycle;
pub mod logging_facility;
pub mod merge;
pub mod model;
pub mod options;
pub mod organise;
pub mod sequencer;

pub use docvers_core_types as core_types;

// Re-export commonly used types
pub use changelog::{build_changelog, build_changelog_report, VersionChangelog};
pub use context::VersionContext;
pub use errors::{DocversError, ExError, ExErrorKind, Result};
pub use identity::{EntityKey, EntityMatcher, KeySegment, SignatureMatcher};
pub use lifecycle::strip_tags;
pub use merge::merge;
pub use model::{Document, DocumentWarning, Entity, Node, Tag, TagTable};
pub use options::VersionOptions;
pub use organise::{organise, OrganiseOptions};
pub use sequencer::{expand, expand_versions, FilenameModifier, VersionDirectory};

//! Versioning options.
//!
//! [`VersionOptions`] is the serde-facing configuration record; it is loaded
//! by the engine layer from TOML or JSON and resolved once into a
//! [`crate::context::VersionContext`] before any merging happens. Keys use
//! camelCase in files (`targetVersions`, `outputLatest`, ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{builtin_tags, TagSpec};

/// Entity types eligible for lifecycle tags by default
pub const DEFAULT_TAGGABLE: &[&str] = &[
    "function",
    "method",
    "property",
    "property?",
    "prototype",
    "object",
    "class",
    "constructor",
    "event",
    "entity",
    "typedef",
    "param",
    "param?",
];

/// Transparent container types by default
pub const DEFAULT_INDEXABLE: &[&str] = &["api", "group"];

/// Types whose content replaces rather than merges by default
pub const DEFAULT_UNMERGEABLE: &[&str] = &["description", "extra", "default"];

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Options controlling version expansion and changelog generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionOptions {
    /// Entity types eligible for lifecycle tags
    pub taggable: Vec<String>,
    /// Transparent container types, recursed through but never tagged
    pub indexable: Vec<String>,
    /// Types whose content replaces rather than merges
    pub unmergeable: Vec<String>,
    /// Tag configuration, layered over the built-in lifecycle tags
    pub tags: BTreeMap<String, TagSpec>,
    /// Explicit version sequence, oldest first; a `versionList` entity overrides it
    pub versions: Option<Vec<String>>,
    /// Versions to emit; `None` emits every version in the sequence
    pub target_versions: Option<Vec<String>>,
    /// Also emit the newest version at the document's own destination
    pub output_latest: bool,
    /// Show the newest changelog version first
    pub reverse_visible_list: bool,
    /// Never attach documentation links to changelog items
    pub dont_add_docs_link: bool,
    /// Documentation page for changelog links; `{version}` is substituted
    pub docs_url: Option<String>,
}

impl Default for VersionOptions {
    fn default() -> Self {
        Self {
            taggable: to_owned_list(DEFAULT_TAGGABLE),
            indexable: to_owned_list(DEFAULT_INDEXABLE),
            unmergeable: to_owned_list(DEFAULT_UNMERGEABLE),
            tags: builtin_tags(),
            versions: None,
            target_versions: None,
            output_latest: false,
            reverse_visible_list: false,
            dont_add_docs_link: false,
            docs_url: None,
        }
    }
}

impl VersionOptions {
    /// True if entities of this type receive lifecycle tags
    pub fn is_taggable(&self, kind: &str) -> bool {
        self.taggable.iter().any(|t| t == kind)
    }

    /// True if entities of this type are transparent containers
    pub fn is_indexable(&self, kind: &str) -> bool {
        self.indexable.iter().any(|t| t == kind)
    }

    /// True if entities of this type are replaced wholesale on merge
    pub fn is_unmergeable(&self, kind: &str) -> bool {
        self.unmergeable.iter().any(|t| t == kind)
    }

    /// Builder: set the explicit version sequence
    pub fn with_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.versions = Some(versions.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: restrict emission to the given versions
    pub fn with_target_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_versions = Some(versions.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = VersionOptions::default();

        assert!(options.is_taggable("function"));
        assert!(options.is_taggable("param?"));
        assert!(options.is_indexable("group"));
        assert!(options.is_unmergeable("description"));
        assert!(!options.is_taggable("description"));
        assert_eq!(options.tags.len(), 4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options: VersionOptions = serde_json::from_value(json!({
            "versions": ["1.0.0", "1.1.0"],
            "outputLatest": true,
            "tags": {"bugfix": {"order": 7}}
        }))
        .unwrap();

        assert_eq!(
            options.versions,
            Some(vec!["1.0.0".to_string(), "1.1.0".to_string()])
        );
        assert!(options.output_latest);
        assert!(options.is_taggable("method"));
        assert_eq!(options.tags["bugfix"].order, 7);
        assert!(!options.tags["bugfix"].retain);
    }

    #[test]
    fn test_builders() {
        let options = VersionOptions::default()
            .with_versions(["1.0.0", "2.0.0"])
            .with_target_versions(["2.0.0"]);

        assert_eq!(options.versions.as_ref().map(Vec::len), Some(2));
        assert_eq!(options.target_versions, Some(vec!["2.0.0".to_string()]));
    }
}

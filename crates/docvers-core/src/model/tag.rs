//! Lifecycle and domain tags.
//!
//! Tags are ordinary zero-content entities whose type matches a configured
//! tag name. [`Tag`] names the four lifecycle tags the engine reasons about;
//! everything else a configuration registers is [`Tag::Custom`]. A
//! [`TagTable`] is built once from configuration and answers every retention,
//! removal and ordering question afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::entity::{Entity, Node};

/// A tag entity type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Added,
    Updated,
    Deprecated,
    Removed,
    /// A domain tag registered by configuration (e.g. `bugfix`)
    Custom(String),
}

impl Tag {
    /// Lifecycle tags in presentation priority order
    pub const LIFECYCLE: [Tag; 4] = [Tag::Added, Tag::Updated, Tag::Deprecated, Tag::Removed];

    /// The entity type used for this tag
    pub fn name(&self) -> &str {
        match self {
            Tag::Added => "added",
            Tag::Updated => "updated",
            Tag::Deprecated => "deprecated",
            Tag::Removed => "removed",
            Tag::Custom(name) => name,
        }
    }

    /// Map an entity type to a tag; unknown names become [`Tag::Custom`]
    pub fn from_name(name: &str) -> Self {
        match name {
            "added" => Tag::Added,
            "updated" => Tag::Updated,
            "deprecated" => Tag::Deprecated,
            "removed" => Tag::Removed,
            other => Tag::Custom(other.to_string()),
        }
    }

    /// The zero-content entity representing this tag
    pub fn to_entity(&self) -> Entity {
        Entity::new(self.name())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-tag configuration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TagSpec {
    /// Survive the strip pass at the next version boundary
    pub retain: bool,
    /// An entity carrying this tag is deleted (with its subtree) at the next boundary
    pub remove_entity: bool,
    /// Display order; lower sorts first
    pub order: i32,
    /// Optional icon name for renderers
    pub icon: Option<String>,
}

impl Default for TagSpec {
    fn default() -> Self {
        Self {
            retain: false,
            remove_entity: false,
            order: 100,
            icon: None,
        }
    }
}

impl TagSpec {
    fn with(retain: bool, remove_entity: bool, order: i32) -> Self {
        Self {
            retain,
            remove_entity,
            order,
            icon: None,
        }
    }
}

/// The built-in lifecycle tag configuration
///
/// `deprecated` is retained until a `removed` tag appears; the other three
/// last for exactly one version.
pub fn builtin_tags() -> BTreeMap<String, TagSpec> {
    BTreeMap::from([
        ("added".to_string(), TagSpec::with(false, false, 1)),
        ("updated".to_string(), TagSpec::with(false, false, 2)),
        ("deprecated".to_string(), TagSpec::with(true, false, 3)),
        ("removed".to_string(), TagSpec::with(false, true, 4)),
    ])
}

/// Lookup table over every configured tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTable {
    specs: BTreeMap<String, TagSpec>,
}

impl Default for TagTable {
    fn default() -> Self {
        Self {
            specs: builtin_tags(),
        }
    }
}

impl TagTable {
    /// Build a table from user tag configuration layered over the built-in tags
    pub fn new(configured: &BTreeMap<String, TagSpec>) -> Self {
        let mut specs = builtin_tags();
        specs.extend(configured.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { specs }
    }

    /// Configuration for a tag, if registered
    pub fn spec(&self, tag: &Tag) -> Option<&TagSpec> {
        self.specs.get(tag.name())
    }

    /// True if the entity type is a registered tag
    pub fn is_tag_kind(&self, kind: &str) -> bool {
        self.specs.contains_key(kind)
    }

    /// True if the tag type is dropped by the strip pass
    pub fn is_removable(&self, kind: &str) -> bool {
        self.specs.get(kind).is_some_and(|spec| !spec.retain)
    }

    /// Names of every tag dropped by the strip pass
    pub fn removable_tag_names(&self) -> Vec<&str> {
        self.specs
            .iter()
            .filter(|(_, spec)| !spec.retain)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Display order of a tag; unregistered tags sort last
    pub fn order(&self, tag: &Tag) -> i32 {
        self.spec(tag).map_or(i32::MAX, |spec| spec.order)
    }

    /// Registered tags carried directly by the entity, in content order
    pub fn tags_of(&self, entity: &Entity) -> Vec<Tag> {
        entity
            .children()
            .filter(|child| self.is_tag_kind(&child.kind))
            .map(|child| Tag::from_name(&child.kind))
            .collect()
    }

    /// True if the entity carries a tag whose configuration deletes the entity
    pub fn carries_removal(&self, entity: &Entity) -> bool {
        entity.children().any(|child| {
            self.specs
                .get(&child.kind)
                .is_some_and(|spec| spec.remove_entity)
        })
    }

    /// True if the node is a tag entity
    pub fn is_tag_node(&self, node: &Node) -> bool {
        node.as_entity()
            .is_some_and(|entity| self.is_tag_kind(&entity.kind))
    }
}

impl Entity {
    /// True if the entity directly carries the tag
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.has_child_kind(tag.name())
    }

    /// Append the tag unless already present
    pub fn add_tag(&mut self, tag: &Tag) {
        self.push_marker(tag.name());
    }

    /// Remove every occurrence of the tag
    pub fn remove_tag(&mut self, tag: &Tag) {
        self.remove_children_of_kind(tag.name());
    }
}

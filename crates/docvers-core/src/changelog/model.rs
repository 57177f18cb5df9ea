//! Changelog report types.
//!
//! The engine produces a typed report first; [`VersionChangelog::to_entity`]
//! converts it into the entity form renderers consume:
//! `changelog(version)` > `item(name)` > `entry(kind, label)`.

use serde::{Deserialize, Serialize};

use crate::model::{Entity, Node, Tag};
use crate::organise::{Bucket, Organisable};

/// Entity type of a per-version changelog
pub const CHANGELOG_KIND: &str = "changelog";
/// Entity type of one top-level API item
pub const ITEM_KIND: &str = "item";
/// Entity type of one changed element below an item
pub const ENTRY_KIND: &str = "entry";
/// Entity type carrying a documentation deep link
pub const LINK_KIND: &str = "link";

/// Everything that changed in one version
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersionChangelog {
    pub version: String,
    pub items: Vec<ChangelogItem>,
}

/// Changes below one top-level API name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangelogItem {
    /// Display name of the top-level entity
    pub name: String,
    /// Entity type of the top-level entity
    pub kind: String,
    /// Tags new at this version on the top-level entity itself
    pub tags: Vec<String>,
    /// Documentation deep link, if configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Changed elements, sorted by tag order
    pub entries: Vec<ChangelogEntry>,
}

/// One changed element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangelogEntry {
    pub kind: String,
    /// Label relative to the item, e.g. `get(x)` or `Inner.set(value)`
    pub label: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Entity>,
}

impl VersionChangelog {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_entity(&self) -> Entity {
        Entity::new(CHANGELOG_KIND)
            .param(self.version.as_str())
            .with_content(
                self.items
                    .iter()
                    .map(|item| Node::Entity(item.to_entity()))
                    .collect(),
            )
    }
}

impl ChangelogItem {
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t == tag.name())
    }

    pub fn to_entity(&self) -> Entity {
        let mut item = tagged(Entity::new(ITEM_KIND).param(self.name.as_str()), &self.tags);
        if let Some(url) = &self.link {
            item = item.child(Entity::new(LINK_KIND).param(url.as_str()));
        }
        self.entries
            .iter()
            .fold(item, |item, entry| item.child(entry.to_entity()))
    }
}

impl ChangelogEntry {
    pub fn to_entity(&self) -> Entity {
        let entry = tagged(
            Entity::new(ENTRY_KIND)
                .param(self.kind.as_str())
                .param(self.label.as_str()),
            &self.tags,
        );
        match &self.description {
            Some(description) => entry.child(description.clone()),
            None => entry,
        }
    }
}

fn tagged(entity: Entity, tags: &[String]) -> Entity {
    tags.iter()
        .fold(entity, |entity, tag| entity.child(Entity::new(tag.as_str())))
}

impl Organisable for ChangelogItem {
    fn bucket(&self) -> Bucket {
        Bucket::classify(|tag| self.has_tag(tag))
    }

    fn sort_name(&self) -> &str {
        &self.name
    }
}

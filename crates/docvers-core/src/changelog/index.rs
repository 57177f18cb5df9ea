//! Flat, keyed view of an API tree.
//!
//! Each taggable entity becomes one [`ApiEntry`] keyed by its full
//! [`EntityKey`]. Indexable containers are recursed through without
//! contributing a key segment. Entries hold a shallow copy of the entity:
//! taggable and indexable children are indexed on their own and are not part
//! of the parent's entry.

use sha2::{Digest, Sha256};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::context::VersionContext;
use crate::identity::EntityKey;
use crate::lifecycle::strip_tags;
use crate::model::{Entity, Node, TagTable};

/// Entity type whose content is compared for `updated` detection
pub const DESCRIPTION_KIND: &str = "description";

/// One indexed entity
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEntry {
    /// The entity without its taggable and indexable children
    pub entity: Entity,
    /// Key of the nearest taggable ancestor
    pub parent_key: Option<EntityKey>,
    /// True for top-level API names (no taggable ancestor)
    pub root_entity: bool,
    /// SHA-256 over the description and the text content
    pub fingerprint: String,
}

impl ApiEntry {
    fn new(entity: &Entity, parent_key: Option<EntityKey>, ctx: &VersionContext<'_>) -> Self {
        let shallow = Entity {
            kind: entity.kind.clone(),
            params: entity.params.clone(),
            content: entity
                .content
                .iter()
                .filter(|node| match node {
                    Node::Entity(child) => {
                        !(ctx.is_taggable(&child.kind) || ctx.is_indexable(&child.kind))
                    }
                    Node::Text(_) => true,
                })
                .cloned()
                .collect(),
        };
        Self {
            fingerprint: fingerprint(&shallow),
            root_entity: parent_key.is_none(),
            parent_key,
            entity: shallow,
        }
    }

    /// The entity's `description` child, if any
    pub fn description(&self) -> Option<&Entity> {
        self.entity.children_of_kind(DESCRIPTION_KIND).next()
    }
}

/// Keyed entries, ordered so that every parent precedes its descendants
pub type ApiMap = BTreeMap<EntityKey, ApiEntry>;

/// Hex SHA-256 of the canonical JSON `[description, text]`
pub fn fingerprint(entity: &Entity) -> String {
    let description = entity.children_of_kind(DESCRIPTION_KIND).next();
    let canonical = serde_json::json!([description, entity.text_content()]);
    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Flatten one version's content into an [`ApiMap`]
pub fn index_content(content: &[Node], ctx: &VersionContext<'_>) -> ApiMap {
    let mut map = ApiMap::new();
    index_level(content, &EntityKey::root(), None, ctx, &mut map);
    map
}

fn index_level(
    content: &[Node],
    ancestors: &EntityKey,
    parent: Option<&EntityKey>,
    ctx: &VersionContext<'_>,
    map: &mut ApiMap,
) {
    for entity in content.iter().filter_map(Node::as_entity) {
        if ctx.is_indexable(&entity.kind) {
            index_level(&entity.content, ancestors, parent, ctx, map);
            continue;
        }
        if !ctx.is_taggable(&entity.kind) {
            continue;
        }
        let Some(segment) = ctx.segment(entity) else {
            continue;
        };
        let key = ancestors.child(segment);
        match map.entry(key.clone()) {
            Entry::Occupied(_) => {
                tracing::warn!(
                    entity_key = %key,
                    "identity key collision in API index; keeping the first occurrence"
                );
                continue;
            }
            Entry::Vacant(slot) => {
                slot.insert(ApiEntry::new(entity, parent.cloned(), ctx));
            }
        }
        index_level(&entity.content, &key, Some(&key), ctx, map);
    }
}

/// The previous cumulative map as it stands at the start of the next version
///
/// Entries carrying a removal tag are dropped, and so is everything whose
/// parent was dropped. Non-retained tags are stripped from the survivors.
pub fn carry_forward(previous: &ApiMap, tags: &TagTable) -> ApiMap {
    let mut kept = ApiMap::new();
    for (key, entry) in previous {
        if entry
            .parent_key
            .as_ref()
            .is_some_and(|parent| !kept.contains_key(parent))
        {
            continue;
        }
        if tags.carries_removal(&entry.entity) {
            continue;
        }
        let mut entry = entry.clone();
        entry.entity.content = strip_tags(&entry.entity.content, tags);
        kept.insert(key.clone(), entry);
    }
    kept
}

//! Tree merge engine.
//!
//! Merges the content of a newer version on top of the cumulative content of
//! everything before it. The merge is pure: both inputs are borrowed and the
//! result is built bottom-up from matched and unmatched children.
//!
//! ## Rules
//!
//! 1. Meaningful text in the newer content replaces the older content at that
//!    level outright; only entity children are diffed.
//! 2. Older entities are indexed by sibling key (see [`crate::identity`]).
//! 3. A newer entity with a match is merged into it recursively, or replaces
//!    its content wholesale if its type is unmergeable. A taggable entity
//!    whose own surface changed is tagged `updated`, unless either side is
//!    `deprecated` or `removed`. `removed` always wins over `deprecated`.
//! 4. A newer entity without a match is appended. Taggable entities are
//!    tagged `added`; indexable containers pass the tag through to their
//!    taggable children instead of being tagged themselves.
//!
//! Entities absent from the newer content are carried forward unchanged:
//! the merge only adds, it never drops. Removal is authored with a `removed`
//! tag and applied by [`crate::lifecycle::strip_tags`] at the next boundary.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::context::VersionContext;
use crate::identity::{sibling_key, KeySegment};
use crate::model::{Entity, Node, Tag};

/// Merge `new` on top of `old`, returning the combined content
pub fn merge(old: &[Node], new: &[Node], ctx: &VersionContext<'_>) -> Vec<Node> {
    if new.iter().any(Node::is_meaningful_text) {
        return new.to_vec();
    }

    let index = index_siblings(old, ctx);

    let mut updates: BTreeMap<usize, Vec<&Entity>> = BTreeMap::new();
    let mut appended: Vec<Node> = Vec::new();
    for incoming in new.iter().filter_map(Node::as_entity) {
        match ctx
            .segment(incoming)
            .and_then(|segment| index.get(&segment).copied())
        {
            Some(position) => updates.entry(position).or_default().push(incoming),
            None => appended.push(Node::Entity(tag_unmatched(incoming.clone(), ctx))),
        }
    }

    old.iter()
        .enumerate()
        .map(|(position, node)| match (node, updates.get(&position)) {
            (Node::Entity(existing), Some(incoming)) => Node::Entity(
                incoming
                    .iter()
                    .fold(existing.clone(), |acc, newer| merge_matched(&acc, newer, ctx)),
            ),
            _ => node.clone(),
        })
        .chain(appended)
        .collect()
}

/// Index entity siblings by key; on collision the first occurrence wins
fn index_siblings(content: &[Node], ctx: &VersionContext<'_>) -> HashMap<KeySegment, usize> {
    let mut index = HashMap::new();
    for (position, node) in content.iter().enumerate() {
        let Some(segment) = sibling_key(node, ctx.matcher()) else {
            continue;
        };
        match index.entry(segment) {
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
            Entry::Occupied(slot) => {
                tracing::warn!(
                    entity_key = %slot.key(),
                    "identity key collision among siblings; matching the first occurrence"
                );
            }
        }
    }
    index
}

fn merge_matched(existing: &Entity, incoming: &Entity, ctx: &VersionContext<'_>) -> Entity {
    let content = if ctx.is_unmergeable(&incoming.kind) {
        incoming.content.clone()
    } else {
        merge(&existing.content, &incoming.content, ctx)
    };
    let params = if incoming.params.is_empty() {
        existing.params.clone()
    } else {
        incoming.params.clone()
    };
    let mut merged = Entity {
        kind: existing.kind.clone(),
        params,
        content,
    };

    if ctx.is_taggable(&incoming.kind)
        && !is_settled(existing)
        && !is_settled(incoming)
        && !merged.has_tag(&Tag::Added)
        && own_surface(existing, ctx) != own_surface(&merged, ctx)
    {
        merged.add_tag(&Tag::Updated);
    }

    if merged.has_tag(&Tag::Removed) && merged.has_tag(&Tag::Deprecated) {
        merged.remove_tag(&Tag::Deprecated);
    }

    merged
}

/// Deprecated or removed entities are never marked updated
fn is_settled(entity: &Entity) -> bool {
    entity.has_tag(&Tag::Removed) || entity.has_tag(&Tag::Deprecated)
}

/// The parts of an entity that belong to it rather than to tagged descendants:
/// its params, text and non-taggable, non-tag children
fn own_surface<'e>(entity: &'e Entity, ctx: &VersionContext<'_>) -> (&'e [String], Vec<&'e Node>) {
    let nodes = entity
        .content
        .iter()
        .filter(|node| match node {
            Node::Text(text) => !text.trim().is_empty(),
            Node::Entity(child) => {
                !(ctx.tags().is_tag_kind(&child.kind)
                    || ctx.is_taggable(&child.kind)
                    || ctx.is_indexable(&child.kind))
            }
        })
        .collect();
    (&entity.params, nodes)
}

fn tag_unmatched(mut entity: Entity, ctx: &VersionContext<'_>) -> Entity {
    if ctx.is_taggable(&entity.kind) {
        if !ctx.tags().carries_removal(&entity) {
            entity.add_tag(&Tag::Added);
        }
    } else if ctx.is_indexable(&entity.kind) {
        entity.content = entity
            .content
            .into_iter()
            .map(|node| match node {
                Node::Entity(child)
                    if ctx.is_taggable(&child.kind) || ctx.is_indexable(&child.kind) =>
                {
                    Node::Entity(tag_unmatched(child, ctx))
                }
                other => other,
            })
            .collect();
    }
    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::VersionOptions;

    fn function(name: &str) -> Entity {
        Entity::new("function").param(name)
    }

    fn described(kind: &str, name: &str, description: &str) -> Entity {
        Entity::new(kind)
            .param(name)
            .child(Entity::new("description").child(description))
    }

    fn names(content: &[Node]) -> Vec<&str> {
        content
            .iter()
            .filter_map(Node::as_entity)
            .filter_map(Entity::name)
            .collect()
    }

    fn find<'a>(content: &'a [Node], name: &str) -> &'a Entity {
        content
            .iter()
            .filter_map(Node::as_entity)
            .find(|e| e.name() == Some(name))
            .unwrap()
    }

    #[test]
    fn test_meaningful_text_replaces_old_content() {
        let options = VersionOptions::default();
        let ctx = VersionContext::new(&options);
        let old = vec![Node::text("old words"), Node::Entity(function("foo"))];
        let new = vec![Node::text("new words")];

        assert_eq!(merge(&old, &new, &ctx), new);
    }

    #[test]
    fn test_whitespace_text_does_not_replace() {
        let options = VersionOptions::default();
        let ctx = VersionContext::new(&options);
        let old = vec![Node::Entity(function("foo"))];
        let new = vec![Node::text("\n  "), Node::Entity(function("bar"))];

        assert_eq!(names(&merge(&old, &new, &ctx)), vec!["foo", "bar"]);
    }

    #[test]
    fn test_matched_unchanged_untagged_new_added_missing_kept() {
        let options = VersionOptions::default();
        let ctx = VersionContext::new(&options);
        let old = vec![Node::Entity(function("foo")), Node::Entity(function("bar"))];
        let new = vec![Node::Entity(function("foo")), Node::Entity(function("baz"))];

        let merged = merge(&old, &new, &ctx);

        assert_eq!(names(&merged), vec!["foo", "bar", "baz"]);
        assert!(find(&merged, "foo").content.is_empty());
        assert!(find(&merged, "bar").content.is_empty());
        assert!(find(&merged, "baz").has_tag(&Tag::Added));
    }

    #[test]
    fn test_unmergeable_description_replaced_and_updated() {
        let options = VersionOptions::default();
        let ctx = VersionContext::new(&options);
        let old = vec![Node::Entity(described("method", "get", "Gets x"))];
        let new = vec![Node::Entity(described("method", "get", "Gets the value of x"))];

        let merged = merge(&old, &new, &ctx);
        let get = find(&merged, "get");

        assert!(get.has_tag(&Tag::Updated));
        let description = get.children_of_kind("description").next().unwrap();
        assert_eq!(description.text_content(), "Gets the value of x");
    }

    #[test]
    fn test_added_child_does_not_mark_parent_updated() {
        let options = VersionOptions::default();
        let ctx = VersionContext::new(&options);
        let old = vec![Node::Entity(
            Entity::new("object").param("Widget").child(Entity::new("method").param("get")),
        )];
        let new = vec![Node::Entity(
            Entity::new("object").param("Widget").child(Entity::new("method").param("set")),
        )];

        let merged = merge(&old, &new, &ctx);
        let widget = find(&merged, "Widget");

        assert!(!widget.has_tag(&Tag::Updated));
        assert!(find(&widget.content, "set").has_tag(&Tag::Added));
        assert!(!find(&widget.content, "get").has_tag(&Tag::Added));
    }

    #[test]
    fn test_indexable_container_passes_added_through() {
        let options = VersionOptions::default();
        let ctx = VersionContext::new(&options);
        let group = Entity::new("group")
            .param("Helpers")
            .child(function("a"))
            .child(Entity::new("group").child(function("b")))
            .child(Entity::new("description").child("helpers"));

        let merged = merge(&[], &[Node::Entity(group)], &ctx);
        let group = merged[0].as_entity().unwrap();

        assert!(!group.has_tag(&Tag::Added));
        assert!(find(&group.content, "a").has_tag(&Tag::Added));
        let inner = group.children_of_kind("group").next().unwrap();
        assert!(find(&inner.content, "b").has_tag(&Tag::Added));
        assert!(!group
            .children_of_kind("description")
            .next()
            .unwrap()
            .has_tag(&Tag::Added));
    }

    #[test]
    fn test_removed_dominates_deprecated() {
        let options = VersionOptions::default();
        let ctx = VersionContext::new(&options);
        let old = vec![Node::Entity(function("old").child(Tag::Deprecated.to_entity()))];
        let new = vec![Node::Entity(function("old").child(Tag::Removed.to_entity()))];

        let merged = merge(&old, &new, &ctx);
        let entity = find(&merged, "old");

        assert!(entity.has_tag(&Tag::Removed));
        assert!(!entity.has_tag(&Tag::Deprecated));
        assert!(!entity.has_tag(&Tag::Updated));
    }

    #[test]
    fn test_deprecated_entity_not_marked_updated() {
        let options = VersionOptions::default();
        let ctx = VersionContext::new(&options);
        let old = vec![Node::Entity(described("function", "f", "one"))];
        let new = vec![Node::Entity(
            described("function", "f", "two").child(Tag::Deprecated.to_entity()),
        )];

        let merged = merge(&old, &new, &ctx);
        let f = find(&merged, "f");

        assert!(f.has_tag(&Tag::Deprecated));
        assert!(!f.has_tag(&Tag::Updated));
    }

    #[test]
    fn test_overloads_are_distinct() {
        let options = VersionOptions::default();
        let ctx = VersionContext::new(&options);
        let one = Entity::new("method")
            .param("get")
            .child(Entity::new("param").param("x"));
        let two = one.clone().child(Entity::new("param").param("y"));

        let merged = merge(&[Node::Entity(one)], &[Node::Entity(two)], &ctx);

        assert_eq!(merged.len(), 2);
        assert!(!merged[0].as_entity().unwrap().has_tag(&Tag::Added));
        assert!(merged[1].as_entity().unwrap().has_tag(&Tag::Added));
    }

    #[test]
    fn test_sibling_collision_matches_first_occurrence() {
        let options = VersionOptions::default();
        let ctx = VersionContext::new(&options);
        let old = vec![
            Node::Entity(described("function", "dup", "first")),
            Node::Entity(described("function", "dup", "second")),
        ];
        let new = vec![Node::Entity(described("function", "dup", "third"))];

        let merged = merge(&old, &new, &ctx);

        assert_eq!(merged.len(), 2);
        assert!(merged[0].as_entity().unwrap().has_tag(&Tag::Updated));
        assert_eq!(merged[1], old[1]);
    }

    #[test]
    fn test_custom_matcher_is_used() {
        let options = VersionOptions::default();
        let by_type = |e: &Entity| Some(KeySegment::new(e.kind.clone(), ""));
        let ctx = VersionContext::new(&options).with_matcher(&by_type);

        let merged = merge(
            &[Node::Entity(function("a"))],
            &[Node::Entity(function("b"))],
            &ctx,
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].as_entity().and_then(Entity::name), Some("b"));
        assert!(merged[0].as_entity().unwrap().has_tag(&Tag::Updated));
    }
}

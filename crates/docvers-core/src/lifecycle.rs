//! Tag lifecycle filter.
//!
//! Runs once at every version boundary, before the next version is merged on
//! top of the cumulative tree:
//!
//! - an entity carrying a removal tag (`removed`, or any tag configured with
//!   `removeEntity`) is dropped together with its whole subtree;
//! - every tag that is not configured `retain` is dropped, the tagged entity
//!   is kept.
//!
//! The filter is pure and idempotent: `strip_tags(strip_tags(t)) == strip_tags(t)`.

use crate::model::{Node, TagTable};

/// Return `content` with removed entities and non-retained tags filtered out
pub fn strip_tags(content: &[Node], tags: &TagTable) -> Vec<Node> {
    content
        .iter()
        .filter_map(|node| match node {
            Node::Text(_) => Some(node.clone()),
            Node::Entity(entity) if tags.is_tag_kind(&entity.kind) => {
                (!tags.is_removable(&entity.kind)).then(|| node.clone())
            }
            Node::Entity(entity) if tags.carries_removal(entity) => None,
            Node::Entity(entity) => {
                let mut kept = entity.clone();
                kept.content = strip_tags(&entity.content, tags);
                Some(Node::Entity(kept))
            }
        })
        .collect()
}

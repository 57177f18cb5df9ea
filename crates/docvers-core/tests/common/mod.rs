use docvers_core::{Document, Entity, Node};
use serde_json::{json, Value};

/// Parse a JSON fixture into content nodes
#[allow(dead_code)]
pub fn nodes(value: Value) -> Vec<Node> {
    serde_json::from_value(value).unwrap()
}

/// Parse a JSON fixture into a single entity
#[allow(dead_code)]
pub fn entity(value: Value) -> Entity {
    serde_json::from_value(value).unwrap()
}

/// Owned version names
#[allow(dead_code)]
pub fn versions(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Entity children of `content` with the given name
#[allow(dead_code)]
pub fn find<'a>(content: &'a [Node], name: &str) -> Option<&'a Entity> {
    content
        .iter()
        .filter_map(Node::as_entity)
        .find(|e| e.name() == Some(name))
}

/// Names of the entity children of `content`, in order
#[allow(dead_code)]
pub fn names(content: &[Node]) -> Vec<String> {
    content
        .iter()
        .filter_map(Node::as_entity)
        .filter_map(Entity::name)
        .map(str::to_string)
        .collect()
}

/// A widget API page spanning three versions:
/// 1.0.0 adds `foo` and `bar`, 1.1.0 re-declares `foo` and adds `baz`,
/// 2.0.0 removes `bar`
#[allow(dead_code)]
pub fn widget_document() -> Document {
    Document::new(
        "docs/api.html",
        nodes(json!([
            {"type": "title", "content": ["Widget API"]},
            {"type": "versionList"},
            {"type": "version", "params": ["1.0.0"], "content": [
                {"type": "function", "params": ["foo"]},
                {"type": "function", "params": ["bar"]}
            ]},
            {"type": "version", "params": ["1.1.0"], "content": [
                {"type": "function", "params": ["foo"]},
                {"type": "function", "params": ["baz"]}
            ]},
            {"type": "version", "params": ["2.0.0"], "content": [
                {"type": "function", "params": ["bar"], "content": [{"type": "removed"}]}
            ]}
        ])),
    )
}

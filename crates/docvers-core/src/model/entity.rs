use serde::{Deserialize, Serialize};

/// A single node in a document tree: either opaque text or a nested entity
///
/// Serialized untagged so that the parser's JSON form maps directly:
/// a JSON string is [`Node::Text`], a JSON object is [`Node::Entity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Opaque text content
    Text(String),
    /// A typed, parameterized child node
    Entity(Entity),
}

impl Node {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Borrow the entity, if this node is one
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Node::Entity(entity) => Some(entity),
            Node::Text(_) => None,
        }
    }

    /// Borrow the text, if this node is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Entity(_) => None,
        }
    }

    /// True for text nodes holding something other than whitespace
    pub fn is_meaningful_text(&self) -> bool {
        matches!(self, Node::Text(text) if !text.trim().is_empty())
    }

    /// True if this node is an entity of the given type
    pub fn is_kind(&self, kind: &str) -> bool {
        matches!(self, Node::Entity(entity) if entity.kind == kind)
    }
}

impl From<Entity> for Node {
    fn from(entity: Entity) -> Self {
        Node::Entity(entity)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// A typed, parameterized tree node with ordered children
///
/// Entities never carry an identity field; identity is derived from type,
/// parameters and ancestry by [`crate::identity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity type, e.g. `function`, `param`, `description`, `added`
    #[serde(rename = "type")]
    pub kind: String,

    /// Ordered parameters; the first one is the display name
    #[serde(default)]
    pub params: Vec<String>,

    /// Ordered children
    #[serde(default)]
    pub content: Vec<Node>,
}

impl Entity {
    /// Create an entity of the given type with no params and no content
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Builder: append a parameter
    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Builder: append a child node
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.content.push(node.into());
        self
    }

    /// Builder: replace the content list
    pub fn with_content(mut self, content: Vec<Node>) -> Self {
        self.content = content;
        self
    }

    /// The display name (first parameter), if any
    pub fn name(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }

    /// Iterate over entity children, skipping text
    pub fn children(&self) -> impl Iterator<Item = &Entity> {
        self.content.iter().filter_map(Node::as_entity)
    }

    /// Iterate over entity children of one type
    pub fn children_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Entity> {
        self.children().filter(move |child| child.kind == kind)
    }

    /// True if any direct child entity has the given type
    pub fn has_child_kind(&self, kind: &str) -> bool {
        self.children_of_kind(kind).next().is_some()
    }

    /// Append a zero-content child of the given type unless one is present
    pub fn push_marker(&mut self, kind: &str) {
        if !self.has_child_kind(kind) {
            self.content.push(Node::Entity(Entity::new(kind)));
        }
    }

    /// Drop every direct child entity of the given type
    pub fn remove_children_of_kind(&mut self, kind: &str) {
        self.content.retain(|node| !node.is_kind(kind));
    }

    /// Direct text content, trimmed, with blank nodes skipped and the rest joined by newlines
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(Node::as_text)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_json_shape() {
        let entity = Entity::new("function")
            .param("foo")
            .child(Entity::new("description").child("Does foo"));

        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "function",
                "params": ["foo"],
                "content": [{"type": "description", "params": [], "content": ["Does foo"]}]
            })
        );
    }

    #[test]
    fn test_missing_params_and_content_default_to_empty() {
        let node: Node = serde_json::from_value(json!({"type": "added"})).unwrap();
        assert_eq!(node, Node::Entity(Entity::new("added")));
    }

    #[test]
    fn test_untagged_text_node() {
        let nodes: Vec<Node> = serde_json::from_value(json!(["hello", {"type": "x"}])).unwrap();
        assert_eq!(nodes[0].as_text(), Some("hello"));
        assert!(nodes[1].is_kind("x"));
    }

    #[test]
    fn test_meaningful_text_ignores_whitespace() {
        assert!(!Node::text("  \n\t").is_meaningful_text());
        assert!(Node::text(" a ").is_meaningful_text());
        assert!(!Node::Entity(Entity::new("x")).is_meaningful_text());
    }

    #[test]
    fn test_push_marker_is_idempotent() {
        let mut entity = Entity::new("function").param("foo");
        entity.push_marker("added");
        entity.push_marker("added");

        assert_eq!(entity.children_of_kind("added").count(), 1);

        entity.remove_children_of_kind("added");
        assert!(!entity.has_child_kind("added"));
    }

    #[test]
    fn test_text_content_joins_trimmed_text() {
        let entity = Entity::new("description")
            .child("  first ")
            .child(Entity::new("b").child("bold"))
            .child("   ")
            .child("second");

        assert_eq!(entity.text_content(), "first\nsecond");
    }
}

//! Identity resolution.
//!
//! Entities carry no identity field; "the same" entity across two versions is
//! recognised by a derived key. A [`KeySegment`] identifies an entity among
//! its siblings, and an [`EntityKey`] is the full path of segments from the
//! root, used where entities from different parents share one namespace
//! (the changelog index).
//!
//! Keys are compared structurally, so names containing separator characters
//! cannot collide with deeper paths.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{Entity, Node};

/// Parameter child types that contribute to an entity's signature
pub const SIGNATURE_PARAM_KINDS: &[&str] = &["param", "param?"];

/// Sibling-level identity: `type:name(signature)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeySegment {
    pub kind: String,
    pub name: String,
    pub signature: Vec<String>,
}

impl KeySegment {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            signature: Vec::new(),
        }
    }

    /// Builder: set the signature list
    pub fn with_signature(mut self, signature: Vec<String>) -> Self {
        self.signature = signature;
        self
    }

    /// Human label: `name` or `name(a, b)` when a signature exists
    pub fn label(&self) -> String {
        if self.signature.is_empty() {
            self.name.clone()
        } else {
            format!("{}({})", self.name, self.signature.join(", "))
        }
    }
}

impl fmt::Display for KeySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}({})",
            self.kind,
            self.name,
            self.signature.join(",")
        )
    }
}

/// Ancestor-chain identity: the segments from the outermost ancestor down
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    segments: Vec<KeySegment>,
}

impl EntityKey {
    /// The empty path (the document root)
    pub fn root() -> Self {
        Self::default()
    }

    /// A new key one level below this one
    pub fn child(&self, segment: KeySegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// The key one level up, or `None` at the root
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn segments(&self) -> &[KeySegment] {
        &self.segments
    }

    pub fn last(&self) -> Option<&KeySegment> {
        self.segments.last()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if `self` equals `ancestor` or lies below it
    pub fn starts_with(&self, ancestor: &EntityKey) -> bool {
        self.segments.starts_with(&ancestor.segments)
    }

    /// Link anchor: non-empty names joined with `.`
    pub fn anchor(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Display label relative to `base`: names below it joined with `.`,
    /// the last one with its signature
    pub fn label_below(&self, base: &EntityKey) -> String {
        let skip = if self.starts_with(base) && base.depth() < self.depth() {
            base.depth()
        } else {
            self.depth().saturating_sub(1)
        };
        let tail = &self.segments[skip..];
        let mut parts: Vec<String> = tail
            .iter()
            .take(tail.len().saturating_sub(1))
            .map(|s| s.name.clone())
            .collect();
        if let Some(last) = tail.last() {
            parts.push(last.label());
        }
        parts.join(".")
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.segments.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join(" > "))
    }
}

/// Computes the sibling-level identity of an entity
///
/// Implementations must be deterministic and should be injective over any
/// set of siblings; a collision makes two siblings indistinguishable to the
/// merge engine and the changelog index.
pub trait EntityMatcher {
    fn segment(&self, entity: &Entity) -> Option<KeySegment>;
}

impl<F> EntityMatcher for F
where
    F: Fn(&Entity) -> Option<KeySegment>,
{
    fn segment(&self, entity: &Entity) -> Option<KeySegment> {
        self(entity)
    }
}

/// Default matcher: type, first parameter and the names of `param`/`param?`
/// children, so overloads with different signatures stay distinct
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureMatcher;

impl EntityMatcher for SignatureMatcher {
    fn segment(&self, entity: &Entity) -> Option<KeySegment> {
        let signature = entity
            .children()
            .filter(|child| SIGNATURE_PARAM_KINDS.contains(&child.kind.as_str()))
            .map(|child| child.name().unwrap_or_default().to_string())
            .collect();
        Some(
            KeySegment::new(entity.kind.clone(), entity.name().unwrap_or_default())
                .with_signature(signature),
        )
    }
}

/// Sibling-level key of a node; text nodes are unmatchable
pub fn sibling_key(node: &Node, matcher: &dyn EntityMatcher) -> Option<KeySegment> {
    match node {
        Node::Entity(entity) => matcher.segment(entity),
        Node::Text(_) => None,
    }
}

/// Full key of a node below `ancestors`; text nodes are unmatchable
pub fn key(node: &Node, ancestors: &EntityKey, matcher: &dyn EntityMatcher) -> Option<EntityKey> {
    sibling_key(node, matcher).map(|segment| ancestors.child(segment))
}

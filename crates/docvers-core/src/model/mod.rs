pub mod document;
pub mod entity;
pub mod tag;

pub use document::{Document, DocumentMeta, DocumentWarning};
pub use entity::{Entity, Node};
pub use tag::{builtin_tags, Tag, TagSpec, TagTable};

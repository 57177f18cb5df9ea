use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::entity::Node;

/// A file-level document: the parsed content tree plus where it is written
///
/// The sequencer consumes one `Document` and produces one per emitted
/// version, each carrying `meta.version` and a version-specific destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Output destination handed to the renderer
    pub destination: PathBuf,

    /// Root content of the document
    #[serde(default)]
    pub content: Vec<Node>,

    /// Version metadata attached during expansion
    #[serde(default)]
    pub meta: DocumentMeta,

    /// Advisory warnings attached instead of failing the build
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DocumentWarning>,
}

impl Document {
    /// Create a document with no metadata and no warnings
    pub fn new(destination: impl Into<PathBuf>, content: Vec<Node>) -> Self {
        Self {
            destination: destination.into(),
            content,
            meta: DocumentMeta::default(),
            warnings: Vec::new(),
        }
    }

    /// The version this document was expanded for, if any
    pub fn version(&self) -> Option<&str> {
        self.meta.version.as_deref()
    }
}

/// Metadata attached to expanded documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// The version this copy of the document represents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A non-fatal problem found while expanding versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DocumentWarning {
    /// The document has `version` entities but no version sequence could be
    /// found in the options or in a `versionList` entity
    MissingVersionList,
    /// A target version is not part of the version sequence
    UnknownTargetVersion { version: String },
    /// A `version` entity names a version absent from the sequence
    UnlistedVersion { version: String },
}

impl fmt::Display for DocumentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentWarning::MissingVersionList => write!(
                f,
                "document contains version entities but no version list was given; versions were not expanded"
            ),
            DocumentWarning::UnknownTargetVersion { version } => {
                write!(f, "target version {} is not in the version list", version)
            }
            DocumentWarning::UnlistedVersion { version } => write!(
                f,
                "version {} appears in the document but not in the version list; its content was ignored",
                version
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let warning = DocumentWarning::UnknownTargetVersion {
            version: "2.0.0".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&warning).unwrap(),
            json!({"kind": "unknownTargetVersion", "version": "2.0.0"})
        );
    }

    #[test]
    fn test_document_deserializes_without_meta() {
        let doc: Document =
            serde_json::from_value(json!({"destination": "api.html", "content": ["x"]})).unwrap();

        assert_eq!(doc.version(), None);
        assert!(doc.warnings.is_empty());
        assert_eq!(doc.content, vec![Node::text("x")]);
    }
}

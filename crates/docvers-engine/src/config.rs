//! Loading of options, documents and versioned API content.
//!
//! Options are read from TOML when the file ends in `.toml` and from JSON
//! otherwise; keys are camelCase in both formats and anything absent falls
//! back to [`VersionOptions::default`]. Documents and API content are JSON
//! entity trees as produced by the markup parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

use docvers_core::errors::{DocversError, Result};
use docvers_core::{Document, Entity, Node, VersionOptions};

/// Supported options file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFormat {
    Toml,
    Json,
}

impl OptionsFormat {
    /// `.toml` files are TOML, everything else is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => OptionsFormat::Toml,
            _ => OptionsFormat::Json,
        }
    }
}

/// One version's raw API content, as listed in a changelog input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionContent {
    pub version: String,
    #[serde(default)]
    pub content: Vec<Node>,
}

/// Accepted document shapes: a full document record, a bare content list,
/// or a single root entity
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentInput {
    Document(Document),
    Content(Vec<Node>),
    Root(Entity),
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| DocversError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Parse options text in the given format
pub fn parse_options(text: &str, format: OptionsFormat, source: &str) -> Result<VersionOptions> {
    let invalid = |reason: String| DocversError::InvalidOptions {
        path: source.to_string(),
        reason,
    };
    match format {
        OptionsFormat::Toml => toml::from_str(text).map_err(|e| invalid(e.to_string())),
        OptionsFormat::Json => serde_json::from_str(text).map_err(|e| invalid(e.to_string())),
    }
}

/// Load options from a TOML or JSON file
///
/// # Errors
/// `Io` when the file cannot be read, `InvalidOptions` when it does not decode.
pub fn load_options(path: &Path) -> Result<VersionOptions> {
    let text = read(path)?;
    let options = parse_options(&text, OptionsFormat::from_path(path), &path.display().to_string())?;
    tracing::debug!(
        path = %path.display(),
        versions = options.versions.as_ref().map_or(0, Vec::len),
        "loaded options"
    );
    Ok(options)
}

/// Parse a document; `destination` overrides the recorded one, and bare
/// content takes `source` as its destination
pub fn parse_document(text: &str, source: &Path, destination: Option<&Path>) -> Result<Document> {
    let input: DocumentInput =
        serde_json::from_str(text).map_err(|e| DocversError::InvalidDocument {
            path: source.display().to_string(),
            reason: e.to_string(),
        })?;
    let mut document = match input {
        DocumentInput::Document(document) => document,
        DocumentInput::Content(content) => Document::new(source, content),
        DocumentInput::Root(root) => Document::new(source, vec![Node::Entity(root)]),
    };
    if let Some(destination) = destination {
        document.destination = destination.to_path_buf();
    }
    Ok(document)
}

/// Load a document from a JSON file
///
/// # Errors
/// `Io` or `InvalidDocument`.
pub fn load_document(path: &Path, destination: Option<&Path>) -> Result<Document> {
    let text = read(path)?;
    parse_document(&text, path, destination)
}

/// Parse `[{"version": "...", "content": [...]}, ...]`
///
/// Each record is decoded on its own so that a failure names the record and
/// the version it belongs to.
pub fn parse_versioned_content(text: &str, source: &str) -> Result<Vec<VersionContent>> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(text).map_err(|e| DocversError::InvalidDocument {
            path: source.to_string(),
            reason: e.to_string(),
        })?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            let context = format!("{}[{}]", source, index);
            let Some(version) = record
                .get("version")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
            else {
                return Err(DocversError::MissingField {
                    field: "version".to_string(),
                    context,
                });
            };
            let content = match record.get_mut("content").map(serde_json::Value::take) {
                Some(content) => serde_json::from_value(content).map_err(|e| {
                    DocversError::InvalidVersionContent {
                        version: version.clone(),
                        context,
                        reason: e.to_string(),
                    }
                })?,
                None => Vec::new(),
            };
            Ok(VersionContent { version, content })
        })
        .collect()
}

/// Load versioned API content from a JSON file
///
/// # Errors
/// `Io`, `InvalidDocument`, `MissingField` for an entry without a version,
/// or `InvalidVersionContent` for an entry whose content does not decode.
pub fn load_versioned_content(path: &Path) -> Result<Vec<VersionContent>> {
    let text = read(path)?;
    parse_versioned_content(&text, &path.display().to_string())
}

/// Serialize `value` as pretty JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

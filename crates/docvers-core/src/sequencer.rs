//! Version sequencer.
//!
//! Drives the merge engine across the version sequence. A document marks
//! per-version API content with `version` entities; for every version in the
//! sequence the cumulative content is rebuilt (strip, then merge) and spliced
//! back into the document shape at the first `version` marker. One output
//! document is emitted per target version.
//!
//! A `versionList` entity anywhere in the document is both an input (its
//! `version` children define the sequence) and an output placeholder: in
//! every emitted document its content becomes
//! `[current(v), version(n1), version(n2), ...]`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::context::VersionContext;
use crate::lifecycle::strip_tags;
use crate::merge::merge;
use crate::model::{Document, DocumentMeta, DocumentWarning, Entity, Node};

/// Entity type marking per-version content
pub const VERSION_KIND: &str = "version";
/// Entity type listing the version sequence
pub const VERSION_LIST_KIND: &str = "versionList";
/// Entity type naming the version a rendered document represents
pub const CURRENT_KIND: &str = "current";

/// Computes the destination of the document emitted for one version
pub trait FilenameModifier {
    fn modify(&self, destination: &Path, version: &str) -> PathBuf;
}

impl<F> FilenameModifier for F
where
    F: Fn(&Path, &str) -> PathBuf,
{
    fn modify(&self, destination: &Path, version: &str) -> PathBuf {
        self(destination, version)
    }
}

/// Default strategy: the version becomes a directory directly above the file
/// (`docs/api.html` becomes `docs/1.1.0/api.html`)
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionDirectory;

impl FilenameModifier for VersionDirectory {
    fn modify(&self, destination: &Path, version: &str) -> PathBuf {
        match (destination.parent(), destination.file_name()) {
            (Some(parent), Some(file)) => parent.join(version).join(file),
            _ => destination.join(version),
        }
    }
}

/// Expand a document using the sequence from its own `versionList` entity,
/// falling back to `versions` from the options
pub fn expand(
    document: &Document,
    ctx: &VersionContext<'_>,
    filenames: &dyn FilenameModifier,
) -> Vec<Document> {
    let sequence = find_version_list(&document.content).or_else(|| ctx.options().versions.clone());
    expand_versions(
        document,
        sequence.as_deref(),
        ctx.options().target_versions.as_deref(),
        ctx,
        filenames,
    )
}

/// Expand a document over an explicit version sequence
///
/// `targets` of `None` emits every version. Problems that do not prevent
/// expansion are attached as warnings to the first emitted document; when no
/// document is emitted at all, the input is returned unexpanded with them.
pub fn expand_versions(
    document: &Document,
    sequence: Option<&[String]>,
    targets: Option<&[String]>,
    ctx: &VersionContext<'_>,
    filenames: &dyn FilenameModifier,
) -> Vec<Document> {
    let versions = collect_versions(&document.content);
    if versions.is_empty() {
        return vec![document.clone()];
    }

    let Some(sequence) = sequence.filter(|s| !s.is_empty()) else {
        tracing::warn!(
            destination = %document.destination.display(),
            "document has version entities but no version list"
        );
        let mut unexpanded = document.clone();
        unexpanded.warnings.push(DocumentWarning::MissingVersionList);
        return vec![unexpanded];
    };

    let mut warnings = document.warnings.clone();
    warnings.extend(
        versions
            .keys()
            .filter(|name| !sequence.contains(name))
            .map(|name| DocumentWarning::UnlistedVersion {
                version: name.clone(),
            }),
    );
    if let Some(targets) = targets {
        warnings.extend(
            targets
                .iter()
                .filter(|target| !sequence.contains(target))
                .map(|target| DocumentWarning::UnknownTargetVersion {
                    version: target.clone(),
                }),
        );
    }
    for warning in &warnings {
        tracing::warn!(destination = %document.destination.display(), "{}", warning);
    }

    let is_target = |version: &str| targets.map_or(true, |t| t.iter().any(|x| x == version));

    let mut base: Option<Vec<Node>> = None;
    let mut outputs = Vec::new();
    for version in sequence {
        base = match (versions.get(version), base.take()) {
            (Some(content), None) => Some(content.clone()),
            (Some(content), Some(previous)) => {
                Some(merge(&strip_tags(&previous, ctx.tags()), content, ctx))
            }
            (None, Some(previous)) => {
                tracing::debug!(version = %version, "gap version; carrying content forward");
                Some(strip_tags(&previous, ctx.tags()))
            }
            (None, None) => None,
        };
        tracing::debug!(
            version = %version,
            nodes = base.as_ref().map_or(0, Vec::len),
            "merged version"
        );

        if is_target(version.as_str()) {
            outputs.push(render(
                document,
                base.as_deref().unwrap_or_default(),
                sequence,
                version,
                filenames.modify(&document.destination, version),
            ));
        }
    }

    if ctx.options().output_latest {
        if let Some(latest) = sequence.last() {
            outputs.push(render(
                document,
                base.as_deref().unwrap_or_default(),
                sequence,
                latest,
                document.destination.clone(),
            ));
        }
    }

    match outputs.first_mut() {
        Some(first) => first.warnings = warnings,
        None if !warnings.is_empty() => {
            let mut unexpanded = document.clone();
            unexpanded.warnings = warnings;
            outputs.push(unexpanded);
        }
        None => {}
    }
    outputs
}

/// The sequence named by the first `versionList` entity, depth-first
pub fn find_version_list(content: &[Node]) -> Option<Vec<String>> {
    content.iter().filter_map(Node::as_entity).find_map(|entity| {
        if entity.kind == VERSION_LIST_KIND {
            let names: Vec<String> = entity
                .children_of_kind(VERSION_KIND)
                .filter_map(Entity::name)
                .map(str::to_string)
                .collect();
            (!names.is_empty()).then_some(names)
        } else {
            find_version_list(&entity.content)
        }
    })
}

/// Per-version content by name; same-named markers are concatenated in
/// document order
fn collect_versions(content: &[Node]) -> BTreeMap<String, Vec<Node>> {
    fn walk(content: &[Node], found: &mut BTreeMap<String, Vec<Node>>) {
        for entity in content.iter().filter_map(Node::as_entity) {
            match entity.kind.as_str() {
                VERSION_LIST_KIND => {}
                VERSION_KIND => match entity.name() {
                    Some(name) => found
                        .entry(name.to_string())
                        .or_default()
                        .extend(entity.content.iter().cloned()),
                    None => tracing::debug!("ignoring version entity without a name"),
                },
                _ => walk(&entity.content, found),
            }
        }
    }

    let mut found = BTreeMap::new();
    walk(content, &mut found);
    found
}

fn render(
    document: &Document,
    base: &[Node],
    sequence: &[String],
    version: &str,
    destination: PathBuf,
) -> Document {
    let mut spliced = false;
    Document {
        destination,
        content: render_content(&document.content, base, sequence, version, &mut spliced),
        meta: DocumentMeta {
            version: Some(version.to_string()),
        },
        warnings: Vec::new(),
    }
}

fn render_content(
    shape: &[Node],
    base: &[Node],
    sequence: &[String],
    current: &str,
    spliced: &mut bool,
) -> Vec<Node> {
    let mut rendered = Vec::with_capacity(shape.len());
    for node in shape {
        match node {
            Node::Text(_) => rendered.push(node.clone()),
            Node::Entity(entity) if entity.kind == VERSION_KIND => {
                if !*spliced {
                    *spliced = true;
                    rendered.extend(without_version_markers(base));
                }
            }
            Node::Entity(entity) if entity.kind == VERSION_LIST_KIND => {
                rendered.push(Node::Entity(version_list(entity, sequence, current)));
            }
            Node::Entity(entity) => rendered.push(Node::Entity(Entity {
                kind: entity.kind.clone(),
                params: entity.params.clone(),
                content: render_content(&entity.content, base, sequence, current, spliced),
            })),
        }
    }
    rendered
}

fn without_version_markers(content: &[Node]) -> Vec<Node> {
    content
        .iter()
        .filter(|node| !node.is_kind(VERSION_KIND))
        .map(|node| match node {
            Node::Entity(entity) => Node::Entity(Entity {
                kind: entity.kind.clone(),
                params: entity.params.clone(),
                content: without_version_markers(&entity.content),
            }),
            text => text.clone(),
        })
        .collect()
}

fn version_list(placeholder: &Entity, sequence: &[String], current: &str) -> Entity {
    let listed = sequence
        .iter()
        .map(|name| Node::Entity(Entity::new(VERSION_KIND).param(name.as_str())));
    Entity {
        kind: placeholder.kind.clone(),
        params: placeholder.params.clone(),
        content: std::iter::once(Node::Entity(Entity::new(CURRENT_KIND).param(current)))
            .chain(listed)
            .collect(),
    }
}

//! Version expansion command.

#![allow(clippy::result_large_err)]

use std::path::PathBuf;
use std::time::Instant;

use docvers_core::errors::ExError;
use docvers_core::{expand, Document, DocumentWarning, FilenameModifier, VersionContext, VersionDirectory, VersionOptions};
use docvers_core::{log_op_end, log_op_error, log_op_start};

use crate::config;
use crate::Result;

const OP: &str = "expand_document";

/// Inputs of `docvers expand`
#[derive(Debug, Clone, Default)]
pub struct ExpandRequest {
    /// JSON document with `version` entities
    pub document: PathBuf,
    /// Options file (TOML or JSON); defaults apply when absent
    pub options: Option<PathBuf>,
    /// Destination overriding the one recorded in the document
    pub destination: Option<PathBuf>,
}

/// Expanded documents plus every warning attached to them
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandOutcome {
    pub documents: Vec<Document>,
    pub warnings: Vec<DocumentWarning>,
}

/// Load a document and its options and expand it into one document per
/// target version
///
/// ## Errors
///
/// - `Io`: a file could not be read
/// - `InvalidDocument`: the document is not an entity tree
/// - `InvalidOptions`: the options file could not be decoded
pub fn expand_command(request: &ExpandRequest) -> Result<ExpandOutcome> {
    log_op_start!(OP, destination = %request.document.display());
    let start = Instant::now();

    let outcome = expand_command_impl(request).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    log_op_end!(
        OP,
        duration_ms = start.elapsed().as_millis() as u64,
        output_count = outcome.documents.len(),
        warning_count = outcome.warnings.len()
    );

    Ok(outcome)
}

fn expand_command_impl(request: &ExpandRequest) -> Result<ExpandOutcome> {
    let options = match &request.options {
        Some(path) => config::load_options(path).map_err(|e| ExError::from(e).with_op(OP))?,
        None => VersionOptions::default(),
    };
    let document = config::load_document(&request.document, request.destination.as_deref())
        .map_err(|e| ExError::from(e).with_op(OP))?;

    Ok(expand_with(&document, &options, &VersionDirectory))
}

/// Expand an already-loaded document with a caller-supplied filename strategy
pub fn expand_with(
    document: &Document,
    options: &VersionOptions,
    filenames: &dyn FilenameModifier,
) -> ExpandOutcome {
    let ctx = VersionContext::new(options);
    let documents = expand(document, &ctx, filenames);
    let warnings = documents
        .iter()
        .flat_map(|d| d.warnings.iter().cloned())
        .collect();
    ExpandOutcome {
        documents,
        warnings,
    }
}

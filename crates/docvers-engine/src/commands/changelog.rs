//! Changelog command.

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use docvers_core::changelog::render_changelog_summary;
use docvers_core::errors::ExError;
use docvers_core::{build_changelog_report, Entity, VersionChangelog, VersionContext, VersionOptions};
use docvers_core::{log_op_end, log_op_error, log_op_start};

use crate::config::{self, VersionContent};
use crate::Result;

const OP: &str = "build_changelog";

/// Inputs of `docvers changelog`
#[derive(Debug, Clone, Default)]
pub struct ChangelogRequest {
    /// JSON list of `{version, content}` records, oldest first
    pub versions: PathBuf,
    /// Options file (TOML or JSON); defaults apply when absent
    pub options: Option<PathBuf>,
}

/// The typed report for every listed version
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogOutcome {
    pub report: Vec<VersionChangelog>,
}

impl ChangelogOutcome {
    /// The report in entity form, one `changelog` entity per version
    pub fn entities(&self) -> Vec<Entity> {
        self.report.iter().map(VersionChangelog::to_entity).collect()
    }

    /// Plain-text summary for review
    pub fn summary(&self) -> String {
        render_changelog_summary(&self.report)
    }
}

/// Load per-version API content and build the changelog
///
/// ## Errors
///
/// - `Io`: a file could not be read
/// - `InvalidDocument`: the versions file is not a list of version records
/// - `MissingField`: a version record has no `version`
/// - `InvalidOptions`: the options file could not be decoded
pub fn changelog_command(request: &ChangelogRequest) -> Result<ChangelogOutcome> {
    log_op_start!(OP, destination = %request.versions.display());
    let start = Instant::now();

    let outcome = changelog_command_impl(request).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    log_op_end!(
        OP,
        duration_ms = start.elapsed().as_millis() as u64,
        version_count = outcome.report.len(),
        entry_count = outcome
            .report
            .iter()
            .map(|v| v.items.len())
            .sum::<usize>()
    );

    Ok(outcome)
}

fn changelog_command_impl(request: &ChangelogRequest) -> Result<ChangelogOutcome> {
    let options = match &request.options {
        Some(path) => config::load_options(path).map_err(|e| ExError::from(e).with_op(OP))?,
        None => VersionOptions::default(),
    };
    let versions = config::load_versioned_content(&request.versions)
        .map_err(|e| ExError::from(e).with_op(OP))?;

    Ok(changelog_with(versions, &options))
}

/// Build the changelog from already-loaded content
///
/// Records are taken in list order; several records for one version are
/// concatenated.
pub fn changelog_with(versions: Vec<VersionContent>, options: &VersionOptions) -> ChangelogOutcome {
    let mut order: Vec<String> = Vec::new();
    let mut per_version: BTreeMap<String, Vec<_>> = BTreeMap::new();
    for record in versions {
        if !order.contains(&record.version) {
            order.push(record.version.clone());
        }
        per_version
            .entry(record.version)
            .or_default()
            .extend(record.content);
    }

    let ctx = VersionContext::new(options);
    ChangelogOutcome {
        report: build_changelog_report(&order, &per_version, &ctx),
    }
}

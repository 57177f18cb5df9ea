//! Resolved configuration shared by the merge engine, lifecycle filter,
//! sequencer and changelog indexer.

use crate::identity::{EntityMatcher, KeySegment, SignatureMatcher};
use crate::model::{Entity, TagTable};
use crate::options::VersionOptions;

static DEFAULT_MATCHER: SignatureMatcher = SignatureMatcher;

/// Options plus the lookups derived from them, built once per run
pub struct VersionContext<'a> {
    options: &'a VersionOptions,
    tags: TagTable,
    matcher: &'a dyn EntityMatcher,
}

impl<'a> VersionContext<'a> {
    /// Resolve options with the default [`SignatureMatcher`]
    pub fn new(options: &'a VersionOptions) -> Self {
        Self {
            options,
            tags: TagTable::new(&options.tags),
            matcher: &DEFAULT_MATCHER,
        }
    }

    /// Replace the identity function (the `entityMatchLookup` hook)
    pub fn with_matcher(mut self, matcher: &'a dyn EntityMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn options(&self) -> &VersionOptions {
        self.options
    }

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    pub fn matcher(&self) -> &dyn EntityMatcher {
        self.matcher
    }

    pub fn segment(&self, entity: &Entity) -> Option<KeySegment> {
        self.matcher.segment(entity)
    }

    pub fn is_taggable(&self, kind: &str) -> bool {
        self.options.is_taggable(kind)
    }

    pub fn is_indexable(&self, kind: &str) -> bool {
        self.options.is_indexable(kind)
    }

    pub fn is_unmergeable(&self, kind: &str) -> bool {
        self.options.is_unmergeable(kind)
    }
}

//! Presentation ordering by lifecycle bucket, then by name.

use crate::model::{Entity, Tag};

/// Lifecycle bucket; the derived order is the presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Added,
    Updated,
    Deprecated,
    Removed,
    Untagged,
}

impl Bucket {
    /// First lifecycle tag (in priority order) satisfied by `has`
    pub fn classify(has: impl Fn(&Tag) -> bool) -> Self {
        Tag::LIFECYCLE
            .iter()
            .zip([
                Bucket::Added,
                Bucket::Updated,
                Bucket::Deprecated,
                Bucket::Removed,
            ])
            .find(|(tag, _)| has(tag))
            .map_or(Bucket::Untagged, |(_, bucket)| bucket)
    }
}

/// Anything that can be placed in a lifecycle bucket and sorted by name
pub trait Organisable {
    fn bucket(&self) -> Bucket;
    fn sort_name(&self) -> &str;
}

impl Organisable for Entity {
    fn bucket(&self) -> Bucket {
        Bucket::classify(|tag| self.has_tag(tag))
    }

    fn sort_name(&self) -> &str {
        self.name().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganiseOptions {
    /// Return the input order untouched
    pub no_sort: bool,
}

/// Group items by bucket (added, updated, deprecated, removed, untagged) and
/// sort each bucket by name; ties keep their input order
///
/// The bucket order is the tag priority order, so `updated` entries always
/// come before `removed` ones: `[e1:added, e2:updated, e3:removed, e4]`
/// organises to `[e1, e2, e3, e4]`.
pub fn organise<T: Organisable>(mut items: Vec<T>, options: OrganiseOptions) -> Vec<T> {
    if options.no_sort {
        return items;
    }
    items.sort_by(|a, b| {
        a.bucket()
            .cmp(&b.bucket())
            .then_with(|| a.sort_name().cmp(b.sort_name()))
    });
    items
}

//! Changelog computation.
//!
//! The entry point is [`build_changelog_report`]: it indexes each version's
//! raw API content, overlays it on the carried-forward cumulative index of
//! the versions before it, marks `added`/`updated` entries by comparing the
//! two cumulative indexes, and groups whatever is new at that version into
//! one item per top-level API name.

use std::collections::{BTreeMap, BTreeSet};

use crate::changelog::index::{carry_forward, index_content, ApiEntry, ApiMap};
use crate::changelog::model::{ChangelogEntry, ChangelogItem, VersionChangelog};
use crate::context::VersionContext;
use crate::identity::EntityKey;
use crate::model::{Entity, Node, Tag, TagTable};
use crate::options::VersionOptions;
use crate::organise::{organise, OrganiseOptions};

/// Build the typed changelog for `versions` (oldest first)
///
/// Versions missing from `per_version` are treated as having no new content:
/// everything before them is carried forward with tags stripped.
pub fn build_changelog_report(
    versions: &[String],
    per_version: &BTreeMap<String, Vec<Node>>,
    ctx: &VersionContext<'_>,
) -> Vec<VersionChangelog> {
    let mut previous = ApiMap::new();
    let mut report = Vec::with_capacity(versions.len());

    for version in versions {
        let own = per_version
            .get(version)
            .map(|content| index_content(content, ctx))
            .unwrap_or_default();
        let current = overlay(&previous, own, ctx);
        let items = collect_items(&previous, &current, version, ctx);
        tracing::debug!(
            version = %version,
            entry_count = current.len(),
            item_count = items.len(),
            "indexed changelog version"
        );
        report.push(VersionChangelog {
            version: version.clone(),
            items,
        });
        previous = current;
    }

    if ctx.options().reverse_visible_list {
        report.reverse();
    }
    report
}

/// Build the changelog in entity form: one `changelog` entity per version
pub fn build_changelog(
    versions: &[String],
    per_version: &BTreeMap<String, Vec<Node>>,
    ctx: &VersionContext<'_>,
) -> Vec<Entity> {
    build_changelog_report(versions, per_version, ctx)
        .iter()
        .map(VersionChangelog::to_entity)
        .collect()
}

/// Overlay one version's own entries on the carried-forward previous index,
/// tagging `added` and `updated` entries
fn overlay(previous: &ApiMap, own: ApiMap, ctx: &VersionContext<'_>) -> ApiMap {
    let carried = carry_forward(previous, ctx.tags());
    let mut cumulative = carried.clone();
    let mut newly_added: BTreeSet<EntityKey> = BTreeSet::new();

    // Matching runs against the carried map: anything removed, or below a
    // removed ancestor, counts as absent.
    for (key, mut entry) in own {
        match carried.get(&key) {
            None => {
                let inside_added = entry
                    .parent_key
                    .as_ref()
                    .is_some_and(|parent| newly_added.contains(parent));
                if !inside_added && !ctx.tags().carries_removal(&entry.entity) {
                    entry.entity.add_tag(&Tag::Added);
                }
                newly_added.insert(key.clone());
            }
            Some(before) => {
                if before.fingerprint != entry.fingerprint
                    && !entry.entity.has_tag(&Tag::Added)
                    && !entry.entity.has_tag(&Tag::Updated)
                {
                    entry.entity.add_tag(&Tag::Updated);
                }
                for tag in ctx.tags().tags_of(&before.entity) {
                    entry.entity.add_tag(&tag);
                }
            }
        }
        cumulative.insert(key, entry);
    }

    cumulative
}

/// Tags on `entry` that are new at this version; retained tags count only
/// in the version that introduced them
fn new_tags(key: &EntityKey, entry: &ApiEntry, previous: &ApiMap, tags: &TagTable) -> Vec<Tag> {
    tags.tags_of(&entry.entity)
        .into_iter()
        .filter(|tag| {
            let retained = tags.spec(tag).is_some_and(|spec| spec.retain);
            !retained
                || !previous
                    .get(key)
                    .is_some_and(|before| before.entity.has_tag(tag))
        })
        .collect()
}

fn collect_items(
    previous: &ApiMap,
    current: &ApiMap,
    version: &str,
    ctx: &VersionContext<'_>,
) -> Vec<ChangelogItem> {
    let tags = ctx.tags();
    let items = current
        .iter()
        .filter(|(_, entry)| entry.root_entity)
        .filter_map(|(root_key, root)| {
            let mut ranked: Vec<(i32, ChangelogEntry)> = current
                .range::<EntityKey, _>(root_key..)
                .take_while(|(key, _)| key.starts_with(root_key))
                .filter_map(|(key, entry)| {
                    let fresh = new_tags(key, entry, previous, tags);
                    let rank = fresh.iter().map(|tag| tags.order(tag)).min()?;
                    Some((
                        rank,
                        ChangelogEntry {
                            kind: entry.entity.kind.clone(),
                            label: key.label_below(root_key),
                            tags: fresh.iter().map(|tag| tag.name().to_string()).collect(),
                            description: entry.description().cloned(),
                        },
                    ))
                })
                .collect();
            if ranked.is_empty() {
                return None;
            }
            ranked.sort_by_key(|(rank, _)| *rank);

            Some(ChangelogItem {
                name: root_key
                    .last()
                    .map(|segment| segment.name.clone())
                    .unwrap_or_default(),
                kind: root.entity.kind.clone(),
                tags: new_tags(root_key, root, previous, tags)
                    .iter()
                    .map(|tag| tag.name().to_string())
                    .collect(),
                link: deep_link(ctx.options(), version, root_key),
                entries: ranked.into_iter().map(|(_, entry)| entry).collect(),
            })
        })
        .collect();

    organise(items, OrganiseOptions::default())
}

/// `docsUrl` with `{version}` substituted, plus `#anchor`
fn deep_link(options: &VersionOptions, version: &str, key: &EntityKey) -> Option<String> {
    if options.dont_add_docs_link {
        return None;
    }
    let url = options.docs_url.as_ref()?;
    Some(format!("{}#{}", url.replace("{version}", version), key.anchor()))
}

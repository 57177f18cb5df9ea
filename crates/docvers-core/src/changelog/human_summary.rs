//! Plain-text summary renderer for changelog reports.

use crate::changelog::model::{ChangelogItem, VersionChangelog};

/// Render a Markdown/text summary of a changelog report
///
/// Informational only; renderers consume the entity form.
pub fn render_changelog_summary(report: &[VersionChangelog]) -> String {
    let mut out = String::from("## Changelog\n");

    for changelog in report {
        out.push_str(&format!("\n### {}\n\n", changelog.version));
        if changelog.is_empty() {
            out.push_str("_No API changes._\n");
            continue;
        }
        for item in &changelog.items {
            render_item(&mut out, item);
        }
    }

    out
}

fn render_item(out: &mut String, item: &ChangelogItem) {
    out.push_str(&format!("- **{}** ({})", item.name, item.kind));
    if !item.tags.is_empty() {
        out.push_str(&format!(" [{}]", item.tags.join(", ")));
    }
    if let Some(link) = &item.link {
        out.push_str(&format!(" <{link}>"));
    }
    out.push('\n');

    for entry in &item.entries {
        out.push_str(&format!(
            "  - {} `{}`: {}\n",
            entry.kind,
            entry.label,
            entry.tags.join(", ")
        ));
    }
}

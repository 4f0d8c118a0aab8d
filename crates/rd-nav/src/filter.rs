//! Sidebar search filtering.

use rd_content::{PageRef, Section};
use serde::Serialize;

/// Sidebar group as rendered for the current filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarGroup<'a> {
    /// Section title.
    pub title: &'a str,
    /// Section query key.
    pub key: &'a str,
    /// Icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'a str>,
    /// Entries matching the filter, in sidebar order.
    pub items: Vec<&'a PageRef>,
    /// Whether the group lists the active page.
    pub active: bool,
    /// Whether the group is expanded.
    pub expanded: bool,
}

/// Case-insensitive substring match of a label against filter text.
///
/// An empty filter matches everything.
#[must_use]
pub fn matches(label: &str, filter: &str) -> bool {
    filter.is_empty() || label.to_lowercase().contains(&filter.to_lowercase())
}

/// Filter sections down to the entries whose label contains `filter`.
///
/// With an empty filter every section is kept with all its entries. With a
/// non-empty filter, sections without any matching entry are omitted.
/// All returned groups are marked expanded.
#[must_use]
pub fn filter_sidebar<'a>(
    sections: &'a [Section],
    filter: &str,
    active_slug: &str,
) -> Vec<SidebarGroup<'a>> {
    let needle = filter.to_lowercase();

    sections
        .iter()
        .filter_map(|section| {
            let items: Vec<&PageRef> = section
                .items
                .iter()
                .filter(|item| needle.is_empty() || item.label.to_lowercase().contains(&needle))
                .collect();

            if !needle.is_empty() && items.is_empty() {
                return None;
            }

            Some(SidebarGroup {
                title: &section.title,
                key: &section.key,
                icon: section.icon.as_deref(),
                items,
                active: section.contains(active_slug),
                expanded: true,
            })
        })
        .collect()
}

//! Navigation state machine for the docs view.
//!
//! [`NavState`] is the single source of truth for what is displayed. Every
//! user action is a transition method that updates the state and returns
//! the [`Effect`]s the UI layer must perform (push a URL, scroll). The
//! state itself never touches the browser, so it runs unchanged in a
//! headless test harness.
//!
//! Transitions are synchronous and complete before the next event is
//! handled. The only timing concern is expressed as data: a scroll to an
//! anchor on a page that is still mounting carries a short delay.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rd_config::ScrollConfig;
use rd_content::{NavLinks, Page, TocEntry};
use serde::Serialize;

use crate::filter::{SidebarGroup, filter_sidebar};
use crate::query::QueryParams;
use crate::resolver::Resolver;

/// Side effect requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Push a new history entry with this query string (leading `?`).
    PushUrl(String),
    /// Scroll the content to the top.
    ScrollToTop,
    /// Scroll the element with this id into view.
    ///
    /// `delay` is `None` for an immediate scroll, or the time to wait for
    /// freshly rendered content. A missing element is a no-op.
    ScrollToAnchor {
        anchor: String,
        delay: Option<Duration>,
    },
}

/// Breadcrumb trail item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
}

/// Table of contents entry as rendered for the current page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocItem<'a> {
    #[serde(flatten)]
    pub entry: &'a TocEntry,
    /// Link target (`?key=slug&section=id#id`).
    pub href: String,
    /// Whether this is the active anchor.
    pub active: bool,
}

/// Navigation state of one docs view.
#[derive(Debug, Clone)]
pub struct NavState {
    resolver: Arc<Resolver>,
    scroll: ScrollConfig,
    slug: String,
    anchor: String,
    filter: String,
    sidebar_open: bool,
    collapsed: HashSet<String>,
}

impl NavState {
    /// Create the state from the initial URL.
    ///
    /// The URL is taken as given and not rewritten. If it names an anchor,
    /// a single scroll is scheduled after the mount delay so layout can
    /// settle first.
    #[must_use]
    pub fn mount(
        resolver: Arc<Resolver>,
        scroll: ScrollConfig,
        query: &QueryParams,
    ) -> (Self, Vec<Effect>) {
        let location = resolver.resolve(query);
        tracing::debug!(slug = %location.slug, anchor = %location.anchor, "Mounted docs view");

        let mut effects = Vec::new();
        if !location.anchor.is_empty() {
            effects.push(Effect::ScrollToAnchor {
                anchor: location.anchor.clone(),
                delay: Some(scroll.mount_delay()),
            });
        }

        let state = Self {
            resolver,
            scroll,
            slug: location.slug,
            anchor: location.anchor,
            filter: String::new(),
            sidebar_open: false,
            collapsed: HashSet::new(),
        };
        (state, effects)
    }

    /// Select a page from the sidebar or the prev/next links.
    ///
    /// Clears the anchor unless one is supplied, closes the mobile sidebar
    /// and pushes the new URL. Without an anchor the view scrolls to the
    /// top; with one, the scroll waits for the new page to mount. Unknown
    /// slugs are ignored.
    #[must_use]
    pub fn select_page(&mut self, slug: &str, anchor: Option<&str>) -> Vec<Effect> {
        if !self.resolver.registry().contains(slug) {
            tracing::debug!(%slug, "Ignoring selection of unknown page");
            return Vec::new();
        }
        let anchor = anchor.unwrap_or_default();

        self.slug = slug.to_owned();
        self.anchor = anchor.to_owned();
        self.sidebar_open = false;

        let push = Effect::PushUrl(self.resolver.href(slug, Some(anchor)));
        let scroll = if anchor.is_empty() {
            Effect::ScrollToTop
        } else {
            Effect::ScrollToAnchor {
                anchor: anchor.to_owned(),
                delay: Some(self.scroll.select_delay()),
            }
        };
        vec![push, scroll]
    }

    /// Select an anchor within the current page (table of contents click).
    ///
    /// The page is already mounted, so the scroll is immediate. An empty
    /// anchor is ignored.
    #[must_use]
    pub fn select_anchor(&mut self, anchor: &str) -> Vec<Effect> {
        if anchor.is_empty() {
            return Vec::new();
        }
        self.anchor = anchor.to_owned();

        vec![
            Effect::PushUrl(self.resolver.href(&self.slug, Some(anchor))),
            Effect::ScrollToAnchor {
                anchor: anchor.to_owned(),
                delay: None,
            },
        ]
    }

    /// Follow browser back/forward to `query`.
    ///
    /// The URL already changed, so nothing is pushed. When the page changes
    /// the scroll waits for it to mount; otherwise an anchor scroll is
    /// immediate and an unchanged page without anchor does not scroll.
    #[must_use]
    pub fn pop_state(&mut self, query: &QueryParams) -> Vec<Effect> {
        let location = self.resolver.resolve(query);
        let page_changed = location.slug != self.slug;

        self.slug = location.slug;
        self.anchor = location.anchor;
        self.sidebar_open = false;

        if !self.anchor.is_empty() {
            vec![Effect::ScrollToAnchor {
                anchor: self.anchor.clone(),
                delay: page_changed.then(|| self.scroll.select_delay()),
            }]
        } else if page_changed {
            vec![Effect::ScrollToTop]
        } else {
            Vec::new()
        }
    }

    /// Select the previous page, if any.
    #[must_use]
    pub fn previous_page(&mut self) -> Vec<Effect> {
        match self.nav_links().prev {
            Some(prev) => self.select_page(&prev.slug, None),
            None => Vec::new(),
        }
    }

    /// Select the next page, if any.
    #[must_use]
    pub fn next_page(&mut self) -> Vec<Effect> {
        match self.nav_links().next {
            Some(next) => self.select_page(&next.slug, None),
            None => Vec::new(),
        }
    }

    /// Replace the sidebar search text. Never affects URL or selection.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    /// Toggle the mobile sidebar.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Close the mobile sidebar (backdrop click).
    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// Collapse or expand a sidebar group.
    ///
    /// Returns the new expanded state, or `None` for an unknown key.
    pub fn toggle_section(&mut self, key: &str) -> Option<bool> {
        self.resolver.registry().section_by_key(key)?;
        if self.collapsed.remove(key) {
            Some(true)
        } else {
            self.collapsed.insert(key.to_owned());
            Some(false)
        }
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Active anchor, empty when none.
    #[must_use]
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    #[must_use]
    pub fn is_section_expanded(&self, key: &str) -> bool {
        !self.collapsed.contains(key)
    }

    /// Query string of the current location (leading `?`).
    #[must_use]
    pub fn url(&self) -> String {
        self.resolver.href(&self.slug, Some(&self.anchor))
    }

    /// The displayed page.
    #[must_use]
    pub fn current_page(&self) -> Option<&Page> {
        self.resolver.registry().page(&self.slug)
    }

    /// Previous and next pages of the displayed page.
    #[must_use]
    pub fn nav_links(&self) -> NavLinks {
        self.resolver.registry().nav_links(&self.slug)
    }

    /// Breadcrumb trail: "Docs", the section title, the page title.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbItem> {
        let mut crumbs = vec![BreadcrumbItem {
            title: "Docs".to_owned(),
        }];
        if let Some(page) = self.current_page() {
            crumbs.push(BreadcrumbItem {
                title: page.section.clone(),
            });
            crumbs.push(BreadcrumbItem {
                title: page.title.clone(),
            });
        }
        crumbs
    }

    /// Sidebar groups for the current filter and collapse state.
    #[must_use]
    pub fn sidebar(&self) -> Vec<SidebarGroup<'_>> {
        let mut groups = filter_sidebar(self.resolver.registry().sections(), &self.filter, &self.slug);
        for group in &mut groups {
            group.expanded = self.is_section_expanded(group.key);
        }
        groups
    }

    /// Table of contents of the displayed page.
    #[must_use]
    pub fn toc(&self) -> Vec<TocItem<'_>> {
        let Some(page) = self.current_page() else {
            return Vec::new();
        };
        page.toc
            .iter()
            .map(|entry| TocItem {
                entry,
                href: self.resolver.toc_href(&self.slug, &entry.id),
                active: entry.id == self.anchor,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rd_content::{PageRef, Registry};

    fn resolver() -> Arc<Resolver> {
        let registry = Arc::new(Registry::builtin().unwrap());
        Arc::new(Resolver::with_defaults(registry).unwrap())
    }

    fn mount(query: &str) -> (NavState, Vec<Effect>) {
        NavState::mount(resolver(), ScrollConfig::default(), &QueryParams::parse(query))
    }

    fn ms(millis: u64) -> Option<Duration> {
        Some(Duration::from_millis(millis))
    }

    #[test]
    fn test_mount_without_anchor() {
        let (state, effects) = mount("?agents=creating-agents");

        assert_eq!(state.slug(), "creating-agents");
        assert_eq!(state.anchor(), "");
        assert_eq!(state.filter(), "");
        assert!(!state.is_sidebar_open());
        assert!(effects.is_empty());
        assert_eq!(
            state.nav_links(),
            NavLinks {
                prev: Some(PageRef::new("Overview", "agent-overview")),
                next: Some(PageRef::new("Agent Configuration", "agent-configuration")),
            }
        );
    }

    #[test]
    fn test_mount_with_anchor_schedules_deferred_scroll() {
        let (state, effects) = mount("?sessions=terminal&section=t-manual");

        assert_eq!(state.slug(), "terminal");
        assert_eq!(state.anchor(), "t-manual");
        assert_eq!(
            effects,
            vec![Effect::ScrollToAnchor {
                anchor: "t-manual".to_owned(),
                delay: ms(100),
            }]
        );
    }

    #[test]
    fn test_mount_invalid_url_falls_back_without_rewrite() {
        let (state, effects) = mount("?bogus=xyz");

        assert_eq!(state.slug(), "introduction");
        assert!(effects.is_empty());
    }

    #[test]
    fn test_mount_uses_configured_delay() {
        let scroll = ScrollConfig {
            mount_delay_ms: 300,
            select_delay_ms: 10,
        };
        let (_, effects) =
            NavState::mount(resolver(), scroll, &QueryParams::parse("section=what-is-rune"));

        assert_eq!(
            effects,
            vec![Effect::ScrollToAnchor {
                anchor: "what-is-rune".to_owned(),
                delay: ms(300),
            }]
        );
    }

    #[test]
    fn test_select_page_pushes_url_and_scrolls_top() {
        let (mut state, _) = mount("?sessions=terminal&section=t-manual");
        state.toggle_sidebar();

        let effects = state.select_page("presets", None);

        assert_eq!(state.slug(), "presets");
        assert_eq!(state.anchor(), "");
        assert!(!state.is_sidebar_open());
        assert_eq!(
            effects,
            vec![
                Effect::PushUrl("?configuration=presets".to_owned()),
                Effect::ScrollToTop,
            ]
        );
    }

    #[test]
    fn test_select_page_with_anchor_defers_scroll() {
        let (mut state, _) = mount("");

        let effects = state.select_page("terminal", Some("t-manual"));

        assert_eq!(state.anchor(), "t-manual");
        assert_eq!(
            effects,
            vec![
                Effect::PushUrl("?sessions=terminal&section=t-manual".to_owned()),
                Effect::ScrollToAnchor {
                    anchor: "t-manual".to_owned(),
                    delay: ms(50),
                },
            ]
        );
    }

    #[test]
    fn test_select_page_empty_anchor_is_none() {
        let (mut state, _) = mount("");

        let effects = state.select_page("terminal", Some(""));

        assert_eq!(
            effects,
            vec![
                Effect::PushUrl("?sessions=terminal".to_owned()),
                Effect::ScrollToTop,
            ]
        );
    }

    #[test]
    fn test_select_same_page_clears_anchor() {
        let (mut state, _) = mount("?sessions=terminal&section=t-manual");

        let effects = state.select_page("terminal", None);

        assert_eq!(state.anchor(), "");
        assert_eq!(effects[0], Effect::PushUrl("?sessions=terminal".to_owned()));
    }

    #[test]
    fn test_select_unknown_page_is_ignored() {
        let (mut state, _) = mount("?agents=creating-agents");
        state.toggle_sidebar();

        let effects = state.select_page("nope", None);

        assert!(effects.is_empty());
        assert_eq!(state.slug(), "creating-agents");
        assert!(state.is_sidebar_open());
    }

    #[test]
    fn test_select_anchor_scrolls_immediately() {
        let (mut state, _) = mount("?agents=creating-agents");

        let effects = state.select_anchor("ca-examples");

        assert_eq!(state.slug(), "creating-agents");
        assert_eq!(state.anchor(), "ca-examples");
        assert_eq!(
            effects,
            vec![
                Effect::PushUrl("?agents=creating-agents&section=ca-examples".to_owned()),
                Effect::ScrollToAnchor {
                    anchor: "ca-examples".to_owned(),
                    delay: None,
                },
            ]
        );
    }

    #[test]
    fn test_select_anchor_empty_is_ignored() {
        let (mut state, _) = mount("?agents=creating-agents&section=ca-examples");

        assert!(state.select_anchor("").is_empty());
        assert_eq!(state.anchor(), "ca-examples");
    }

    #[test]
    fn test_pop_state_to_other_page() {
        let (mut state, _) = mount("?agents=creating-agents");

        let effects = state.pop_state(&QueryParams::parse("?skills=custom-skills"));

        assert_eq!(state.slug(), "custom-skills");
        assert_eq!(effects, vec![Effect::ScrollToTop]);
    }

    #[test]
    fn test_pop_state_to_other_page_with_anchor() {
        let (mut state, _) = mount("?agents=creating-agents");

        let effects = state.pop_state(&QueryParams::parse("?sessions=terminal&section=t-manual"));

        assert_eq!(
            effects,
            vec![Effect::ScrollToAnchor {
                anchor: "t-manual".to_owned(),
                delay: ms(50),
            }]
        );
    }

    #[test]
    fn test_pop_state_same_page() {
        let (mut state, _) = mount("?agents=creating-agents&section=ca-examples");

        let effects = state.pop_state(&QueryParams::parse("?agents=creating-agents&section=ca-structure"));
        assert_eq!(
            effects,
            vec![Effect::ScrollToAnchor {
                anchor: "ca-structure".to_owned(),
                delay: None,
            }]
        );

        let effects = state.pop_state(&QueryParams::parse("?agents=creating-agents"));
        assert!(effects.is_empty());
        assert_eq!(state.anchor(), "");
    }

    #[test]
    fn test_previous_and_next() {
        let (mut state, _) = mount("?agents=creating-agents");

        let effects = state.next_page();
        assert_eq!(state.slug(), "agent-configuration");
        assert_eq!(effects[0], Effect::PushUrl("?agents=agent-configuration".to_owned()));

        let _ = state.previous_page();
        let _ = state.previous_page();
        assert_eq!(state.slug(), "agent-overview");
    }

    #[test]
    fn test_previous_at_start_and_next_at_end() {
        let (mut state, _) = mount("");
        assert!(state.previous_page().is_empty());
        assert_eq!(state.slug(), "introduction");

        let (mut state, _) = mount("configuration=model-settings");
        assert!(state.next_page().is_empty());
        assert_eq!(state.slug(), "model-settings");
    }

    #[test]
    fn test_walk_next_visits_every_page() {
        let (mut state, _) = mount("");
        let mut visited = vec![state.slug().to_owned()];

        while !state.next_page().is_empty() {
            visited.push(state.slug().to_owned());
        }

        let expected: Vec<String> = resolver()
            .registry()
            .pages()
            .map(|p| p.slug.clone())
            .collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_set_filter_does_not_touch_selection() {
        let (mut state, _) = mount("?sessions=terminal&section=t-manual");
        let url = state.url();

        state.set_filter("agent");

        assert_eq!(state.filter(), "agent");
        assert_eq!(state.url(), url);
        assert_eq!(state.slug(), "terminal");
        let keys: Vec<&str> = state.sidebar().iter().map(|g| g.key).collect();
        assert_eq!(keys, vec!["agents"]);
    }

    #[test]
    fn test_sidebar_toggle_and_close() {
        let (mut state, _) = mount("");

        state.toggle_sidebar();
        assert!(state.is_sidebar_open());
        state.toggle_sidebar();
        assert!(!state.is_sidebar_open());
        state.toggle_sidebar();
        state.close_sidebar();
        assert!(!state.is_sidebar_open());
    }

    #[test]
    fn test_toggle_section() {
        let (mut state, _) = mount("");

        assert_eq!(state.toggle_section("agents"), Some(false));
        assert!(!state.is_section_expanded("agents"));
        let agents = state.sidebar().into_iter().find(|g| g.key == "agents").unwrap();
        assert!(!agents.expanded);

        assert_eq!(state.toggle_section("agents"), Some(true));
        assert!(state.is_section_expanded("agents"));
        assert_eq!(state.toggle_section("bogus"), None);
    }

    #[test]
    fn test_url_reflects_state() {
        let (mut state, _) = mount("");
        assert_eq!(state.url(), "?getting-started=introduction");

        let _ = state.select_page("git-worktrees", Some("gw-merge"));
        assert_eq!(state.url(), "?sessions=git-worktrees&section=gw-merge");
    }

    #[test]
    fn test_breadcrumbs() {
        let (state, _) = mount("?agents=agent-overview");

        let titles: Vec<String> = state.breadcrumbs().into_iter().map(|b| b.title).collect();

        assert_eq!(titles, vec!["Docs", "Agents", "Agent Overview"]);
    }

    #[test]
    fn test_toc_marks_active_anchor() {
        let (state, _) = mount("?sessions=terminal&section=t-manual");

        let toc = state.toc();

        assert!(!toc.is_empty());
        let active: Vec<&str> = toc.iter().filter(|t| t.active).map(|t| t.entry.id.as_str()).collect();
        assert_eq!(active, vec!["t-manual"]);
        let manual = toc.iter().find(|t| t.entry.id == "t-manual").unwrap();
        assert_eq!(manual.href, "?sessions=terminal&section=t-manual#t-manual");
    }

    #[test]
    fn test_toc_foreign_anchor_marks_nothing() {
        let (state, _) = mount("?agents=creating-agents&section=t-manual");

        assert!(state.toc().iter().all(|t| !t.active));
    }
}

//! Mapping between URL query parameters and the displayed page.
//!
//! The query string carries one key per section (the section key) whose
//! value selects a page of that section, plus a reserved key (`section` by
//! default) carrying the in-page anchor:
//!
//! ```text
//! ?sessions=terminal&section=t-manual
//!  ^^^^^^^^ ^^^^^^^^ ^^^^^^^ ^^^^^^^^
//!  key      slug     reserved anchor
//! ```
//!
//! Every lookup has a fallback, so resolution never fails.

use std::sync::Arc;

use rd_config::DocsConfig;
use rd_content::Registry;
use serde::Serialize;

use crate::error::NavError;
use crate::query::QueryParams;

/// Page and anchor selected by a URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Page slug, always present in the registry.
    pub slug: String,
    /// Anchor id, empty when none.
    pub anchor: String,
}

/// Bidirectional mapping between query parameters and [`Location`]s.
#[derive(Debug)]
pub struct Resolver {
    registry: Arc<Registry>,
    default_slug: String,
    fallback_section: String,
    anchor_param: String,
}

impl Resolver {
    /// Create a resolver over `registry`.
    ///
    /// # Errors
    ///
    /// Returns `NavError::UnknownDefaultSlug` if the default slug is not a
    /// registry page, `NavError::UnknownFallbackSection` if the fallback
    /// section key names no section, and `NavError::ReservedKeyCollision` if
    /// a section key equals the reserved anchor key.
    pub fn new(registry: Arc<Registry>, config: &DocsConfig) -> Result<Self, NavError> {
        if !registry.contains(&config.default_slug) {
            return Err(NavError::UnknownDefaultSlug(config.default_slug.clone()));
        }
        if registry.section_by_key(&config.fallback_section).is_none() {
            return Err(NavError::UnknownFallbackSection(
                config.fallback_section.clone(),
            ));
        }
        if let Some(section) = registry.section_by_key(&config.anchor_param) {
            return Err(NavError::ReservedKeyCollision(section.key.clone()));
        }

        Ok(Self {
            registry,
            default_slug: config.default_slug.clone(),
            fallback_section: config.fallback_section.clone(),
            anchor_param: config.anchor_param.clone(),
        })
    }

    /// Create a resolver with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`Resolver::new`].
    pub fn with_defaults(registry: Arc<Registry>) -> Result<Self, NavError> {
        Self::new(registry, &DocsConfig::default())
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn default_slug(&self) -> &str {
        &self.default_slug
    }

    #[must_use]
    pub fn anchor_param(&self) -> &str {
        &self.anchor_param
    }

    /// Resolve the selected page slug.
    ///
    /// Parameters are checked in order, skipping the reserved anchor key.
    /// The first parameter whose key is a section key and whose value is a
    /// slug of that section wins. Falls back to the default slug.
    #[must_use]
    pub fn resolve_slug(&self, query: &QueryParams) -> &str {
        for (key, value) in query.iter() {
            if key == self.anchor_param {
                continue;
            }
            let Some(section) = self.registry.section_by_key(key) else {
                continue;
            };
            if let Some(item) = section.items.iter().find(|item| item.slug == value) {
                return &item.slug;
            }
        }

        tracing::debug!(query = %query, default = %self.default_slug, "No page selected by query, using default");
        &self.default_slug
    }

    /// Resolve the in-page anchor, empty when absent.
    ///
    /// The anchor is not checked against the page's table of contents.
    #[must_use]
    pub fn resolve_anchor<'q>(&self, query: &'q QueryParams) -> &'q str {
        query.get(&self.anchor_param).unwrap_or_default()
    }

    /// Resolve both slug and anchor.
    #[must_use]
    pub fn resolve(&self, query: &QueryParams) -> Location {
        Location {
            slug: self.resolve_slug(query).to_owned(),
            anchor: self.resolve_anchor(query).to_owned(),
        }
    }

    /// Query key of the section listing `slug`.
    ///
    /// Unknown slugs map to the configured fallback section.
    #[must_use]
    pub fn section_key_for(&self, slug: &str) -> &str {
        if let Some(section) = self.registry.section_of(slug) {
            &section.key
        } else {
            tracing::debug!(%slug, fallback = %self.fallback_section, "Slug has no section");
            &self.fallback_section
        }
    }

    /// Build the query selecting `slug` and, if non-empty, `anchor`.
    #[must_use]
    pub fn build_query(&self, slug: &str, anchor: Option<&str>) -> QueryParams {
        let mut query = QueryParams::new();
        query.push(self.section_key_for(slug), slug);
        if let Some(anchor) = anchor.filter(|a| !a.is_empty()) {
            query.push(self.anchor_param.as_str(), anchor);
        }
        query
    }

    /// Relative link (`?key=slug[&section=anchor]`) for a location.
    #[must_use]
    pub fn href(&self, slug: &str, anchor: Option<&str>) -> String {
        format!("?{}", self.build_query(slug, anchor))
    }

    /// Link target of a table of contents entry, including the fragment.
    #[must_use]
    pub fn toc_href(&self, slug: &str, anchor: &str) -> String {
        let href = self.href(slug, Some(anchor));
        if anchor.is_empty() {
            href
        } else {
            format!("{href}#{anchor}")
        }
    }
}

//! Content registry with derived page ordering.
//!
//! # Architecture
//!
//! Pages are stored in a flat `Vec<Page>` in flattened sidebar order: all
//! pages of the first section, then the second, and so on. Owning sections
//! and prev/next links are tracked by index. This provides:
//! - O(1) slug lookups via `slug_index` `HashMap`
//! - O(1) section key lookups via `key_index` `HashMap`
//! - O(1) prev/next lookups, precomputed at build time
//!
//! The registry is immutable once built; there is no invalidation path.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::page::{Page, heading_ids};
use crate::section::{PageRef, Section};

/// Built-in content of the Rune documentation site.
const BUILTIN_CONTENT: &str = include_str!("../content/docs.yaml");

/// Error returned when the registry cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// I/O error reading a content file.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Content file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Content file is not valid YAML for the expected layout.
    #[error("Content parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// No section lists any page.
    #[error("Registry has no pages")]
    EmptyRegistry,
    /// The same slug is listed twice.
    #[error("Duplicate slug '{slug}' in sections '{first}' and '{second}'")]
    DuplicateSlug {
        /// Offending slug.
        slug: String,
        /// Section listing it first.
        first: String,
        /// Section listing it again.
        second: String,
    },
    /// Two section titles produce the same query key.
    #[error("Duplicate section key '{0}'")]
    DuplicateSectionKey(String),
    /// A sidebar entry points at a slug with no page content.
    #[error("Sidebar slug '{0}' has no page content")]
    MissingPage(String),
    /// A page names a section that is not declared.
    #[error("Page '{slug}' names unknown section '{section}'")]
    UnknownSection {
        /// Page slug.
        slug: String,
        /// Section title found on the page.
        section: String,
    },
}

/// Neighbouring pages in flattened order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NavLinks {
    /// Previous page, `None` for the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
    /// Next page, `None` for the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
}

/// Immutable table of documentation sections and pages.
pub struct Registry {
    sections: Vec<Section>,
    pages: Vec<Page>,
    /// Owning section index per page.
    page_sections: Vec<usize>,
    nav_links: Vec<NavLinks>,
    slug_index: HashMap<String, usize>,
    key_index: HashMap<String, usize>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("sections", &self.sections.len())
            .field("pages", &self.pages.len())
            .finish_non_exhaustive()
    }
}

/// On-disk content layout.
#[derive(Deserialize)]
struct ContentFile {
    sections: Vec<SectionDef>,
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Deserialize)]
struct SectionDef {
    title: String,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    items: Vec<PageRef>,
}

impl Registry {
    /// Build the registry from the built-in content.
    ///
    /// # Errors
    ///
    /// Returns error if the embedded content is inconsistent.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_yaml_str(BUILTIN_CONTENT)
    }

    /// Build the registry from a content file on disk.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loading docs content");
        Self::from_yaml_str(&content)
    }

    /// Build the registry from YAML content with `sections` and `pages` lists.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RegistryError> {
        let content: ContentFile = serde_yaml::from_str(yaml)?;

        let mut builder = RegistryBuilder::new();
        for section in content.sections {
            builder.add_section(Section::new(section.title, section.icon, section.items));
        }
        for page in content.pages {
            builder.add_page(page);
        }
        builder.build()
    }

    /// Get page by slug.
    #[must_use]
    pub fn page(&self, slug: &str) -> Option<&Page> {
        self.slug_index.get(slug).map(|&i| &self.pages[i])
    }

    /// Check whether `slug` is a navigable page.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.slug_index.contains_key(slug)
    }

    /// All sections in declaration order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Get section by its query key.
    #[must_use]
    pub fn section_by_key(&self, key: &str) -> Option<&Section> {
        self.key_index.get(key).map(|&i| &self.sections[i])
    }

    /// Get the section listing `slug`.
    #[must_use]
    pub fn section_of(&self, slug: &str) -> Option<&Section> {
        self.slug_index
            .get(slug)
            .map(|&i| &self.sections[self.page_sections[i]])
    }

    /// Sidebar label of `slug`.
    #[must_use]
    pub fn label(&self, slug: &str) -> Option<&str> {
        self.section_of(slug)?
            .items
            .iter()
            .find(|item| item.slug == slug)
            .map(|item| item.label.as_str())
    }

    /// Previous and next pages of `slug`. Unknown slugs have no neighbours.
    #[must_use]
    pub fn nav_links(&self, slug: &str) -> NavLinks {
        self.slug_index
            .get(slug)
            .map(|&i| self.nav_links[i].clone())
            .unwrap_or_default()
    }

    /// Pages in flattened sidebar order.
    pub fn pages(&self) -> impl ExactSizeIterator<Item = &Page> {
        self.pages.iter()
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the registry has no pages. Always false for a built registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Builder for constructing [`Registry`] instances.
#[derive(Default)]
pub struct RegistryBuilder {
    sections: Vec<Section>,
    pages: Vec<Page>,
}

impl RegistryBuilder {
    /// Create a new registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section. Sections are ordered by insertion.
    pub fn add_section(&mut self, section: Section) -> &mut Self {
        self.sections.push(section);
        self
    }

    /// Add page content.
    pub fn add_page(&mut self, page: Page) -> &mut Self {
        self.pages.push(page);
        self
    }

    /// Validate the definitions and build the [`Registry`].
    ///
    /// # Errors
    ///
    /// Returns error on duplicate slugs or section keys, sidebar entries
    /// without content, pages naming undeclared sections, or when no page
    /// is listed at all.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let Self { sections, pages } = self;

        let mut key_index = HashMap::with_capacity(sections.len());
        for (idx, section) in sections.iter().enumerate() {
            if key_index.insert(section.key.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateSectionKey(section.key.clone()));
            }
        }

        // Page content by slug; later definitions replace earlier ones.
        let mut content: HashMap<String, Page> = HashMap::with_capacity(pages.len());
        for page in pages {
            if let Some(previous) = content.insert(page.slug.clone(), page) {
                tracing::warn!(slug = %previous.slug, "Page content defined twice, using the last definition");
            }
        }

        let titles: HashSet<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        let mut ordered: Vec<Page> = Vec::new();
        let mut page_sections: Vec<usize> = Vec::new();
        let mut slug_index: HashMap<String, usize> = HashMap::new();

        for (section_idx, section) in sections.iter().enumerate() {
            for item in &section.items {
                if let Some(&existing) = slug_index.get(&item.slug) {
                    return Err(RegistryError::DuplicateSlug {
                        slug: item.slug.clone(),
                        first: sections[page_sections[existing]].title.clone(),
                        second: section.title.clone(),
                    });
                }

                let page = content
                    .remove(&item.slug)
                    .ok_or_else(|| RegistryError::MissingPage(item.slug.clone()))?;

                if !titles.contains(page.section.as_str()) {
                    return Err(RegistryError::UnknownSection {
                        slug: page.slug,
                        section: page.section,
                    });
                }
                if page.section != section.title {
                    tracing::warn!(
                        slug = %page.slug,
                        page_section = %page.section,
                        sidebar_section = %section.title,
                        "Page section differs from the sidebar section listing it"
                    );
                }
                warn_missing_anchors(&page);

                slug_index.insert(item.slug.clone(), ordered.len());
                page_sections.push(section_idx);
                ordered.push(page);
            }
        }

        if ordered.is_empty() {
            return Err(RegistryError::EmptyRegistry);
        }

        for slug in content.keys() {
            tracing::warn!(%slug, "Page is not listed in any section and will not be navigable");
        }

        let nav_links = compute_nav_links(&sections, &page_sections, &ordered);

        tracing::info!(
            sections = sections.len(),
            pages = ordered.len(),
            "Built docs registry"
        );

        Ok(Registry {
            sections,
            pages: ordered,
            page_sections,
            nav_links,
            slug_index,
            key_index,
        })
    }
}

/// Log TOC entries whose anchor has no matching heading in the body.
fn warn_missing_anchors(page: &Page) {
    if page.toc.is_empty() {
        return;
    }
    let ids = heading_ids(&page.body);
    for entry in &page.toc {
        if !ids.contains(&entry.id) {
            tracing::warn!(
                slug = %page.slug,
                anchor = %entry.id,
                "TOC anchor has no matching heading in the page body"
            );
        }
    }
}

/// Compute prev/next links over the flattened page order.
///
/// Labels come from the sidebar entry of the neighbouring page.
fn compute_nav_links(sections: &[Section], page_sections: &[usize], pages: &[Page]) -> Vec<NavLinks> {
    let page_ref = |idx: usize| {
        let slug = &pages[idx].slug;
        let label = sections[page_sections[idx]]
            .items
            .iter()
            .find(|item| &item.slug == slug)
            .map_or_else(|| slug.clone(), |item| item.label.clone());
        PageRef::new(label, slug.clone())
    };

    (0..pages.len())
        .map(|idx| NavLinks {
            prev: idx.checked_sub(1).map(page_ref),
            next: (idx + 1 < pages.len()).then(|| page_ref(idx + 1)),
        })
        .collect()
}

//! Documentation page content.

use pulldown_cmark::{Event, Options, Parser, Tag, html};
use serde::{Deserialize, Serialize};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Entry text.
    pub label: String,
    /// Anchor ID of the heading it links to.
    pub id: String,
    /// Nesting depth (0 for top-level headings).
    #[serde(default)]
    pub depth: u8,
}

/// Document page data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Stable identifier, unique across the registry.
    pub slug: String,
    /// Page title.
    pub title: String,
    /// One-line summary shown under the title.
    #[serde(default)]
    pub subtitle: String,
    /// Title of the owning section.
    pub section: String,
    /// In-page anchors shown in the side panel.
    #[serde(default)]
    pub toc: Vec<TocEntry>,
    /// Markdown body. Headings carry explicit ids (`## Title {#anchor}`).
    #[serde(default)]
    pub body: String,
}

/// Result of rendering a page body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedBody {
    /// Rendered HTML content.
    pub html: String,
    /// Heading ids in document order.
    pub heading_ids: Vec<String>,
}

fn parser_options() -> Options {
    Options::ENABLE_HEADING_ATTRIBUTES | Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

impl Page {
    /// Check whether the page lists `anchor` in its table of contents.
    #[must_use]
    pub fn has_anchor(&self, anchor: &str) -> bool {
        self.toc.iter().any(|entry| entry.id == anchor)
    }

    /// Render the markdown body to HTML.
    #[must_use]
    pub fn render_html(&self) -> RenderedBody {
        let mut heading_ids = Vec::new();
        let parser = Parser::new_ext(&self.body, parser_options()).inspect(|event| {
            if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
                heading_ids.push(id.to_string());
            }
        });

        let mut html = String::with_capacity(self.body.len() * 3 / 2);
        html::push_html(&mut html, parser);

        RenderedBody { html, heading_ids }
    }
}

/// Collect heading ids from a markdown body without rendering it.
#[must_use]
pub fn heading_ids(markdown: &str) -> Vec<String> {
    Parser::new_ext(markdown, parser_options())
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect()
}

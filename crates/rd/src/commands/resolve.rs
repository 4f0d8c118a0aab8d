//! `rd resolve` command implementation.

use clap::Args;
use rd_content::PageRef;
use rd_nav::QueryParams;
use serde::Serialize;

use super::Context;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// URL or query string (e.g. "?agents=creating-agents").
    url: String,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

/// Resolution result.
#[derive(Debug, Serialize)]
pub(crate) struct Resolution {
    slug: String,
    anchor: String,
    section_key: String,
    title: String,
    /// Whether the anchor is one of the page's TOC entries.
    anchor_in_toc: bool,
    /// Canonical query for the resolved location.
    canonical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prev: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<PageRef>,
}

impl ResolveArgs {
    /// Execute the resolve command.
    pub(crate) fn execute(self, ctx: &Context, output: &Output) -> Result<(), CliError> {
        let resolution = resolve(ctx, &self.url);

        if self.json {
            output.print(&serde_json::to_string_pretty(&resolution)?);
            return Ok(());
        }

        output.highlight(&resolution.title);
        output.print(&format!("slug:     {}", resolution.slug));
        output.print(&format!("section:  {}", resolution.section_key));
        if !resolution.anchor.is_empty() {
            let note = if resolution.anchor_in_toc {
                ""
            } else {
                " (not in page TOC)"
            };
            output.print(&format!("anchor:   {}{note}", resolution.anchor));
        }
        output.print(&format!("url:      {}", resolution.canonical));
        if let Some(prev) = &resolution.prev {
            output.muted(&format!("prev:     {} ({})", prev.label, prev.slug));
        }
        if let Some(next) = &resolution.next {
            output.muted(&format!("next:     {} ({})", next.label, next.slug));
        }
        Ok(())
    }
}

/// Resolve `url` against the context's registry.
pub(crate) fn resolve(ctx: &Context, url: &str) -> Resolution {
    let resolver = &ctx.resolver;
    let location = resolver.resolve(&QueryParams::parse(url));
    let page = resolver.registry().page(&location.slug);
    let links = resolver.registry().nav_links(&location.slug);

    Resolution {
        section_key: resolver.section_key_for(&location.slug).to_owned(),
        title: page.map(|p| p.title.clone()).unwrap_or_default(),
        anchor_in_toc: page.is_some_and(|p| p.has_anchor(&location.anchor)),
        canonical: resolver.href(&location.slug, Some(&location.anchor)),
        prev: links.prev,
        next: links.next,
        slug: location.slug,
        anchor: location.anchor,
    }
}

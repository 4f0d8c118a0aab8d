//! `rd pages` command implementation.

use clap::Args;
use serde::Serialize;

use super::Context;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    /// Print the listing as JSON.
    #[arg(long)]
    json: bool,
}

/// One row of the page listing.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub(crate) struct PageRow<'a> {
    section: &'a str,
    key: &'a str,
    label: &'a str,
    slug: &'a str,
    href: String,
}

impl PagesArgs {
    /// Execute the pages command.
    pub(crate) fn execute(self, ctx: &Context, output: &Output) -> Result<(), CliError> {
        let rows = rows(ctx);

        if self.json {
            output.print(&serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        let mut current_section = "";
        for row in &rows {
            if row.section != current_section {
                output.highlight(row.section);
                current_section = row.section;
            }
            output.print(&format!("  {:<24} {}", row.label, row.href));
        }
        output.muted(&format!("{} pages", rows.len()));
        Ok(())
    }
}

/// Sidebar entries in navigation order.
fn rows(ctx: &Context) -> Vec<PageRow<'_>> {
    ctx.registry()
        .sections()
        .iter()
        .flat_map(|section| {
            section.items.iter().map(move |item| PageRow {
                section: &section.title,
                key: &section.key,
                label: &item.label,
                slug: &item.slug,
                href: ctx.resolver.href(&item.slug, None),
            })
        })
        .collect()
}

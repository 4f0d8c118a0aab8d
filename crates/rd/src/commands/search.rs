//! `rd search` command implementation.

use std::sync::Arc;

use clap::Args;
use rd_nav::{NavState, QueryParams, SidebarGroup};

use super::Context;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Filter text, matched case-insensitively against sidebar labels.
    #[arg(default_value = "")]
    text: String,

    /// URL whose page is marked as active.
    #[arg(long, default_value = "")]
    url: String,
}

impl SearchArgs {
    /// Execute the search command.
    pub(crate) fn execute(self, ctx: &Context, output: &Output) -> Result<(), CliError> {
        let (mut state, _) = NavState::mount(
            Arc::clone(&ctx.resolver),
            ctx.scroll,
            &QueryParams::parse(&self.url),
        );
        state.set_filter(self.text.as_str());

        let groups = state.sidebar();
        if groups.is_empty() {
            output.muted(&format!("No pages match \"{}\"", self.text));
            return Ok(());
        }

        for group in &groups {
            output.highlight(&group.title);
            for line in item_lines(ctx, group, state.slug()) {
                output.print(&line);
            }
        }
        Ok(())
    }
}

fn item_lines(ctx: &Context, group: &SidebarGroup<'_>, active_slug: &str) -> Vec<String> {
    group
        .items
        .iter()
        .map(|item| {
            let marker = if item.slug == active_slug { '>' } else { ' ' };
            format!(
                "{marker} {:<24} {}",
                item.label,
                ctx.resolver.href(&item.slug, None)
            )
        })
        .collect()
}

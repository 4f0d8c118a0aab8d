//! `rd link` command implementation.

use clap::Args;

use super::Context;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the link command.
#[derive(Args)]
pub(crate) struct LinkArgs {
    /// Page slug.
    slug: String,

    /// In-page anchor id.
    #[arg(short, long)]
    anchor: Option<String>,

    /// Append the `#anchor` fragment, as table of contents links do.
    #[arg(long, requires = "anchor")]
    fragment: bool,
}

impl LinkArgs {
    /// Execute the link command.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is not a page.
    pub(crate) fn execute(self, ctx: &Context, output: &Output) -> Result<(), CliError> {
        output.print(&self.link(ctx)?);
        Ok(())
    }

    fn link(&self, ctx: &Context) -> Result<String, CliError> {
        let Some(page) = ctx.registry().page(&self.slug) else {
            return Err(CliError::Validation(format!("Unknown page: {}", self.slug)));
        };
        let anchor = self.anchor.as_deref();

        if let Some(anchor) = anchor
            && !page.has_anchor(anchor)
        {
            tracing::warn!(slug = %self.slug, %anchor, "Anchor is not in the page's table of contents");
        }

        Ok(match anchor {
            Some(anchor) if self.fragment => ctx.resolver.toc_href(&self.slug, anchor),
            _ => ctx.resolver.href(&self.slug, anchor),
        })
    }
}

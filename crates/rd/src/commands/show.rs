//! `rd show` command implementation.

use std::sync::Arc;

use clap::Args;
use rd_nav::{Effect, NavState, QueryParams};

use super::Context;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// URL or query string selecting the page.
    #[arg(default_value = "")]
    url: String,

    /// Print only the rendered HTML body.
    #[arg(long)]
    html: bool,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected page has no content.
    pub(crate) fn execute(self, ctx: &Context, output: &Output) -> Result<(), CliError> {
        let (state, effects) = NavState::mount(
            Arc::clone(&ctx.resolver),
            ctx.scroll,
            &QueryParams::parse(&self.url),
        );
        let Some(page) = state.current_page() else {
            return Err(CliError::Validation(format!(
                "No content for page: {}",
                state.slug()
            )));
        };
        let rendered = page.render_html();

        if self.html {
            output.print(&rendered.html);
            return Ok(());
        }

        let trail: Vec<String> = state.breadcrumbs().into_iter().map(|c| c.title).collect();
        output.muted(&trail.join(" / "));
        output.highlight(&page.title);
        if !page.subtitle.is_empty() {
            output.print(&page.subtitle);
        }

        let toc = toc_lines(&state);
        if !toc.is_empty() {
            output.print("");
            output.highlight("On this page");
            for line in &toc {
                output.print(line);
            }
        }

        output.print("");
        output.print(&rendered.html);

        let links = state.nav_links();
        if let Some(prev) = &links.prev {
            output.muted(&format!("<- {}  {}", prev.label, ctx.resolver.href(&prev.slug, None)));
        }
        if let Some(next) = &links.next {
            output.muted(&format!("-> {}  {}", next.label, ctx.resolver.href(&next.slug, None)));
        }

        for effect in &effects {
            if let Some(note) = describe_effect(effect) {
                output.muted(&note);
            }
        }
        Ok(())
    }
}

fn toc_lines(state: &NavState) -> Vec<String> {
    state
        .toc()
        .iter()
        .map(|item| {
            let marker = if item.active { '>' } else { ' ' };
            let indent = "  ".repeat(usize::from(item.entry.depth));
            format!("{marker} {indent}{}", item.entry.label)
        })
        .collect()
}

fn describe_effect(effect: &Effect) -> Option<String> {
    match effect {
        Effect::ScrollToAnchor { anchor, delay } => Some(match delay {
            Some(delay) => format!("scroll to #{anchor} after {}ms", delay.as_millis()),
            None => format!("scroll to #{anchor}"),
        }),
        Effect::ScrollToTop | Effect::PushUrl(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;
    use pretty_assertions::assert_eq;

    fn mount(ctx: &Context, url: &str) -> (NavState, Vec<Effect>) {
        NavState::mount(Arc::clone(&ctx.resolver), ctx.scroll, &QueryParams::parse(url))
    }

    #[test]
    fn test_toc_lines_mark_active_anchor() {
        let ctx = test_context();
        let (state, _) = mount(&ctx, "?sessions=terminal&section=t-manual");

        let lines = toc_lines(&state);

        let active: Vec<&String> = lines.iter().filter(|l| l.starts_with('>')).collect();
        assert_eq!(active.len(), 1);
        assert!(active[0].ends_with("Manual commands"), "{}", active[0]);
    }

    #[test]
    fn test_toc_lines_without_anchor() {
        let ctx = test_context();
        let (state, _) = mount(&ctx, "?agents=creating-agents");

        let lines = toc_lines(&state);

        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| l.starts_with(' ')));
    }

    #[test]
    fn test_describe_mount_scroll() {
        let ctx = test_context();
        let (_, effects) = mount(&ctx, "?sessions=terminal&section=t-manual");

        let notes: Vec<String> = effects.iter().filter_map(describe_effect).collect();

        assert_eq!(notes, vec!["scroll to #t-manual after 100ms".to_owned()]);
    }

    #[test]
    fn test_describe_immediate_scroll() {
        let effect = Effect::ScrollToAnchor {
            anchor: "x".to_owned(),
            delay: None,
        };

        assert_eq!(describe_effect(&effect), Some("scroll to #x".to_owned()));
        assert_eq!(describe_effect(&Effect::ScrollToTop), None);
    }
}

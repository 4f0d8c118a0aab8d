//! RD CLI - Docs navigator.
//!
//! Provides commands for:
//! - `resolve`: Show which page and anchor a URL selects
//! - `link`: Build the shareable query for a page
//! - `search`: Filter the sidebar like the docs search box
//! - `show`: Render the page a URL selects
//! - `pages`: List pages in navigation order

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GlobalArgs, LinkArgs, PagesArgs, ResolveArgs, SearchArgs, ShowArgs};
use output::Output;

/// RD - Docs navigator.
#[derive(Parser)]
#[command(name = "rd", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URL or query string to a page and anchor.
    Resolve(ResolveArgs),
    /// Build the query string for a page.
    Link(LinkArgs),
    /// Filter the sidebar by label.
    Search(SearchArgs),
    /// Render the page selected by a URL.
    Show(ShowArgs),
    /// List pages in navigation order.
    Pages(PagesArgs),
}

/// Log level used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// `--verbose` enables DEBUG level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.global.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = commands::Context::load(&cli.global).and_then(|ctx| match cli.command {
        Commands::Resolve(args) => args.execute(&ctx, &output),
        Commands::Link(args) => args.execute(&ctx, &output),
        Commands::Search(args) => args.execute(&ctx, &output),
        Commands::Show(args) => args.execute(&ctx, &output),
        Commands::Pages(args) => args.execute(&ctx, &output),
    });

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

//! URL resolution and navigation state for the docs viewer.
//!
//! This crate provides:
//! - [`QueryParams`]: ordered query string codec
//! - [`Resolver`]: mapping between query parameters and the selected page/anchor
//! - [`NavState`]: framework-independent state machine emitting [`Effect`]s
//! - [`filter_sidebar`]: case-insensitive sidebar search
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use rd_config::ScrollConfig;
//! use rd_content::Registry;
//! use rd_nav::{Effect, NavState, QueryParams, Resolver};
//!
//! let registry = Arc::new(Registry::builtin()?);
//! let resolver = Arc::new(Resolver::with_defaults(registry)?);
//!
//! let query = QueryParams::parse("?sessions=terminal&section=t-manual");
//! let (mut state, _effects) = NavState::mount(resolver, ScrollConfig::default(), &query);
//! assert_eq!(state.slug(), "terminal");
//!
//! let effects = state.select_page("presets", None);
//! assert_eq!(effects[0], Effect::PushUrl("?configuration=presets".to_owned()));
//! # Ok(())
//! # }
//! ```

mod error;
mod filter;
mod query;
mod resolver;
mod state;

pub use error::NavError;
pub use filter::{SidebarGroup, filter_sidebar, matches};
pub use query::QueryParams;
pub use resolver::{Location, Resolver};
pub use state::{BreadcrumbItem, Effect, NavState, TocItem};

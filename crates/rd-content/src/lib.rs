//! Documentation content registry.
//!
//! This crate provides:
//! - [`Registry`]: immutable table of sections and pages with O(1) slug lookups
//! - [`RegistryBuilder`]: validated construction from section and page definitions
//! - [`section_key`]: the slugification rule used for URL query keys
//! - Built-in content for the Rune documentation site
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rd_content::Registry;
//!
//! let registry = Registry::builtin()?;
//!
//! let links = registry.nav_links("creating-agents");
//! assert_eq!(links.prev.unwrap().slug, "agent-overview");
//! assert_eq!(registry.section_of("terminal").unwrap().key, "sessions");
//! # Ok(())
//! # }
//! ```

mod page;
mod registry;
mod section;

pub use page::{Page, RenderedBody, TocEntry, heading_ids};
pub use registry::{NavLinks, Registry, RegistryBuilder, RegistryError};
pub use section::{PageRef, Section, section_key};

//! CLI command implementations.

pub(crate) mod link;
pub(crate) mod pages;
pub(crate) mod resolve;
pub(crate) mod search;
pub(crate) mod show;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use rd_config::{CliSettings, Config, ScrollConfig};
use rd_content::Registry;
use rd_nav::Resolver;

use crate::error::CliError;

pub(crate) use link::LinkArgs;
pub(crate) use pages::PagesArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use search::SearchArgs;
pub(crate) use show::ShowArgs;

/// Arguments shared by all commands.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover rd.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Content file (overrides config; default: built-in docs).
    #[arg(long, global = true, env = "RD_CONTENT")]
    content: Option<PathBuf>,

    /// Landing page for URLs that select nothing (overrides config).
    #[arg(long, global = true)]
    default_slug: Option<String>,

    /// Enable verbose output (debug logs).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Loaded configuration and resolver shared by commands.
pub(crate) struct Context {
    pub resolver: Arc<Resolver>,
    pub scroll: ScrollConfig,
}

impl Context {
    /// Load configuration, build the registry and the resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or content is invalid.
    pub(crate) fn load(args: &GlobalArgs) -> Result<Self, CliError> {
        let cli_settings = CliSettings {
            default_slug: args.default_slug.clone(),
            content_path: args.content.clone(),
        };
        let config = Config::load(args.config.as_deref(), Some(&cli_settings))?;
        Self::from_config(&config)
    }

    /// Build the context from an already loaded configuration.
    pub(crate) fn from_config(config: &Config) -> Result<Self, CliError> {
        let registry = match &config.docs_resolved.content_path {
            Some(path) => Registry::load(path)?,
            None => Registry::builtin()?,
        };
        let resolver = Resolver::new(Arc::new(registry), &config.docs_resolved)?;

        Ok(Self {
            resolver: Arc::new(resolver),
            scroll: config.scroll,
        })
    }

    pub(crate) fn registry(&self) -> &Registry {
        self.resolver.registry()
    }
}

#[cfg(test)]
pub(crate) fn test_context() -> Context {
    Context::from_config(&Config::default()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config_uses_builtin_content() {
        let ctx = test_context();

        assert_eq!(ctx.registry().len(), 27);
        assert_eq!(ctx.resolver.default_slug(), "introduction");
    }

    #[test]
    fn test_from_config_with_content_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("docs.yaml"),
            "sections:\n  - title: Guide\n    items: [{ label: Start, slug: start }]\npages:\n  - { slug: start, title: Start, section: Guide }\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("rd.toml"),
            "[docs]\ndefault_slug = \"start\"\nfallback_section = \"guide\"\ncontent = \"docs.yaml\"\n",
        )
        .unwrap();
        let config = Config::load(Some(&dir.path().join("rd.toml")), None).unwrap();

        let ctx = Context::from_config(&config).unwrap();

        assert_eq!(ctx.registry().len(), 1);
        assert_eq!(ctx.resolver.section_key_for("start"), "guide");
    }

    #[test]
    fn test_from_config_rejects_unknown_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rd.toml"), "[docs]\ndefault_slug = \"nope\"\n").unwrap();
        let config = Config::load(Some(&dir.path().join("rd.toml")), None).unwrap();

        let err = Context::from_config(&config).err().unwrap();

        assert!(matches!(err, CliError::Nav(_)));
    }

    #[test]
    fn test_from_config_rejects_unknown_fallback_section() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rd.toml"), "[docs]\nfallback_section = \"guide\"\n").unwrap();
        let config = Config::load(Some(&dir.path().join("rd.toml")), None).unwrap();

        let err = Context::from_config(&config).err().unwrap();

        assert!(err.to_string().contains("Fallback section 'guide'"), "{err}");
    }
}

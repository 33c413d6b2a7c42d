//! Loading shared by all commands: config, content scan, sidebar resolution.

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config};
use sitenav_content::Scanner;
use sitenav_tree::{ContentRegistry, ResolvedSite, resolve_source};

use crate::error::CliError;

/// Arguments selecting the site to resolve.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Sidebar file, .yaml/.yml/.toml/.json (overrides config).
    #[arg(long, env = "SITENAV_SIDEBAR")]
    sidebar: Option<PathBuf>,

    /// Fail on any validation error (default unless configured otherwise).
    #[arg(long)]
    strict: bool,

    /// Report validation errors as warnings.
    #[arg(long, conflicts_with = "strict")]
    lenient: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything a command needs after loading.
pub(crate) struct LoadedSite {
    pub config: Config,
    pub registry: ContentRegistry,
    pub site: ResolvedSite,
}

impl SourceArgs {
    /// Load config, discover content, and resolve the sidebar.
    ///
    /// Alias table problems are appended to the site's error list.
    pub(crate) fn load(self) -> Result<LoadedSite, CliError> {
        let strict = self.resolve_strict();
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            sidebar: self.sidebar,
            strict,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let docs = &config.docs_resolved;
        let registry = Scanner::new(docs.source_dir.clone(), docs.extensions.clone()).registry();
        let sidebar = config.load_sidebar()?;

        let mut site = resolve_source(&sidebar, &registry);
        let alias_errors = config.aliases.check(&site, &registry);
        site.extend_errors(alias_errors);

        tracing::info!(
            documents = registry.len(),
            leaves = site.sequence().len(),
            errors = site.errors().len(),
            "Site resolved"
        );

        Ok(LoadedSite {
            config,
            registry,
            site,
        })
    }

    /// Resolve strict mode from --strict/--lenient flags.
    fn resolve_strict(&self) -> Option<bool> {
        self.lenient
            .then_some(false)
            .or(self.strict.then_some(true))
    }
}

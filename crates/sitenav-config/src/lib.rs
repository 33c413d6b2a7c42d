//! Configuration management for sitenav.
//!
//! Parses `sitenav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `site.base_path`
//!
//! ## Sidebar
//!
//! The sidebar is either a separate file (`docs.sidebar`, YAML, TOML or JSON
//! by extension) or an inline `[sidebar]` table. See [`Config::load_sidebar`].

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sitenav_tree::{AliasTable, LinkStyle, Policy, SidebarSource};

use crate::expand::expand_env;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override sidebar file.
    pub sidebar: Option<PathBuf>,
    /// Override strict mode.
    pub strict: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitenav.toml";

/// Document extensions used when `docs.extensions` is not set.
const DEFAULT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site presentation settings.
    pub site: SiteConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Validation settings.
    pub check: CheckConfig,
    /// Redirects from old document paths.
    pub aliases: AliasTable,
    /// Inline sidebar (alternative to `docs.sidebar`).
    sidebar: Option<SidebarSource>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site presentation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Public site URL.
    pub url: Option<String>,
    /// Prefix for every link (empty, or starting with `/`).
    pub base_path: String,
    /// Whether exported links end with `/`.
    pub trailing_slash: bool,
    /// Stylesheets the renderer includes after its own.
    pub custom_css: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            url: None,
            base_path: String::new(),
            trailing_slash: true,
            custom_css: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Link formatting derived from `base_path` and `trailing_slash`.
    #[must_use]
    pub fn link_style(&self) -> LinkStyle {
        LinkStyle {
            base_path: self.base_path.clone(),
            trailing_slash: self.trailing_slash,
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    sidebar: Option<String>,
    extensions: Option<Vec<String>>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for documents.
    pub source_dir: PathBuf,
    /// Sidebar file, if the sidebar is not inline.
    pub sidebar: Option<PathBuf>,
    /// Document file extensions without the dot.
    pub extensions: Vec<String>,
}

/// Validation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Treat any validation error as fatal.
    pub strict: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl CheckConfig {
    #[must_use]
    pub fn policy(&self) -> Policy {
        if self.strict {
            Policy::Strict
        } else {
            Policy::Lenient
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Sidebar file could not be read or parsed.
    #[error("Sidebar error in {}: {message}", path.display())]
    Sidebar {
        /// Sidebar file.
        path: PathBuf,
        /// Parser or I/O message.
        message: String,
    },
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitenav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(sidebar) = &settings.sidebar {
            self.docs_resolved.sidebar = Some(sidebar.clone());
        }
        if let Some(strict) = settings.strict {
            self.check.strict = strict;
        }
    }

    /// Load the sidebar description.
    ///
    /// A sidebar file (from `docs.sidebar` or the CLI) takes precedence over
    /// an inline `[sidebar]` table. Without either, the sidebar is empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Sidebar` if the file cannot be read or parsed,
    /// or `ConfigError::Validation` for an unsupported file extension.
    pub fn load_sidebar(&self) -> Result<SidebarSource, ConfigError> {
        let Some(path) = &self.docs_resolved.sidebar else {
            return Ok(self.sidebar.clone().unwrap_or_default());
        };

        let sidebar_error = |message: String| ConfigError::Sidebar {
            path: path.clone(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| sidebar_error(e.to_string()))?;

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let source: SidebarSource = match extension.as_str() {
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| sidebar_error(e.to_string()))?
            }
            "toml" => toml::from_str(&content).map_err(|e| sidebar_error(e.to_string()))?,
            "json" => serde_json::from_str(&content).map_err(|e| sidebar_error(e.to_string()))?,
            _ => {
                return Err(ConfigError::Validation(format!(
                    "unsupported sidebar format: {} (expected .yaml, .yml, .toml or .json)",
                    path.display()
                )));
            }
        };

        tracing::debug!(
            path = %path.display(),
            items = source.items.len(),
            fragments = source.fragments.len(),
            "Sidebar loaded"
        );
        Ok(source)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            check: CheckConfig::default(),
            aliases: AliasTable::default(),
            sidebar: None,
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                sidebar: None,
                extensions: default_extensions(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before validation
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_docs()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.site.url {
            require_http_url(url, "site.url")?;
        }
        let base_path = &self.site.base_path;
        if !base_path.is_empty() && (!base_path.starts_with('/') || base_path.ends_with('/')) {
            return Err(ConfigError::Validation(
                "site.base_path must be empty or start with \"/\" and not end with \"/\""
                    .to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        if self.docs_resolved.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "docs.extensions cannot be empty".to_owned(),
            ));
        }
        if self.docs.sidebar.is_some() && self.sidebar.is_some() {
            return Err(ConfigError::Validation(
                "docs.sidebar and an inline [sidebar] table are mutually exclusive".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variables in string fields.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(url) = &self.site.url {
            self.site.url = Some(expand_env(url, "site.url")?);
        }
        self.site.base_path = expand_env(&self.site.base_path, "site.base_path")?;
        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = self.docs.source_dir.as_deref().unwrap_or("docs");
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(source_dir),
            sidebar: self.docs.sidebar.as_deref().map(|s| config_dir.join(s)),
            extensions: self
                .docs
                .extensions
                .clone()
                .unwrap_or_else(default_extensions),
        };
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_owned()).collect()
}

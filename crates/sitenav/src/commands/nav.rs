//! `sitenav nav` command implementation.
//!
//! Writes the resolved site as JSON for the renderer: the sidebar forest, the
//! sequential page list with hrefs and previous/next links, redirect stubs
//! and the validation errors.

use clap::Args;
use serde::Serialize;
use sitenav_config::Config;
use sitenav_tree::{LinkStyle, NavNode, ResolvedSite, ValidationError};

use super::source::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

/// Render-ready site map.
#[derive(Debug, Serialize)]
struct NavExport<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    custom_css: &'a [String],
    forest: &'a [NavNode],
    pages: Vec<PageLinks<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    redirects: Vec<Redirect>,
    errors: &'a [ValidationError],
}

/// One page in sequential order with its footer links.
#[derive(Debug, Serialize)]
struct PageLinks<'a> {
    index: usize,
    label: &'a str,
    path: &'a str,
    href: String,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    trail: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
}

#[derive(Debug, Serialize)]
struct Redirect {
    from: String,
    to: String,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// The JSON is always written; in strict mode a site with validation
    /// errors still fails afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or writing fails, or if validation errors
    /// were found in strict mode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loaded = self.source.load()?;

        let export = build_export(&loaded.config, &loaded.site);
        let json = if self.pretty {
            serde_json::to_string_pretty(&export)?
        } else {
            serde_json::to_string(&export)?
        };
        output.data(&json)?;

        let policy = loaded.config.check.policy();
        if loaded.site.passes(policy) {
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} sidebar problems (strict mode); run `sitenav check` for details",
                loaded.site.errors().len()
            )))
        }
    }
}

fn build_export<'a>(config: &'a Config, site: &'a ResolvedSite) -> NavExport<'a> {
    let links = config.site.link_style();

    let pages = site
        .sequence()
        .iter()
        .map(|entry| {
            let neighbors = site.neighbors_at(entry.index);
            PageLinks {
                index: entry.index,
                label: &entry.leaf.label,
                path: &entry.leaf.path,
                href: links.href(&entry.leaf.path),
                trail: &entry.trail,
                previous: neighbors.previous.map(|e| links.href(&e.leaf.path)),
                next: neighbors.next.map(|e| links.href(&e.leaf.path)),
            }
        })
        .collect();

    NavExport {
        title: &config.site.title,
        url: config.site.url.as_deref(),
        custom_css: &config.site.custom_css,
        forest: site.forest(),
        pages,
        redirects: redirects(config, &links),
        errors: site.errors(),
    }
}

fn redirects(config: &Config, links: &LinkStyle) -> Vec<Redirect> {
    config
        .aliases
        .iter()
        .map(|(from, to)| Redirect {
            from: links.href(from),
            to: links.href(to),
        })
        .collect()
}

//! `sitenav check` command implementation.

use clap::Args;
use sitenav_tree::{Policy, ValidationError};

use super::source::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, or if validation errors were found
    /// in strict mode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loaded = self.source.load()?;
        let policy = loaded.config.check.policy();
        let site = &loaded.site;

        output.highlight(&format!("Checking sidebar of {}", loaded.config.site.title));
        output.info(&format!(
            "Source directory: {}",
            loaded.config.docs_resolved.source_dir.display()
        ));
        output.info(&format!(
            "{} documents, {} sidebar entries, {} aliases",
            loaded.registry.len(),
            site.sequence().len(),
            loaded.config.aliases.len()
        ));

        for error in site.errors() {
            let line = format_error(error);
            match policy {
                Policy::Strict => output.error(&line),
                Policy::Lenient => output.warning(&line),
            }
        }

        if site.is_clean() {
            output.success("Sidebar OK");
            return Ok(());
        }

        let summary = summary(site.errors().len(), policy);
        if site.passes(policy) {
            output.warning(&summary);
            Ok(())
        } else {
            Err(CliError::Validation(summary))
        }
    }
}

fn format_error(error: &ValidationError) -> String {
    let marker = if error.kind.is_fatal() { "!!" } else { "  " };
    format!("{marker} {error}")
}

fn summary(count: usize, policy: Policy) -> String {
    let noun = if count == 1 { "problem" } else { "problems" };
    match policy {
        Policy::Strict => format!("{count} sidebar {noun} (strict mode)"),
        Policy::Lenient => format!("{count} sidebar {noun} reported as warnings"),
    }
}

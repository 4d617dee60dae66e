//! Command to check a configuration tree without emitting the document.

use super::render::render_reporting;
use crate::error::CliError;
use crate::utils::{load_tree, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Check a configuration tree.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration tree to check (YAML); `-` reads stdin
    #[arg(long, short, value_name = "PATH", env = "CLOUDINIT_INPUT")]
    pub input: Option<PathBuf>,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let tree = load_tree(self.input.as_deref())?;
        let rendered = render_reporting(&tree, global)?;
        if rendered.warnings.is_empty() {
            println!("Configuration is valid");
        } else {
            println!(
                "Configuration is valid ({} warning{})",
                rendered.warnings.len(),
                if rendered.warnings.len() == 1 { "" } else { "s" }
            );
        }
        Ok(())
    }
}

//! Command to render a configuration tree to a cloud-config document.

use crate::error::CliError;
use crate::utils::{load_tree, write_output, GlobalOptions};
use clap::{Args, ValueEnum};
use coreos_cloudinit::{CloudConfigRenderer, ConfigTree, Rendered, Schema};
use serde::Serialize;
use std::path::PathBuf;

/// Output format for the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The document text
    Text,
    /// A JSON object with the text and warnings
    Json,
}

/// Render a configuration tree to a cloud-config document.
#[derive(Args)]
pub struct RenderCommand {
    /// Configuration tree to render (YAML); `-` reads stdin
    #[arg(long, short, value_name = "PATH", env = "CLOUDINIT_INPUT")]
    pub input: Option<PathBuf>,

    /// Write the document to a file instead of stdout
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Start the document with `#!cloud-config`
    #[arg(long, env = "CLOUDINIT_USE_SHEBANG")]
    pub shebang: bool,

    /// Print the content id (SHA-256 of the document)
    #[arg(long)]
    pub print_id: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    text: &'a str,
    warnings: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl RenderCommand {
    /// Execute the render command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut tree = load_tree(self.input.as_deref())?;
        if self.shebang {
            tree = force_shebang(&tree);
        }

        let rendered = render_reporting(&tree, global)?;
        let id = rendered.content_id();
        global
            .logger
            .info(&format!("rendered {} bytes, id {id}", rendered.text.len()));

        match self.format {
            OutputFormat::Json => {
                let output = JsonOutput {
                    text: &rendered.text,
                    warnings: &rendered.warnings,
                    id: self.print_id.then_some(id),
                };
                let mut json = serde_json::to_string_pretty(&output)?;
                json.push('\n');
                write_output(self.output.as_ref(), &json)
            }
            OutputFormat::Text => {
                write_output(self.output.as_ref(), &rendered.text)?;
                if self.print_id {
                    println!("{id}");
                }
                Ok(())
            }
        }
    }
}

/// Renders `tree`, reporting warnings through the logger on success and
/// failure alike.
pub(crate) fn render_reporting(
    tree: &ConfigTree,
    global: &GlobalOptions,
) -> Result<Rendered, CliError> {
    let schema = Schema::coreos();
    match CloudConfigRenderer::new(&schema).render(tree) {
        Ok(rendered) => {
            global.logger.warn_all(&rendered.warnings);
            Ok(rendered)
        }
        Err(failure) => {
            global.logger.warn_all(&failure.warnings);
            Err(failure.into())
        }
    }
}

fn force_shebang(tree: &ConfigTree) -> ConfigTree {
    ConfigTree::new(tree.root().clone().with("use_shebang", true))
}

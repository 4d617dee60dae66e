//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, RenderCommand, ValidateCommand};
use clap::{Parser, Subcommand};

/// Command-line tool for rendering CoreOS cloud-config documents.
#[derive(Parser)]
#[command(name = "coreos-cloudinit")]
#[command(version, about = "Render CoreOS cloud-config documents", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress warnings and other non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Render a configuration tree to a cloud-config document
    Render(RenderCommand),

    /// Check a configuration tree without printing the document
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

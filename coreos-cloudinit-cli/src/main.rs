//! Main entry point for the coreos-cloudinit CLI.
//!
//! This is the command-line host for the cloud-config renderer:
//! - `render`: Render a configuration tree to a document
//! - `validate`: Check a configuration tree
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let global = GlobalOptions {
        logger: coreos_cloudinit::init_logger(cli.verbose, cli.quiet),
    };

    let result = match cli.command {
        cli::Command::Render(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            global.logger.error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}

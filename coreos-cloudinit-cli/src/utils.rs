//! Utility functions for CLI operations.
//!
//! This module provides the helpers shared by commands: global options,
//! input loading and output writing.

use crate::error::CliError;
use coreos_cloudinit::{ConfigTree, Logger};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
pub struct GlobalOptions {
    /// Logger resolved from `--verbose`/`--quiet` and the environment.
    pub logger: Logger,
}

/// Loads a configuration tree from `path`, or stdin when `path` is `-` or
/// absent.
///
/// # Errors
///
/// Returns [`CliError::InvalidArguments`] when the file does not exist, an
/// I/O error when it cannot be read, and the library's parse error when the
/// YAML is malformed.
pub fn load_tree(path: Option<&Path>) -> Result<ConfigTree, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                return Err(CliError::InvalidArguments(format!(
                    "File not found: {}",
                    path.display()
                )));
            }
            Ok(ConfigTree::from_path(path)?)
        }
        _ => {
            let mut contents = String::new();
            io::stdin().read_to_string(&mut contents)?;
            Ok(ConfigTree::from_yaml_str(&contents)?)
        }
    }
}

/// Writes `text` to `path`, or stdout when no path is given.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_output(path: Option<&PathBuf>, text: &str) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}

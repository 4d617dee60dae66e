//! Common test utilities for integration tests.
//!
//! Fixture documents are written to a temporary directory so tests go
//! through the same file loading path a host uses.

use std::fs;
use std::path::PathBuf;

use coreos_cloudinit::{ConfigTree, RenderFailure, Rendered};
use tempfile::TempDir;

/// A YAML fixture written to a temporary file.
pub struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    /// Writes `yaml` to `config.yaml` in a fresh temporary directory.
    pub fn new(yaml: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.yaml");
        fs::write(&path, yaml).expect("Failed to write fixture");
        Self { _dir: dir, path }
    }

    /// Path of the fixture file.
    #[allow(dead_code)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Loads the fixture as a configuration tree.
    pub fn tree(&self) -> ConfigTree {
        ConfigTree::from_path(&self.path).expect("Failed to load fixture")
    }

    /// Loads and renders the fixture against the CoreOS catalog.
    pub fn render(&self) -> Result<Rendered, RenderFailure> {
        coreos_cloudinit::render(&self.tree())
    }
}

/// Renders an inline YAML document, panicking on failure.
#[allow(dead_code)]
pub fn render_yaml(yaml: &str) -> Rendered {
    Fixture::new(yaml).render().expect("Render failed")
}

//! Rendering of a configuration tree into a cloud-config document.
//!
//! [`CloudConfigRenderer`] is the assembler. It resolves the root block,
//! then runs the directive renderers in a fixed order over one
//! [`RenderBuffer`]:
//!
//! 1. header (`#cloud-config` or `#!cloud-config`)
//! 2. identity fields (hostname, ssh-authorized-keys, manage-etc-hosts)
//! 3. the `coreos:` section with its subsystem directives
//! 4. `units` (inside the `coreos:` section)
//! 5. `write_files`
//! 6. `users`
//!
//! Rendering stops at the first fatal error. Warnings accumulate across the
//! whole run and are returned on both success and failure.
//!
//! # Examples
//!
//! ```
//! use coreos_cloudinit::{CloudConfigRenderer, ConfigTree, Schema};
//!
//! let schema = Schema::coreos();
//! let renderer = CloudConfigRenderer::new(&schema);
//!
//! let rendered = renderer.render(&ConfigTree::default()).unwrap();
//! assert_eq!(rendered.text, "#cloud-config\ncoreos:\n");
//! assert!(rendered.warnings.is_empty());
//! ```

mod buffer;
mod format;
mod header;
mod identity;
mod subsystem;
mod units;
mod users;
mod write_files;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use buffer::RenderBuffer;
pub use format::{indent, needs_indent_indicator, needs_quoting, quote, reindent, scalar, INDENT};
pub use units::write_unit;
pub use users::write_user;
pub use write_files::write_file;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{Error, RenderFailure};
use crate::resolve::resolve_block;
use crate::schema::{DescriptorSet, Schema};
use crate::value::{Block, ConfigTree};

/// A successfully rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    /// The document text.
    pub text: String,
    /// Non-fatal findings, in the order they were recorded.
    pub warnings: Vec<String>,
}

impl Rendered {
    /// Lowercase hex SHA-256 of the document text.
    ///
    /// Identical input renders to identical text, so this is a stable
    /// content-addressed identifier for the document.
    ///
    /// # Examples
    ///
    /// ```
    /// use coreos_cloudinit::render;
    /// use coreos_cloudinit::ConfigTree;
    ///
    /// let a = render(&ConfigTree::default()).unwrap();
    /// let b = render(&ConfigTree::default()).unwrap();
    /// assert_eq!(a.content_id(), b.content_id());
    /// assert_eq!(a.content_id().len(), 64);
    /// ```
    #[must_use]
    pub fn content_id(&self) -> String {
        hex::encode(Sha256::digest(self.text.as_bytes()))
    }
}

/// State threaded through the directive renderers during one render.
pub(crate) struct RenderContext<'a> {
    /// The root descriptor set.
    pub(crate) set: &'a DescriptorSet,
    /// The resolved root block.
    pub(crate) root: &'a Block,
    pub(crate) buffer: RenderBuffer,
    pub(crate) warnings: Vec<String>,
}

/// One top-level concern of the document.
pub(crate) trait DirectiveRenderer {
    /// Name used in debug logging.
    fn name(&self) -> &'static str;

    /// Appends this directive's output to the context buffer.
    fn render(&self, ctx: &mut RenderContext<'_>) -> crate::Result<()>;
}

const DIRECTIVES: &[&dyn DirectiveRenderer] = &[
    &header::Header,
    &identity::Identity,
    &subsystem::Subsystems,
    &units::Units,
    &write_files::WriteFiles,
    &users::Users,
];

/// Renders configuration trees against a borrowed schema.
///
/// The renderer holds no per-render state, so one instance can serve any
/// number of renders, including concurrent ones.
#[derive(Debug, Clone, Copy)]
pub struct CloudConfigRenderer<'a> {
    schema: &'a Schema,
}

impl<'a> CloudConfigRenderer<'a> {
    /// Creates a renderer for `schema`.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Renders `tree` to a document.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderFailure`] carrying the first fatal error and every
    /// warning recorded before it. No partial text is returned.
    pub fn render(&self, tree: &ConfigTree) -> Result<Rendered, RenderFailure> {
        let mut warnings = Vec::new();
        let root = match resolve_block(self.schema.root(), tree.root(), "", &mut warnings) {
            Ok(root) => root,
            Err(error) => return Err(fail(error, warnings)),
        };

        let mut ctx = RenderContext {
            set: self.schema.root(),
            root: &root,
            buffer: RenderBuffer::new(),
            warnings,
        };

        for directive in DIRECTIVES {
            let before = ctx.buffer.len();
            if let Err(error) = directive.render(&mut ctx) {
                return Err(fail(error, ctx.warnings));
            }
            log::debug!(
                "rendered {} ({} bytes)",
                directive.name(),
                ctx.buffer.len() - before
            );
        }

        Ok(Rendered {
            text: ctx.buffer.into_string(),
            warnings: ctx.warnings,
        })
    }
}

fn fail(error: Error, warnings: Vec<String>) -> RenderFailure {
    log::debug!("render failed: {error}");
    RenderFailure { error, warnings }
}

/// Renders `tree` against the CoreOS catalog.
///
/// Convenience for one-off renders; build a [`Schema`] once and use
/// [`CloudConfigRenderer`] when rendering repeatedly.
///
/// # Errors
///
/// Same as [`CloudConfigRenderer::render`].
pub fn render(tree: &ConfigTree) -> Result<Rendered, RenderFailure> {
    let schema = Schema::coreos();
    CloudConfigRenderer::new(&schema).render(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ETCD_DEPRECATION;
    use crate::value::ConfigValue;

    fn tree(root: Block) -> ConfigTree {
        ConfigTree::new(root)
    }

    #[test]
    fn test_empty_tree() {
        let rendered = render(&ConfigTree::default()).unwrap();
        assert_eq!(rendered.text, "#cloud-config\ncoreos:\n");
    }

    #[test]
    fn test_section_order() {
        let root = Block::new()
            .with("user", Block::new().with("name", "core"))
            .with(
                "write_file",
                Block::new().with("path", "/etc/motd").with("content", "hi"),
            )
            .with(
                "systemd_unit",
                Block::new().with("name", "a.service").with("content", "x"),
            )
            .with("fleet", Block::new().with("verbosity", 1))
            .with("hostname", "core-01");
        let text = render(&tree(root)).unwrap().text;

        let positions: Vec<usize> = [
            "#cloud-config",
            "hostname:",
            "coreos:",
            "  fleet:",
            "  units:",
            "write_files:",
            "users:",
        ]
        .iter()
        .map(|needle| text.find(needle).unwrap())
        .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "{text}");
    }

    #[test]
    fn test_failure_keeps_earlier_warnings() {
        let root = Block::new()
            .with("manage_etc_hosts", "10.0.0.1")
            .with("etcd", Block::new().with("name", "node1"))
            .with(
                "update_strategy",
                Block::new().with("reboot_strategy", "sometimes"),
            );
        let failure = render(&tree(root)).unwrap_err();
        assert!(matches!(failure.error, Error::Validation { .. }));
        assert_eq!(failure.warnings.len(), 2);
        assert!(failure.warnings.iter().any(|w| w.contains(ETCD_DEPRECATION)));
    }

    #[test]
    fn test_root_failure_keeps_warnings() {
        let root = Block::new()
            .with("manage_etc_hosts", "10.0.0.1")
            .with("hostname", ConfigValue::list(["a"]));
        let failure = render(&tree(root)).unwrap_err();
        assert!(failure.error.is_descriptor_mismatch());
    }

    #[test]
    fn test_unit_error_after_subsystem_output_returns_no_text() {
        let root = Block::new()
            .with("fleet", Block::new().with("verbosity", 1))
            .with("systemd_unit", Block::new().with("name", "empty.service"));
        let failure = render(&tree(root)).unwrap_err();
        assert!(failure.error.is_structural());
    }

    #[test]
    fn test_content_id_changes_with_text() {
        let a = render(&ConfigTree::default()).unwrap();
        let b = render(&tree(Block::new().with("use_shebang", true))).unwrap();
        assert_ne!(a.content_id(), b.content_id());
        assert_eq!(
            a.content_id(),
            hex::encode(Sha256::digest(b"#cloud-config\ncoreos:\n"))
        );
    }

    #[test]
    fn test_rendered_serializes() {
        let rendered = Rendered {
            text: "#cloud-config\ncoreos:\n".into(),
            warnings: vec!["w".into()],
        };
        let json = serde_json::to_value(&rendered).unwrap();
        assert_eq!(json["warnings"][0], "w");
        assert_eq!(json["text"], "#cloud-config\ncoreos:\n");
    }

    #[test]
    fn test_renderer_is_reusable() {
        let schema = Schema::coreos();
        let renderer = CloudConfigRenderer::new(&schema);
        let t = tree(Block::new().with("hostname", "core-01"));
        assert_eq!(renderer.render(&t).unwrap(), renderer.render(&t).unwrap());
    }
}

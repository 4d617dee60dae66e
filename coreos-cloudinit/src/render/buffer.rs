//! The append-only text accumulator shared by renderers during one render.

use super::format::{indent, needs_indent_indicator, reindent, INDENT};

/// Append-only output buffer.
///
/// The buffer does not track depth; each renderer passes its own. All
/// writes end with a newline, so the buffer is always line-aligned.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::render::RenderBuffer;
///
/// let mut buf = RenderBuffer::new();
/// buf.key(0, "coreos");
/// buf.key(1, "units");
/// buf.entry_start(2, "name", "tst.mount");
/// buf.entry(3, "command", "start");
/// assert_eq!(
///     buf.as_str(),
///     "coreos:\n  units:\n    - name: tst.mount\n      command: start\n"
/// );
/// ```
#[derive(Debug, Default)]
pub struct RenderBuffer {
    text: String,
}

impl RenderBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a raw line at `depth`.
    pub fn line(&mut self, depth: usize, text: &str) {
        self.text.push_str(&indent(depth));
        self.text.push_str(text);
        self.text.push('\n');
    }

    /// Writes a mapping key that introduces nested content: `key:`.
    pub fn key(&mut self, depth: usize, key: &str) {
        self.line(depth, &format!("{key}:"));
    }

    /// Writes a `key: value` pair.
    pub fn entry(&mut self, depth: usize, key: &str, value: &str) {
        self.line(depth, &format!("{key}: {value}"));
    }

    /// Writes a sequence item holding a scalar: `- value`.
    pub fn item(&mut self, depth: usize, value: &str) {
        self.line(depth, &format!("- {value}"));
    }

    /// Opens a sequence item whose first field is `key: value`.
    ///
    /// Later fields of the same item belong at `depth + 1`.
    pub fn entry_start(&mut self, depth: usize, key: &str, value: &str) {
        self.line(depth, &format!("- {key}: {value}"));
    }

    /// Writes `key: |` followed by `content` reindented to `depth + 1`.
    ///
    /// Content whose first line is indented gets `|2` so the scalar keeps
    /// the key's nesting rather than the content's.
    pub fn block_scalar(&mut self, depth: usize, key: &str, content: &str) {
        if needs_indent_indicator(content) {
            self.line(depth, &format!("{key}: |{}", INDENT.len()));
        } else {
            self.line(depth, &format!("{key}: |"));
        }
        self.text.push_str(&reindent(content, depth + 1));
    }

    /// The text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the text written so far, in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consumes the buffer and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

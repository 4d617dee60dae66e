//! The top-level `write_files` sequence.

use super::buffer::RenderBuffer;
use super::format::{quote, scalar};
use super::{DirectiveRenderer, RenderContext};
use crate::model::WriteFile;
use crate::resolve::element_path;

const FIELD: &str = "write_file";

pub(crate) struct WriteFiles;

impl DirectiveRenderer for WriteFiles {
    fn name(&self) -> &'static str {
        "write_files"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> crate::Result<()> {
        let raw_files = ctx.root.blocks(FIELD);
        let Some(set) = ctx.set.children_of(FIELD) else {
            return Ok(());
        };
        if raw_files.is_empty() {
            return Ok(());
        }

        ctx.buffer.key(0, "write_files");
        for (i, raw) in raw_files.iter().enumerate() {
            let file = WriteFile::resolve(set, raw, &element_path(FIELD, i), &mut ctx.warnings)?;
            write_file(&mut ctx.buffer, 1, &file);
        }
        Ok(())
    }
}

/// Writes one file entry at `depth`: path, permissions, owner, encoding,
/// then the content block.
///
/// Permissions are always quoted so an octal mode is not read back as a
/// number; other values are quoted only when YAML would misread them.
pub fn write_file(buf: &mut RenderBuffer, depth: usize, file: &WriteFile) {
    let inner = depth + 1;
    buf.entry_start(depth, "path", &scalar(&file.path));
    if let Some(permissions) = file.permissions.as_deref().filter(|p| !p.is_empty()) {
        buf.entry(inner, "permissions", &quote(permissions));
    }
    if let Some(owner) = file.owner.as_deref().filter(|o| !o.is_empty()) {
        buf.entry(inner, "owner", &scalar(owner));
    }
    if let Some(encoding) = file.encoding.as_deref().filter(|e| !e.is_empty()) {
        buf.entry(inner, "encoding", &scalar(encoding));
    }
    buf.block_scalar(inner, "content", &file.content);
}

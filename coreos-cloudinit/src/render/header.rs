//! The opening line of the document.

use super::{DirectiveRenderer, RenderContext};

pub(crate) const HEADER: &str = "#cloud-config";
pub(crate) const SHEBANG_HEADER: &str = "#!cloud-config";

pub(crate) struct Header;

impl DirectiveRenderer for Header {
    fn name(&self) -> &'static str {
        "header"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> crate::Result<()> {
        let line = if ctx.root.flag("use_shebang") {
            SHEBANG_HEADER
        } else {
            HEADER
        };
        ctx.buffer.line(0, line);
        Ok(())
    }
}

//! Top-level identity fields: hostname, authorized keys, /etc/hosts handling.

use super::format::{quote, scalar};
use super::{DirectiveRenderer, RenderContext};
use crate::schema::FieldKind;

/// Identity fields in emission order.
const FIELDS: [&str; 3] = ["hostname", "ssh_authorized_keys", "manage_etc_hosts"];

pub(crate) struct Identity;

impl DirectiveRenderer for Identity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> crate::Result<()> {
        for name in FIELDS {
            let Some(descriptor) = ctx.set.get(name) else {
                continue;
            };
            if descriptor.kind() == FieldKind::ListOfString {
                let items = ctx.root.strings(name);
                if !items.is_empty() {
                    ctx.buffer.key(0, &descriptor.output_key());
                    for item in &items {
                        ctx.buffer.item(1, &quote(item));
                    }
                }
            } else if let Some(value) = ctx.root.string(name) {
                ctx.buffer.entry(0, &descriptor.output_key(), &scalar(value));
            }
        }
        Ok(())
    }
}

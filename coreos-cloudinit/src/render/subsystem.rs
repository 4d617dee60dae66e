//! The `coreos:` section and its single-instance subsystem directives.

use super::format::quote;
use super::{DirectiveRenderer, RenderContext};
use crate::resolve::resolve_block;
use crate::value::{ConfigValue, Scalar};

/// Subsystem directives in emission order, with their output keys.
const SUBSYSTEMS: [(&str, &str); 6] = [
    ("etcd", "etcd"),
    ("etcd2", "etcd2"),
    ("fleet", "fleet"),
    ("flannel", "flannel"),
    ("locksmith", "locksmith"),
    ("update_strategy", "update"),
];

pub(crate) struct Subsystems;

impl DirectiveRenderer for Subsystems {
    fn name(&self) -> &'static str {
        "subsystems"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> crate::Result<()> {
        // Written even when every directive is empty.
        ctx.buffer.key(0, "coreos");

        for (name, output_key) in SUBSYSTEMS {
            let (Some(raw), Some(set)) = (ctx.root.block(name), ctx.set.children_of(name)) else {
                continue;
            };
            let resolved = resolve_block(set, raw, name, &mut ctx.warnings)?;
            if resolved.is_empty() {
                continue;
            }

            ctx.buffer.key(1, output_key);
            for descriptor in set.iter() {
                if let Some(value) = resolved.get(descriptor.name()).and_then(format_value) {
                    ctx.buffer.entry(2, &descriptor.output_key(), &value);
                }
            }
        }
        Ok(())
    }
}

fn format_value(value: &ConfigValue) -> Option<String> {
    match value {
        ConfigValue::Scalar(Scalar::String(s)) => Some(quote(s)),
        ConfigValue::Scalar(scalar) => Some(scalar.to_string()),
        ConfigValue::List(items) => {
            let joined = items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            Some(quote(&joined))
        }
        ConfigValue::Block(_) | ConfigValue::Blocks(_) => None,
    }
}

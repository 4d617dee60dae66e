//! The `units` sequence inside the `coreos:` section.

use super::buffer::RenderBuffer;
use super::format::scalar;
use super::{DirectiveRenderer, RenderContext};
use crate::model::Unit;
use crate::resolve::element_path;

const FIELD: &str = "systemd_unit";

/// Depth of the `units:` key.
const UNITS_DEPTH: usize = 1;

pub(crate) struct Units;

impl DirectiveRenderer for Units {
    fn name(&self) -> &'static str {
        "units"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> crate::Result<()> {
        let raw_units = ctx.root.blocks(FIELD);
        let Some(set) = ctx.set.children_of(FIELD) else {
            return Ok(());
        };
        if raw_units.is_empty() {
            return Ok(());
        }

        ctx.buffer.key(UNITS_DEPTH, "units");
        for (i, raw) in raw_units.iter().enumerate() {
            let unit = Unit::resolve(set, raw, &element_path(FIELD, i), &mut ctx.warnings)?;
            write_unit(&mut ctx.buffer, UNITS_DEPTH + 1, &unit);
        }
        Ok(())
    }
}

/// Writes one unit as a sequence entry at `depth`.
///
/// Field order is name, runtime, mask, enable, command, content, drop-ins.
/// Boolean flags are only written when true. Names that YAML would
/// misread are quoted.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::model::Unit;
/// use coreos_cloudinit::render::{write_unit, RenderBuffer};
///
/// let unit = Unit {
///     name: "tst.mount".into(),
///     command: Some("start".into()),
///     content: Some("[Unit]\nDescription=Test Mount".into()),
///     ..Default::default()
/// };
/// let mut buf = RenderBuffer::new();
/// write_unit(&mut buf, 0, &unit);
/// assert_eq!(
///     buf.as_str(),
///     "- name: tst.mount\n  command: start\n  content: |\n    [Unit]\n    Description=Test Mount\n"
/// );
/// ```
pub fn write_unit(buf: &mut RenderBuffer, depth: usize, unit: &Unit) {
    let inner = depth + 1;
    buf.entry_start(depth, "name", &scalar(&unit.name));
    for (key, set) in [
        ("runtime", unit.runtime),
        ("mask", unit.mask),
        ("enable", unit.enable),
    ] {
        if set {
            buf.entry(inner, key, "true");
        }
    }
    if let Some(command) = unit.command.as_deref().filter(|c| !c.is_empty()) {
        buf.entry(inner, "command", &scalar(command));
    }
    if let Some(content) = unit.content.as_deref().filter(|c| !c.trim().is_empty()) {
        buf.block_scalar(inner, "content", content);
    }
    if !unit.dropins.is_empty() {
        buf.key(inner, "drop-ins");
        for dropin in &unit.dropins {
            buf.entry_start(inner + 1, "name", &scalar(&dropin.name));
            buf.block_scalar(inner + 2, "content", &dropin.content);
        }
    }
}

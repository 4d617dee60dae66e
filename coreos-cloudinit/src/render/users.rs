//! The top-level `users` sequence.

use super::buffer::RenderBuffer;
use super::format::{quote, scalar};
use super::{DirectiveRenderer, RenderContext};
use crate::model::User;
use crate::resolve::element_path;
use crate::schema::dash_case;

const FIELD: &str = "user";

pub(crate) struct Users;

impl DirectiveRenderer for Users {
    fn name(&self) -> &'static str {
        "users"
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> crate::Result<()> {
        let raw_users = ctx.root.blocks(FIELD);
        let Some(set) = ctx.set.children_of(FIELD) else {
            return Ok(());
        };
        if raw_users.is_empty() {
            return Ok(());
        }

        ctx.buffer.key(0, "users");
        for (i, raw) in raw_users.iter().enumerate() {
            let user = User::resolve(set, raw, &element_path(FIELD, i), &mut ctx.warnings)?;
            write_user(&mut ctx.buffer, 1, &user);
        }
        Ok(())
    }
}

/// Writes one user entry at `depth`.
///
/// `name` comes first, then the scalar fields, then list fields as nested
/// sequences of quoted items, then the flags that are set.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::model::User;
/// use coreos_cloudinit::render::{write_user, RenderBuffer};
///
/// let user = User {
///     name: "core".into(),
///     groups: vec!["sudo".into()],
///     system: true,
///     ..Default::default()
/// };
/// let mut buf = RenderBuffer::new();
/// write_user(&mut buf, 0, &user);
/// assert_eq!(buf.as_str(), "- name: core\n  groups:\n    - \"sudo\"\n  system: true\n");
/// ```
pub fn write_user(buf: &mut RenderBuffer, depth: usize, user: &User) {
    let inner = depth + 1;
    buf.entry_start(depth, "name", &scalar(&user.name));

    let scalars = [
        ("passwd", &user.passwd),
        ("gecos", &user.gecos),
        ("homedir", &user.homedir),
        ("primary_group", &user.primary_group),
        ("shell", &user.shell),
        ("coreos_ssh_import_github", &user.coreos_ssh_import_github),
        ("coreos_ssh_import_url", &user.coreos_ssh_import_url),
    ];
    for (key, value) in scalars {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            buf.entry(inner, &dash_case(key), &scalar(value));
        }
    }

    let lists = [
        ("groups", &user.groups),
        ("ssh_authorized_keys", &user.ssh_authorized_keys),
        ("coreos_ssh_import_github_users", &user.coreos_ssh_import_github_users),
    ];
    for (key, items) in lists {
        if items.is_empty() {
            continue;
        }
        buf.key(inner, &dash_case(key));
        for item in items {
            buf.item(inner + 1, &quote(item));
        }
    }

    let flags = [
        ("no_create_home", user.no_create_home),
        ("no_user_group", user.no_user_group),
        ("system", user.system),
        ("no_log_init", user.no_log_init),
        ("lock_passwd", user.lock_passwd),
    ];
    for (key, set) in flags {
        if set {
            buf.entry(inner, &dash_case(key), "true");
        }
    }
}

//! Typed entities for the repeated blocks: units, write-files and users.
//!
//! Each entity is built from a raw block by resolving it against its
//! descriptor set, then checked for the cross-field rules the descriptors
//! cannot express on their own.

use crate::error::{Error, Result};
use crate::resolve::{element_path, field_path, resolve_block};
use crate::schema::DescriptorSet;
use crate::value::Block;

fn owned(block: &Block, key: &str) -> Option<String> {
    block.string(key).map(str::to_string)
}

fn required(block: &Block, key: &str, path: &str) -> Result<String> {
    owned(block, key).ok_or_else(|| Error::MissingField {
        field: field_path(path, key),
    })
}

/// A named drop-in fragment attached to a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropin {
    /// File name of the drop-in, e.g. `50-limits.conf`.
    pub name: String,
    /// Drop-in body.
    pub content: String,
}

/// A service-manager unit.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::model::Unit;
///
/// let unit = Unit {
///     name: "tst.mount".into(),
///     content: Some("[Unit]\nDescription=Test Mount".into()),
///     command: Some("start".into()),
///     ..Default::default()
/// };
/// assert!(unit.validate().is_ok());
///
/// let empty = Unit { name: "empty.service".into(), ..Default::default() };
/// assert!(empty.validate().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unit {
    /// Unit name, e.g. `etcd2.service`.
    pub name: String,
    /// Unit file body.
    pub content: Option<String>,
    /// Write the unit under /run instead of /etc.
    pub runtime: bool,
    /// Enable the unit's [Install] section.
    pub enable: bool,
    /// Mask the unit.
    pub mask: bool,
    /// Command to run against the unit after writing it.
    pub command: Option<String>,
    /// Drop-ins, in declaration order.
    pub dropins: Vec<Dropin>,
}

impl Unit {
    /// Resolves a raw `systemd_unit` block (and its drop-ins) at `path`.
    ///
    /// # Errors
    ///
    /// Returns any resolution error, or [`Error::InvalidUnit`] when the unit
    /// has neither content nor drop-ins.
    pub fn resolve(
        set: &DescriptorSet,
        raw: &Block,
        path: &str,
        warnings: &mut Vec<String>,
    ) -> Result<Self> {
        let block = resolve_block(set, raw, path, warnings)?;

        let mut dropins = Vec::new();
        if let Some(dropin_set) = set.children_of("dropin") {
            let dropin_path = field_path(path, "dropin");
            for (i, raw_dropin) in block.blocks("dropin").iter().enumerate() {
                let here = element_path(&dropin_path, i);
                let resolved = resolve_block(dropin_set, raw_dropin, &here, warnings)?;
                dropins.push(Dropin {
                    name: required(&resolved, "name", &here)?,
                    content: required(&resolved, "content", &here)?,
                });
            }
        }

        let unit = Self {
            name: required(&block, "name", path)?,
            content: owned(&block, "content"),
            runtime: block.flag("runtime"),
            enable: block.flag("enable"),
            mask: block.flag("mask"),
            command: owned(&block, "command"),
            dropins,
        };
        unit.validate()?;
        Ok(unit)
    }

    /// Checks the unit's structural rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUnit`] if the name is empty, if neither
    /// content nor a drop-in is present, or if a drop-in is empty.
    /// Whitespace-only text counts as empty.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidUnit {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must be non-empty"));
        }
        let has_content = self.content.as_deref().is_some_and(|c| !c.trim().is_empty());
        if !has_content && self.dropins.is_empty() {
            return Err(invalid("must have non-empty content or at least one drop-in"));
        }
        if self
            .dropins
            .iter()
            .any(|d| d.name.trim().is_empty() || d.content.trim().is_empty())
        {
            return Err(invalid("drop-ins need both a name and non-empty content"));
        }
        Ok(())
    }
}

/// A file to materialize on the machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteFile {
    /// Absolute target path.
    pub path: String,
    /// File body.
    pub content: String,
    /// Octal mode, e.g. `0644`.
    pub permissions: Option<String>,
    /// `user:group` owner.
    pub owner: Option<String>,
    /// Content encoding, e.g. `base64`.
    pub encoding: Option<String>,
}

impl WriteFile {
    /// Resolves a raw `write_file` block at `path`.
    ///
    /// # Errors
    ///
    /// Returns any resolution error, or [`Error::InvalidWriteFile`] when the
    /// path or content is empty.
    pub fn resolve(
        set: &DescriptorSet,
        raw: &Block,
        path: &str,
        warnings: &mut Vec<String>,
    ) -> Result<Self> {
        let block = resolve_block(set, raw, path, warnings)?;
        let file = Self {
            path: required(&block, "path", path)?,
            content: required(&block, "content", path)?,
            permissions: owned(&block, "permissions"),
            owner: owned(&block, "owner"),
            encoding: owned(&block, "encoding"),
        };
        file.validate()?;
        Ok(file)
    }

    /// Checks that both path and content are non-empty.
    ///
    /// Whitespace-only values count as empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWriteFile`] naming the empty field.
    pub fn validate(&self) -> Result<()> {
        let empty = if self.path.trim().is_empty() {
            Some("path")
        } else if self.content.trim().is_empty() {
            Some("content")
        } else {
            None
        };
        match empty {
            Some(field) => Err(Error::InvalidWriteFile {
                path: self.path.clone(),
                reason: format!("{field} must be non-empty"),
            }),
            None => Ok(()),
        }
    }
}

/// An operating-system account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Login name.
    pub name: String,
    /// Password hash.
    pub passwd: Option<String>,
    /// Comment / full name.
    pub gecos: Option<String>,
    /// Home directory.
    pub homedir: Option<String>,
    /// Primary group.
    pub primary_group: Option<String>,
    /// Login shell.
    pub shell: Option<String>,
    /// GitHub user whose keys are imported.
    pub coreos_ssh_import_github: Option<String>,
    /// URL serving keys to import.
    pub coreos_ssh_import_url: Option<String>,
    /// Supplementary groups.
    pub groups: Vec<String>,
    /// Authorized SSH public keys.
    pub ssh_authorized_keys: Vec<String>,
    /// GitHub users whose keys are imported.
    pub coreos_ssh_import_github_users: Vec<String>,
    /// Do not create a home directory.
    pub no_create_home: bool,
    /// Do not create a group named after the user.
    pub no_user_group: bool,
    /// Create a system account.
    pub system: bool,
    /// Do not add the user to lastlog/faillog.
    pub no_log_init: bool,
    /// Lock the password.
    pub lock_passwd: bool,
}

impl User {
    /// Resolves a raw `user` block at `path`.
    ///
    /// # Errors
    ///
    /// Returns any resolution error; a missing name is
    /// [`Error::MissingField`].
    pub fn resolve(
        set: &DescriptorSet,
        raw: &Block,
        path: &str,
        warnings: &mut Vec<String>,
    ) -> Result<Self> {
        let block = resolve_block(set, raw, path, warnings)?;
        Ok(Self {
            name: required(&block, "name", path)?,
            passwd: owned(&block, "passwd"),
            gecos: owned(&block, "gecos"),
            homedir: owned(&block, "homedir"),
            primary_group: owned(&block, "primary_group"),
            shell: owned(&block, "shell"),
            coreos_ssh_import_github: owned(&block, "coreos_ssh_import_github"),
            coreos_ssh_import_url: owned(&block, "coreos_ssh_import_url"),
            groups: block.strings("groups"),
            ssh_authorized_keys: block.strings("ssh_authorized_keys"),
            coreos_ssh_import_github_users: block.strings("coreos_ssh_import_github_users"),
            no_create_home: block.flag("no_create_home"),
            no_user_group: block.flag("no_user_group"),
            system: block.flag("system"),
            no_log_init: block.flag("no_log_init"),
            lock_passwd: block.flag("lock_passwd"),
        })
    }
}

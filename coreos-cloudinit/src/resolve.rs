//! Resolution of one block against its descriptor set.
//!
//! Resolution is what turns a caller-supplied block into something a
//! renderer may trust: every key is known, every value has its declared
//! shape, unset values are gone, required fields are present and validators
//! have run. It only looks at the block's own fields; nested blocks are
//! resolved later, when the renderer that owns them reaches them.

use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::schema::{DescriptorSet, Validation};
use crate::value::{Block, ConfigValue};

/// Joins a parent path and a field name (`etcd2` + `proxy` → `etcd2.proxy`).
#[must_use]
pub fn field_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Path of the `index`th element of a repeated field.
#[must_use]
pub fn element_path(field: &str, index: usize) -> String {
    format!("{field}[{index}]")
}

/// Resolves `block` against `set`, appending warnings to `warnings`.
///
/// `path` is the block's location in the tree (empty for the root) and is
/// used to label warnings and errors.
///
/// # Errors
///
/// Returns the first fatal finding: [`Error::UnknownField`],
/// [`Error::TypeMismatch`], [`Error::MissingField`] or
/// [`Error::Validation`]. Warnings recorded before the failure stay in
/// `warnings`.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::resolve::resolve_block;
/// use coreos_cloudinit::schema::Schema;
/// use coreos_cloudinit::Block;
///
/// let schema = Schema::coreos();
/// let fleet = schema.root().children_of("fleet").unwrap();
/// let raw = Block::new().with("verbosity", "2").with("public_ip", "");
///
/// let mut warnings = Vec::new();
/// let resolved = resolve_block(fleet, &raw, "fleet", &mut warnings).unwrap();
/// assert_eq!(resolved.len(), 1);
/// assert!(warnings.is_empty());
/// ```
pub fn resolve_block(
    set: &DescriptorSet,
    block: &Block,
    path: &str,
    warnings: &mut Vec<String>,
) -> Result<Block> {
    let mut resolved = Block::new();

    for key in block.sorted_keys() {
        let descriptor = set.get(key).ok_or_else(|| Error::UnknownField {
            block: if path.is_empty() { set.name() } else { path }.to_string(),
            field: key.to_string(),
        })?;
        let Some(raw) = block.get(key) else {
            continue;
        };

        match normalize(descriptor.kind(), raw) {
            Ok(Some(value)) => resolved.insert(key, value),
            Ok(None) => {}
            Err(found) => {
                return Err(Error::TypeMismatch {
                    field: field_path(path, key),
                    expected: descriptor.kind().to_string(),
                    found: found.to_string(),
                })
            }
        }
    }

    for descriptor in set.iter() {
        let here = field_path(path, descriptor.name());
        let Some(value) = resolved.get(descriptor.name()) else {
            if descriptor.is_required() {
                return Err(Error::MissingField { field: here });
            }
            continue;
        };

        if let Some(notice) = descriptor.deprecation() {
            record(warnings, &here, notice);
        }

        let outcome = match value {
            ConfigValue::Scalar(scalar) => descriptor.validate(scalar),
            ConfigValue::List(items) => {
                items
                    .iter()
                    .map(|item| descriptor.validate(item))
                    .fold(Validation::ok(), |mut acc, v| {
                        acc.warnings.extend(v.warnings);
                        acc.errors.extend(v.errors);
                        acc
                    })
            }
            ConfigValue::Block(_) | ConfigValue::Blocks(_) => Validation::ok(),
        };

        for warning in &outcome.warnings {
            record(warnings, &here, warning);
        }
        if let Some(message) = outcome.errors.into_iter().next() {
            return Err(Error::Validation {
                field: here,
                message,
            });
        }
    }

    Ok(resolved)
}

fn record(warnings: &mut Vec<String>, path: &str, message: &str) {
    let warning = format!("{path}: {message}");
    log::warn!("{warning}");
    warnings.push(warning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, ETCD_DEPRECATION};

    fn resolve(set_name: &str, block: &Block) -> (Result<Block>, Vec<String>) {
        let schema = Schema::coreos();
        let set = schema.root().children_of(set_name).unwrap();
        let mut warnings = Vec::new();
        let result = resolve_block(set, block, set_name, &mut warnings);
        (result, warnings)
    }

    #[test]
    fn test_paths() {
        assert_eq!(field_path("", "hostname"), "hostname");
        assert_eq!(field_path("etcd2", "proxy"), "etcd2.proxy");
        assert_eq!(element_path("systemd_unit", 2), "systemd_unit[2]");
    }

    #[test]
    fn test_unknown_field_is_fatal() {
        let (result, _) = resolve("fleet", &Block::new().with("bogus", "x"));
        match result.unwrap_err() {
            Error::UnknownField { block, field } => {
                assert_eq!(block, "fleet");
                assert_eq!(field, "bogus");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_root_field_names_the_set() {
        let schema = Schema::coreos();
        let mut warnings = Vec::new();
        let err = resolve_block(
            schema.root(),
            &Block::new().with("manage_ssh_hosts", "localhost"),
            "",
            &mut warnings,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownField { ref block, .. } if block == "cloud-config"));
    }

    #[test]
    fn test_type_mismatch_reports_kind() {
        let (result, _) = resolve("fleet", &Block::new().with("verbosity", "loud"));
        match result.unwrap_err() {
            Error::TypeMismatch {
                field,
                expected,
                found,
            } => {
                assert_eq!(field, "fleet.verbosity");
                assert_eq!(expected, "integer");
                assert_eq!(found, "non-numeric string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let (result, _) = resolve(
            "update_strategy",
            &Block::new().with("server", "").with("group", "stable"),
        );
        let resolved = result.unwrap();
        assert!(!resolved.contains_key("server"));
        assert_eq!(resolved.string("group"), Some("stable"));
    }

    #[test]
    fn test_missing_required_field() {
        let (result, _) = resolve("systemd_unit", &Block::new().with("content", "[Unit]"));
        match result.unwrap_err() {
            Error::MissingField { field } => assert_eq!(field, "systemd_unit.name"),
            other => panic!("unexpected error: {other}"),
        }

        let (result, _) = resolve("systemd_unit", &Block::new().with("name", ""));
        assert!(matches!(result.unwrap_err(), Error::MissingField { .. }));
    }

    #[test]
    fn test_validator_error_is_fatal() {
        let (result, _) = resolve(
            "update_strategy",
            &Block::new().with("reboot_strategy", "whenever"),
        );
        match result.unwrap_err() {
            Error::Validation { field, message } => {
                assert_eq!(field, "update_strategy.reboot_strategy");
                assert!(message.contains("etcd-lock"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validator_warning_is_collected() {
        let schema = Schema::coreos();
        let mut warnings = Vec::new();
        let resolved = resolve_block(
            schema.root(),
            &Block::new().with("manage_etc_hosts", "10.0.0.1"),
            "",
            &mut warnings,
        )
        .unwrap();
        assert_eq!(resolved.string("manage_etc_hosts"), Some("10.0.0.1"));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("manage_etc_hosts: "));
    }

    #[test]
    fn test_deprecated_block_warns_only_when_set() {
        let schema = Schema::coreos();
        let mut warnings = Vec::new();
        let root = Block::new().with("etcd", Block::new().with("name", "node1"));
        resolve_block(schema.root(), &root, "", &mut warnings).unwrap();
        assert_eq!(warnings, vec![format!("etcd: {ETCD_DEPRECATION}")]);

        warnings.clear();
        let root = Block::new().with("etcd", Block::new());
        resolve_block(schema.root(), &root, "", &mut warnings).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_boolean_strings_normalized() {
        let (result, _) = resolve("flannel", &Block::new().with("ip_masq", "1"));
        let resolved = result.unwrap();
        assert_eq!(resolved.get("ip_masq"), Some(&ConfigValue::from(true)));
    }

    #[test]
    fn test_shape_errors_precede_validators() {
        let schema = Schema::coreos();
        let mut warnings = Vec::new();
        let root = Block::new()
            .with("manage_etc_hosts", "10.0.0.1")
            .with("hostname", ConfigValue::list(["a", "b"]));
        let err = resolve_block(schema.root(), &root, "", &mut warnings).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        // Shape checks run before validators, so no warning was recorded yet.
        assert!(warnings.is_empty());
    }
}

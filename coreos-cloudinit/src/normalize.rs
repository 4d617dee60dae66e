//! Input normalization: the one place where loosely-typed input becomes the
//! shape a descriptor declares.
//!
//! Hosts often hand over booleans as `"0"`/`"1"` or `"true"`/`"false"`
//! strings and integers as decimal strings. Those forms are accepted here so
//! renderers only ever see native values.

use crate::schema::FieldKind;
use crate::value::{Block, ConfigValue, Scalar};

/// Parses the boolean spellings accepted from hosts.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::normalize::parse_bool;
///
/// assert_eq!(parse_bool("1"), Some(true));
/// assert_eq!(parse_bool("FALSE"), Some(false));
/// assert_eq!(parse_bool("yes"), None);
/// ```
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Normalizes a raw value to the shape of `kind`.
///
/// Returns `Ok(None)` when the value counts as "not set" (empty string,
/// empty list, empty block), `Ok(Some(_))` with the normalized value, or
/// `Err(found)` naming what was supplied when no coercion applies.
///
/// # Errors
///
/// Returns a short description of the offending shape on mismatch.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::normalize::normalize;
/// use coreos_cloudinit::schema::FieldKind;
/// use coreos_cloudinit::ConfigValue;
///
/// let v = normalize(FieldKind::Boolean, &ConfigValue::from("1")).unwrap();
/// assert_eq!(v, Some(ConfigValue::from(true)));
///
/// let v = normalize(FieldKind::String, &ConfigValue::from("")).unwrap();
/// assert_eq!(v, None);
/// ```
pub fn normalize(
    kind: FieldKind,
    value: &ConfigValue,
) -> Result<Option<ConfigValue>, &'static str> {
    match kind {
        FieldKind::String => match value {
            ConfigValue::Scalar(scalar) => Ok(text(scalar).map(ConfigValue::from)),
            other => Err(other.describe()),
        },
        FieldKind::Integer => match value {
            ConfigValue::Scalar(scalar) => integer(scalar).map(|i| i.map(ConfigValue::from)),
            other => Err(other.describe()),
        },
        FieldKind::Boolean => match value {
            ConfigValue::Scalar(scalar) => boolean(scalar).map(|b| b.map(ConfigValue::from)),
            other => Err(other.describe()),
        },
        FieldKind::ListOfString => match value {
            ConfigValue::List(items) if items.is_empty() => Ok(None),
            ConfigValue::List(items) => Ok(Some(ConfigValue::List(
                items.iter().map(|s| Scalar::String(s.to_string())).collect(),
            ))),
            other => Err(other.describe()),
        },
        FieldKind::NestedBlock => match value {
            ConfigValue::Block(block) => Ok(Some(block)
                .filter(|b| !is_unset_block(b))
                .map(|b| ConfigValue::Block(b.clone()))),
            ConfigValue::Blocks(blocks) if blocks.len() <= 1 => Ok(blocks
                .first()
                .filter(|b| !is_unset_block(b))
                .map(|b| ConfigValue::Block(b.clone()))),
            ConfigValue::List(items) if items.is_empty() => Ok(None),
            other => Err(other.describe()),
        },
        FieldKind::RepeatedBlock => match value {
            ConfigValue::Blocks(blocks) if blocks.is_empty() => Ok(None),
            ConfigValue::Blocks(blocks) => Ok(Some(ConfigValue::Blocks(blocks.clone()))),
            ConfigValue::Block(block) => Ok(Some(ConfigValue::Blocks(vec![block.clone()]))),
            ConfigValue::List(items) if items.is_empty() => Ok(None),
            other => Err(other.describe()),
        },
    }
}

/// A nested block counts as unset when none of its fields carries a value.
fn is_unset_block(block: &Block) -> bool {
    block.values().all(is_unset)
}

fn is_unset(value: &ConfigValue) -> bool {
    match value {
        ConfigValue::Scalar(Scalar::String(s)) => s.is_empty(),
        ConfigValue::Scalar(_) => false,
        ConfigValue::List(items) => items.is_empty(),
        ConfigValue::Block(block) => is_unset_block(block),
        ConfigValue::Blocks(blocks) => blocks.is_empty(),
    }
}

fn text(scalar: &Scalar) -> Option<String> {
    match scalar {
        Scalar::String(s) if s.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn integer(scalar: &Scalar) -> Result<Option<i64>, &'static str> {
    match scalar {
        Scalar::Integer(i) => Ok(Some(*i)),
        Scalar::String(s) if s.trim().is_empty() => Ok(None),
        Scalar::String(s) => s.trim().parse().map(Some).map_err(|_| "non-numeric string"),
        Scalar::Boolean(_) => Err("boolean"),
    }
}

fn boolean(scalar: &Scalar) -> Result<Option<bool>, &'static str> {
    match scalar {
        Scalar::Boolean(b) => Ok(Some(*b)),
        Scalar::Integer(0) => Ok(Some(false)),
        Scalar::Integer(1) => Ok(Some(true)),
        Scalar::Integer(_) => Err("integer"),
        Scalar::String(s) if s.trim().is_empty() => Ok(None),
        Scalar::String(s) => parse_bool(s).map(Some).ok_or("non-boolean string"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_spellings() {
        for (input, expected) in [("0", false), ("1", true), ("true", true), ("False", false)] {
            assert_eq!(
                normalize(FieldKind::Boolean, &ConfigValue::from(input)).unwrap(),
                Some(ConfigValue::from(expected)),
                "input {input:?}"
            );
        }
        assert_eq!(
            normalize(FieldKind::Boolean, &ConfigValue::from(1)).unwrap(),
            Some(ConfigValue::from(true))
        );
        assert_eq!(
            normalize(FieldKind::Boolean, &ConfigValue::from("maybe")),
            Err("non-boolean string")
        );
        assert_eq!(
            normalize(FieldKind::Boolean, &ConfigValue::from(7)),
            Err("integer")
        );
    }

    #[test]
    fn test_integer_from_string() {
        assert_eq!(
            normalize(FieldKind::Integer, &ConfigValue::from(" 30 ")).unwrap(),
            Some(ConfigValue::from(30))
        );
        assert_eq!(
            normalize(FieldKind::Integer, &ConfigValue::from("thirty")),
            Err("non-numeric string")
        );
        assert_eq!(
            normalize(FieldKind::Integer, &ConfigValue::from(true)),
            Err("boolean")
        );
    }

    #[test]
    fn test_string_accepts_scalars_and_drops_empty() {
        assert_eq!(
            normalize(FieldKind::String, &ConfigValue::from(644)).unwrap(),
            Some(ConfigValue::from("644"))
        );
        assert_eq!(normalize(FieldKind::String, &ConfigValue::from("")).unwrap(), None);
        assert_eq!(
            normalize(FieldKind::String, &ConfigValue::list(["a"])),
            Err("sequence")
        );
    }

    #[test]
    fn test_list_stringifies_items() {
        let raw = ConfigValue::List(vec![Scalar::Integer(1), Scalar::String("b".into())]);
        assert_eq!(
            normalize(FieldKind::ListOfString, &raw).unwrap(),
            Some(ConfigValue::list(["1", "b"]))
        );
        assert_eq!(
            normalize(FieldKind::ListOfString, &ConfigValue::List(vec![])).unwrap(),
            None
        );
        assert_eq!(
            normalize(FieldKind::ListOfString, &ConfigValue::from("a,b")),
            Err("string")
        );
    }

    #[test]
    fn test_repeated_block_accepts_single_mapping() {
        let unit = Block::new().with("name", "a.service");
        assert_eq!(
            normalize(FieldKind::RepeatedBlock, &ConfigValue::Block(unit.clone())).unwrap(),
            Some(ConfigValue::Blocks(vec![unit]))
        );
        assert_eq!(
            normalize(FieldKind::RepeatedBlock, &ConfigValue::Blocks(vec![])).unwrap(),
            None
        );
    }

    #[test]
    fn test_nested_block_accepts_single_element_sequence() {
        let fleet = Block::new().with("verbosity", 1);
        assert_eq!(
            normalize(FieldKind::NestedBlock, &ConfigValue::Blocks(vec![fleet.clone()])).unwrap(),
            Some(ConfigValue::Block(fleet.clone()))
        );
        assert_eq!(
            normalize(FieldKind::NestedBlock, &ConfigValue::Block(Block::new())).unwrap(),
            None
        );
        assert_eq!(
            normalize(
                FieldKind::NestedBlock,
                &ConfigValue::Blocks(vec![fleet.clone(), fleet])
            ),
            Err("sequence of mappings")
        );
    }

    #[test]
    fn test_nested_block_with_only_empty_fields_is_unset() {
        let etcd = Block::new().with("discovery", "").with("addr", ConfigValue::List(vec![]));
        assert_eq!(
            normalize(FieldKind::NestedBlock, &ConfigValue::Block(etcd.clone())).unwrap(),
            None
        );
        assert_eq!(
            normalize(FieldKind::NestedBlock, &ConfigValue::Blocks(vec![etcd])).unwrap(),
            None
        );

        let set = Block::new().with("discovery", "").with("verbosity", 0);
        assert!(normalize(FieldKind::NestedBlock, &ConfigValue::Block(set))
            .unwrap()
            .is_some());
    }
}

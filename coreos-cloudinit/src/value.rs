//! The configuration tree supplied by the caller.
//!
//! A tree is a [`Block`] of optional fields. Each field holds a
//! [`ConfigValue`]: a scalar, a sequence of scalars, a single nested block
//! (an unordered mapping) or a sequence of blocks (order-preserving). Absent
//! keys mean "not set".

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{Error, Result};

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// A text value.
    String(String),
    /// A whole number.
    Integer(i64),
    /// A native boolean.
    Boolean(bool),
}

impl Scalar {
    /// Short name of the scalar's shape, used in type mismatch errors.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
        }
    }

    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// A resolved runtime value, one case per field shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// A single scalar.
    Scalar(Scalar),
    /// An ordered sequence of scalars.
    List(Vec<Scalar>),
    /// A single nested block with unordered keys.
    Block(Block),
    /// An ordered sequence of blocks.
    Blocks(Vec<Block>),
}

impl ConfigValue {
    /// Builds a list value from anything that yields strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use coreos_cloudinit::{ConfigValue, Scalar};
    ///
    /// let value = ConfigValue::list(["sudo", "docker"]);
    /// assert_eq!(value, ConfigValue::List(vec![
    ///     Scalar::String("sudo".into()),
    ///     Scalar::String("docker".into()),
    /// ]));
    /// ```
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(
            items
                .into_iter()
                .map(|s| Scalar::String(s.into()))
                .collect(),
        )
    }

    /// Short name of the value's shape, used in type mismatch errors.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Scalar(s) => s.describe(),
            Self::List(_) => "sequence",
            Self::Block(_) => "mapping",
            Self::Blocks(_) => "sequence of mappings",
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::String(value))
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Integer(value))
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Boolean(value))
    }
}

impl From<Block> for ConfigValue {
    fn from(value: Block) -> Self {
        Self::Block(value)
    }
}

impl From<Vec<Block>> for ConfigValue {
    fn from(value: Vec<Block>) -> Self {
        Self::Blocks(value)
    }
}

/// An unordered mapping from field name to value.
///
/// Key order is not part of a block's identity; renderers that need a
/// stable order take it from the descriptor set.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::Block;
///
/// let unit = Block::new()
///     .with("name", "tst.mount")
///     .with("command", "start");
/// assert_eq!(unit.len(), 2);
/// assert_eq!(unit.string("name"), Some("tst.mount"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    fields: HashMap<String, ConfigValue>,
}

impl Block {
    /// Creates an empty block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Returns the raw value of a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.fields.get(key)
    }

    /// Returns true if the field is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field values in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &ConfigValue> {
        self.fields.values()
    }

    /// Number of fields present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in sorted order.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// A string field, if present and a string.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(ConfigValue::Scalar(s)) => s.as_str(),
            _ => None,
        }
    }

    /// A boolean field; absent or non-boolean reads as false.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.fields.get(key),
            Some(ConfigValue::Scalar(Scalar::Boolean(true)))
        )
    }

    /// A list field as strings; absent reads as empty.
    #[must_use]
    pub fn strings(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            Some(ConfigValue::List(items)) => items.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// A nested block field.
    #[must_use]
    pub fn block(&self, key: &str) -> Option<&Block> {
        match self.fields.get(key) {
            Some(ConfigValue::Block(b)) => Some(b),
            _ => None,
        }
    }

    /// A repeated block field; absent reads as empty.
    #[must_use]
    pub fn blocks(&self, key: &str) -> &[Block] {
        match self.fields.get(key) {
            Some(ConfigValue::Blocks(items)) => items,
            _ => &[],
        }
    }
}

impl FromIterator<(String, ConfigValue)> for Block {
    fn from_iter<T: IntoIterator<Item = (String, ConfigValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A complete configuration tree, rooted at the top-level block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigTree {
    root: Block,
}

impl ConfigTree {
    /// Wraps a root block.
    #[must_use]
    pub fn new(root: Block) -> Self {
        Self { root }
    }

    /// The top-level block.
    #[must_use]
    pub fn root(&self) -> &Block {
        &self.root
    }

    /// Parses a tree from a YAML document. An empty document is an empty tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed YAML and [`Error::TypeMismatch`]
    /// when the document is not a mapping or holds values no field kind can
    /// represent.
    ///
    /// # Examples
    ///
    /// ```
    /// use coreos_cloudinit::ConfigTree;
    ///
    /// let tree = ConfigTree::from_yaml_str("hostname: core-01\n").unwrap();
    /// assert_eq!(tree.root().string("hostname"), Some("core-01"));
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(yaml)?;
        match convert(value, "")? {
            None => Ok(Self::default()),
            Some(ConfigValue::Block(root)) => Ok(Self { root }),
            Some(other) => Err(Error::TypeMismatch {
                field: "<root>".to_string(),
                expected: "mapping".to_string(),
                found: other.describe().to_string(),
            }),
        }
    }

    /// Reads and parses a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise the same
    /// errors as [`ConfigTree::from_yaml_str`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn mismatch(path: &str, found: &str) -> Error {
    let field = if path.is_empty() { "<root>" } else { path };
    Error::TypeMismatch {
        field: field.to_string(),
        expected: "string, integer, boolean, sequence or mapping".to_string(),
        found: found.to_string(),
    }
}

/// Converts a YAML value into a tree value. Nulls become `None`.
fn convert(value: Value, path: &str) -> Result<Option<ConfigValue>> {
    match value {
        Value::Null => Ok(None),
        Value::Tagged(tagged) => convert(tagged.value, path),
        Value::Sequence(items) => convert_sequence(items, path).map(Some),
        Value::Mapping(mapping) => {
            let mut block = Block::new();
            for (key, value) in mapping {
                let key = match key {
                    Value::String(k) => k,
                    other => return Err(mismatch(path, &format!("non-string key {other:?}"))),
                };
                let field_path = child_path(path, &key);
                if let Some(value) = convert(value, &field_path)? {
                    block.insert(key, value);
                }
            }
            Ok(Some(ConfigValue::Block(block)))
        }
        scalar => convert_scalar(scalar, path).map(|s| Some(ConfigValue::Scalar(s))),
    }
}

fn convert_scalar(value: Value, path: &str) -> Result<Scalar> {
    match value {
        Value::Bool(b) => Ok(Scalar::Boolean(b)),
        Value::Number(n) => Ok(n
            .as_i64()
            .map_or_else(|| Scalar::String(n.to_string()), Scalar::Integer)),
        Value::String(s) => Ok(Scalar::String(s)),
        Value::Tagged(tagged) => convert_scalar(tagged.value, path),
        Value::Null => Err(mismatch(path, "null")),
        Value::Sequence(_) => Err(mismatch(path, "nested sequence")),
        Value::Mapping(_) => Err(mismatch(path, "mapping")),
    }
}

fn convert_sequence(items: Vec<Value>, path: &str) -> Result<ConfigValue> {
    let all_mappings = !items.is_empty() && items.iter().all(|v| matches!(v, Value::Mapping(_)));

    if all_mappings {
        let mut blocks = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let item_path = format!("{path}[{i}]");
            if let Some(ConfigValue::Block(block)) = convert(item, &item_path)? {
                blocks.push(block);
            }
        }
        return Ok(ConfigValue::Blocks(blocks));
    }

    let mut scalars = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        scalars.push(convert_scalar(item, &format!("{path}[{i}]"))?);
    }
    Ok(ConfigValue::List(scalars))
}

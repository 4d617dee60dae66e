//! Field descriptors: the declarative description of every configuration key.

use std::fmt;

use crate::value::Scalar;

/// The shape of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A text value.
    String,
    /// A whole number.
    Integer,
    /// A boolean flag.
    Boolean,
    /// An ordered list of strings.
    ListOfString,
    /// A single nested block with its own descriptor set.
    NestedBlock,
    /// An ordered sequence of blocks sharing one descriptor set.
    RepeatedBlock,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Boolean => write!(f, "boolean"),
            Self::ListOfString => write!(f, "list of strings"),
            Self::NestedBlock => write!(f, "block"),
            Self::RepeatedBlock => write!(f, "list of blocks"),
        }
    }
}

/// Outcome of running a validator on one value.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::schema::Validation;
///
/// let v = Validation::warning("discouraged value");
/// assert!(v.errors.is_empty());
/// assert_eq!(v.warnings.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// Advisory findings; rendering continues.
    pub warnings: Vec<String>,
    /// Fatal findings; rendering stops.
    pub errors: Vec<String>,
}

impl Validation {
    /// A clean result.
    #[must_use]
    pub fn ok() -> Self {
        Self::default()
    }

    /// A result carrying one warning.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            warnings: vec![message.into()],
            errors: Vec::new(),
        }
    }

    /// A result carrying one error.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            warnings: Vec::new(),
            errors: vec![message.into()],
        }
    }

    /// True when there is nothing to report.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}

/// A validator applied to a field's normalized scalar value.
pub type ValidateFn = fn(&Scalar) -> Validation;

/// Description of one configuration key.
///
/// Descriptors are built once and never mutated; nested kinds own the
/// descriptor set of their children.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::schema::{FieldDescriptor, FieldKind};
///
/// let field = FieldDescriptor::string("reboot_strategy");
/// assert_eq!(field.kind(), FieldKind::String);
/// assert_eq!(field.output_key(), "reboot-strategy");
/// assert!(!field.is_required());
/// ```
#[derive(Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    deprecated: Option<&'static str>,
    validate: Option<ValidateFn>,
    children: Option<Box<DescriptorSet>>,
}

impl FieldDescriptor {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            deprecated: None,
            validate: None,
            children: None,
        }
    }

    /// A string field.
    #[must_use]
    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// An integer field.
    #[must_use]
    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// A boolean field.
    #[must_use]
    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// A list-of-strings field.
    #[must_use]
    pub fn list(name: &'static str) -> Self {
        Self::new(name, FieldKind::ListOfString)
    }

    /// A single nested block described by `children`.
    #[must_use]
    pub fn nested(name: &'static str, children: DescriptorSet) -> Self {
        Self {
            children: Some(Box::new(children)),
            ..Self::new(name, FieldKind::NestedBlock)
        }
    }

    /// A repeated block, each element described by `children`.
    #[must_use]
    pub fn repeated(name: &'static str, children: DescriptorSet) -> Self {
        Self {
            children: Some(Box::new(children)),
            ..Self::new(name, FieldKind::RepeatedBlock)
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field as deprecated with the given notice.
    #[must_use]
    pub fn deprecated(mut self, message: &'static str) -> Self {
        self.deprecated = Some(message);
        self
    }

    /// Attaches a validator.
    #[must_use]
    pub fn validator(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Canonical, underscore-separated name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the field must be set.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Deprecation notice, if any.
    #[must_use]
    pub fn deprecation(&self) -> Option<&'static str> {
        self.deprecated
    }

    /// Runs the validator, if any.
    #[must_use]
    pub fn validate(&self, value: &Scalar) -> Validation {
        self.validate.map_or_else(Validation::ok, |f| f(value))
    }

    /// Child descriptors for nested and repeated kinds.
    #[must_use]
    pub fn children(&self) -> Option<&DescriptorSet> {
        self.children.as_deref()
    }

    /// The key as written in the document (underscores become dashes).
    #[must_use]
    pub fn output_key(&self) -> String {
        dash_case(self.name)
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("deprecated", &self.deprecated)
            .field("has_validator", &self.validate.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// Replaces every underscore with a dash.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::schema::dash_case;
///
/// assert_eq!(dash_case("initial_advertise_peer_urls"), "initial-advertise-peer-urls");
/// ```
#[must_use]
pub fn dash_case(name: &str) -> String {
    name.replace('_', "-")
}

/// An ordered set of descriptors for one block.
///
/// Declaration order is the order renderers walk when they need one.
#[derive(Debug, Clone)]
pub struct DescriptorSet {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl DescriptorSet {
    /// Creates an empty set for the named block.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Builder-style append.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// The block's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up a descriptor by canonical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Child set of a nested or repeated field.
    #[must_use]
    pub fn children_of(&self, name: &str) -> Option<&DescriptorSet> {
        self.get(name).and_then(FieldDescriptor::children)
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the set declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reject_all(_: &Scalar) -> Validation {
        Validation::error("nope")
    }

    #[test]
    fn test_builder_flags() {
        let field = FieldDescriptor::string("name")
            .required()
            .deprecated("old")
            .validator(reject_all);

        assert!(field.is_required());
        assert_eq!(field.deprecation(), Some("old"));
        let result = field.validate(&Scalar::String("x".into()));
        assert_eq!(result.errors, vec!["nope".to_string()]);
    }

    #[test]
    fn test_no_validator_is_ok() {
        let field = FieldDescriptor::integer("verbosity");
        assert!(field.validate(&Scalar::Integer(2)).is_ok());
    }

    #[test]
    fn test_nested_children_lookup() {
        let set = DescriptorSet::new("root").field(FieldDescriptor::repeated(
            "systemd_unit",
            DescriptorSet::new("systemd_unit").field(FieldDescriptor::string("name")),
        ));

        let children = set.children_of("systemd_unit").unwrap();
        assert_eq!(children.name(), "systemd_unit");
        assert!(children.get("name").is_some());
        assert!(set.children_of("missing").is_none());
    }

    #[test]
    fn test_declaration_order_preserved() {
        let set = DescriptorSet::new("update_strategy")
            .field(FieldDescriptor::string("reboot_strategy"))
            .field(FieldDescriptor::string("server"))
            .field(FieldDescriptor::string("group"));
        let names: Vec<_> = set.iter().map(FieldDescriptor::name).collect();
        assert_eq!(names, vec!["reboot_strategy", "server", "group"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_dash_case_leaves_identifier_alone() {
        let field = FieldDescriptor::list("etcd_servers");
        assert_eq!(field.output_key(), "etcd-servers");
        assert_eq!(field.name(), "etcd_servers");
        assert_eq!(dash_case("hostname"), "hostname");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FieldKind::ListOfString.to_string(), "list of strings");
        assert_eq!(FieldKind::RepeatedBlock.to_string(), "list of blocks");
    }
}

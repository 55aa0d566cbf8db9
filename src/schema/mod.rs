//! Attribute schema model
//!
//! A [`DescriptorTree`] maps attribute names to [`AttributeDescriptor`]s.
//! Complex attributes (objects, lists of objects, properties) carry a nested
//! tree as their value type, which is what attribute paths descend through.
//!
//! # Architecture
//!
//! - `address`: `/type=name` resource addresses
//! - `description`: conversion from management-model JSON descriptions
//! - `source`: where descriptor trees come from, and a TTL cache over them

pub mod address;
pub mod description;
pub mod source;

use std::collections::BTreeMap;
use std::fmt;

pub use address::{AddressNode, ResourceAddress};
pub use description::{attributes_from_response, tree_from_attributes};
pub use source::{CachedSchemaSource, SchemaSource, SnapshotSchemaSource, StaticSchemaSource};

/// Scalar value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    BigDecimal,
    BigInteger,
    Boolean,
    Bytes,
    Double,
    Expression,
    Int,
    Long,
    String,
    Type,
    Undefined,
}

impl PrimitiveType {
    /// Map a model type name; unknown names are `Undefined`
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "BIG_DECIMAL" => PrimitiveType::BigDecimal,
            "BIG_INTEGER" => PrimitiveType::BigInteger,
            "BOOLEAN" => PrimitiveType::Boolean,
            "BYTES" => PrimitiveType::Bytes,
            "DOUBLE" => PrimitiveType::Double,
            "EXPRESSION" => PrimitiveType::Expression,
            "INT" => PrimitiveType::Int,
            "LONG" => PrimitiveType::Long,
            "STRING" => PrimitiveType::String,
            "TYPE" => PrimitiveType::Type,
            _ => PrimitiveType::Undefined,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::BigDecimal => "BIG_DECIMAL",
            PrimitiveType::BigInteger => "BIG_INTEGER",
            PrimitiveType::Boolean => "BOOLEAN",
            PrimitiveType::Bytes => "BYTES",
            PrimitiveType::Double => "DOUBLE",
            PrimitiveType::Expression => "EXPRESSION",
            PrimitiveType::Int => "INT",
            PrimitiveType::Long => "LONG",
            PrimitiveType::String => "STRING",
            PrimitiveType::Type => "TYPE",
            PrimitiveType::Undefined => "UNDEFINED",
        }
    }
}

/// Type of the elements or fields of a container attribute
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Primitive(PrimitiveType),
    Complex(DescriptorTree),
}

/// Declared type of an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    Primitive(PrimitiveType),
    Object(Option<ValueType>),
    List(Option<ValueType>),
    Property(Option<ValueType>),
}

impl AttributeType {
    fn value_type(&self) -> Option<&ValueType> {
        match self {
            AttributeType::Primitive(_) => None,
            AttributeType::Object(value)
            | AttributeType::List(value)
            | AttributeType::Property(value) => value.as_ref(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (container, value) = match self {
            AttributeType::Primitive(kind) => return write!(f, "{}", kind.name()),
            AttributeType::Object(value) => ("OBJECT", value),
            AttributeType::List(value) => ("LIST", value),
            AttributeType::Property(value) => ("PROPERTY", value),
        };
        match value {
            Some(ValueType::Primitive(kind)) => write!(f, "{container}<{}>", kind.name()),
            Some(ValueType::Complex(_)) => write!(f, "{container}<complex>"),
            None => write!(f, "{container}"),
        }
    }
}

/// Access mode of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessType {
    ReadOnly,
    #[default]
    ReadWrite,
    Metric,
}

impl AccessType {
    /// Parse a model access-type string; unknown values are read-write
    pub fn from_name(name: &str) -> Self {
        match name {
            "read-only" => AccessType::ReadOnly,
            "metric" => AccessType::Metric,
            _ => AccessType::ReadWrite,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AccessType::ReadOnly => "read-only",
            AccessType::ReadWrite => "read-write",
            AccessType::Metric => "metric",
        }
    }
}

/// Description of one attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    pub attribute_type: AttributeType,
    pub access: AccessType,
    pub description: Option<String>,
}

impl AttributeDescriptor {
    pub fn new(attribute_type: AttributeType) -> Self {
        Self {
            attribute_type,
            access: AccessType::default(),
            description: None,
        }
    }

    pub fn with_access(mut self, access: AccessType) -> Self {
        self.access = access;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Only read-only attributes are excluded from writable completion
    pub fn is_writable(&self) -> bool {
        self.access != AccessType::ReadOnly
    }

    /// Nested attributes reachable through this one, if its value type is complex
    pub fn nested(&self) -> Option<&DescriptorTree> {
        match self.attribute_type.value_type() {
            Some(ValueType::Complex(tree)) => Some(tree),
            _ => None,
        }
    }

    /// Separator that continues a path through this attribute
    pub fn structural_hint(&self) -> Option<&'static str> {
        match self.attribute_type {
            AttributeType::Object(_) => Some("."),
            AttributeType::List(_) => Some("["),
            _ => None,
        }
    }
}

/// Attribute name → descriptor, iterated in ascending name order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorTree {
    attributes: BTreeMap<String, AttributeDescriptor>,
}

impl DescriptorTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, descriptor: AttributeDescriptor) {
        self.attributes.insert(name.into(), descriptor);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, descriptor: AttributeDescriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeDescriptor)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Follow a sequence of attribute names through nested value types
    ///
    /// # Returns
    /// * `Option<&AttributeDescriptor>` - Descriptor of the last name, if every step resolves
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&AttributeDescriptor> {
        let (last, parents) = path.split_last()?;
        let mut tree = self;
        for name in parents {
            tree = tree.get(name.as_ref())?.nested()?;
        }
        tree.get(last.as_ref())
    }
}

impl<K: Into<String>> FromIterator<(K, AttributeDescriptor)> for DescriptorTree {
    fn from_iter<T: IntoIterator<Item = (K, AttributeDescriptor)>>(iter: T) -> Self {
        Self {
            attributes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string() -> AttributeDescriptor {
        AttributeDescriptor::new(AttributeType::Primitive(PrimitiveType::String))
    }

    #[test]
    fn test_only_read_only_is_not_writable() {
        assert!(!string().with_access(AccessType::ReadOnly).is_writable());
        assert!(string().with_access(AccessType::ReadWrite).is_writable());
        assert!(string().with_access(AccessType::Metric).is_writable());
    }

    #[test]
    fn test_nested_requires_complex_value_type() {
        let inner = DescriptorTree::new().with("port", string());
        let object = AttributeDescriptor::new(AttributeType::Object(Some(ValueType::Complex(
            inner.clone(),
        ))));
        assert_eq!(object.nested(), Some(&inner));
        assert_eq!(object.structural_hint(), Some("."));

        let map = AttributeDescriptor::new(AttributeType::Object(Some(ValueType::Primitive(
            PrimitiveType::String,
        ))));
        assert!(map.nested().is_none());

        let list = AttributeDescriptor::new(AttributeType::List(None));
        assert!(list.nested().is_none());
        assert_eq!(list.structural_hint(), Some("["));

        assert!(string().nested().is_none());
        assert!(string().structural_hint().is_none());
    }

    #[test]
    fn test_tree_iterates_sorted() {
        let tree: DescriptorTree = [("zeta", string()), ("alpha", string()), ("mid", string())]
            .into_iter()
            .collect();
        let names: Vec<&str> = tree.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_lookup() {
        let inner = DescriptorTree::new().with("port", string().with_description("Port"));
        let tree = DescriptorTree::new().with(
            "socket",
            AttributeDescriptor::new(AttributeType::Object(Some(ValueType::Complex(inner)))),
        );

        let port = tree.lookup(&["socket", "port"]).unwrap();
        assert_eq!(port.description.as_deref(), Some("Port"));
        assert!(tree.lookup(&["socket", "missing"]).is_none());
        assert!(tree.lookup::<&str>(&[]).is_none());
    }

    #[test]
    fn test_type_display() {
        assert_eq!(
            AttributeType::List(Some(ValueType::Primitive(PrimitiveType::Int))).to_string(),
            "LIST<INT>"
        );
        assert_eq!(
            AttributeType::Object(Some(ValueType::Complex(DescriptorTree::new()))).to_string(),
            "OBJECT<complex>"
        );
        assert_eq!(
            AttributeType::Primitive(PrimitiveType::Boolean).to_string(),
            "BOOLEAN"
        );
        assert_eq!(PrimitiveType::from_name("big_decimal"), PrimitiveType::BigDecimal);
        assert_eq!(PrimitiveType::from_name("nope"), PrimitiveType::Undefined);
    }
}

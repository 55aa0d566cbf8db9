//! Conversion from management-model JSON descriptions
//!
//! Descriptions arrive in the shape of a `read-resource-description`
//! response:
//!
//! ```json
//! {
//!   "outcome": "success",
//!   "result": {
//!     "attributes": {
//!       "name": { "type": { "TYPE_MODEL_VALUE": "STRING" }, "access-type": "read-write" }
//!     }
//!   }
//! }
//! ```
//!
//! A wildcard address (`/subsystem=web/connector=*`) answers with a list of
//! per-resource results; the one whose address carries the `*` is used.

use serde_json::{Map, Value};

use super::{AccessType, AttributeDescriptor, AttributeType, DescriptorTree, PrimitiveType, ValueType};
use crate::error::SchemaError;

const RESULT: &str = "result";
const ADDRESS: &str = "address";
const ATTRIBUTES: &str = "attributes";
const TYPE: &str = "type";
const VALUE_TYPE: &str = "value-type";
const ACCESS_TYPE: &str = "access-type";
const DESCRIPTION: &str = "description";
const TYPE_MODEL_VALUE: &str = "TYPE_MODEL_VALUE";

/// Extract the attribute descriptions from a description response
///
/// # Arguments
/// * `response` - A `read-resource-description` response
///
/// # Returns
/// * `Ok(None)` - The response describes no attributes
/// * `Ok(Some(tree))` - The attribute descriptions
/// * `Err(SchemaError)` - A wildcard response without a usable wildcard entry
pub fn attributes_from_response(response: &Value) -> Result<Option<DescriptorTree>, SchemaError> {
    let Some(mut result) = defined(response.get(RESULT)) else {
        return Ok(None);
    };

    if let Value::Array(items) = result {
        let Some(item) = find_wildcard_result(items)? else {
            return Ok(None);
        };
        match defined(item.get(RESULT)) {
            Some(inner) => result = inner,
            None => return Ok(None),
        }
    }

    defined(result.get(ATTRIBUTES))
        .map(tree_from_attributes)
        .transpose()
}

/// Locate the result item addressed with a `*` value.
///
/// `Ok(None)` when an item's address is not a list at all.
fn find_wildcard_result(items: &[Value]) -> Result<Option<&Value>, SchemaError> {
    for item in items {
        let Some(Value::Array(address)) = item.get(ADDRESS) else {
            return Ok(None);
        };
        for node in address {
            let (_, name) = as_property(node)
                .ok_or_else(|| SchemaError::InvalidAddressNode(node.to_string()))?;
            if name.as_str() == Some("*") {
                return Ok(Some(item));
            }
        }
    }
    Err(SchemaError::MissingWildcard)
}

/// Convert an `attributes` map into a descriptor tree
pub fn tree_from_attributes(attributes: &Value) -> Result<DescriptorTree, SchemaError> {
    let Value::Object(map) = attributes else {
        return Err(SchemaError::InvalidFormat(format!(
            "attribute descriptions must be an object, found {}",
            kind_of(attributes)
        )));
    };

    map.iter()
        .map(|(name, descr)| descriptor_from(descr).map(|d| (name.as_str(), d)))
        .collect()
}

fn descriptor_from(descr: &Value) -> Result<AttributeDescriptor, SchemaError> {
    let Value::Object(fields) = descr else {
        return Ok(AttributeDescriptor::new(AttributeType::Primitive(
            PrimitiveType::Undefined,
        )));
    };

    let value_type = defined(fields.get(VALUE_TYPE)).map(value_type_from).transpose()?;
    let attribute_type = match type_name(fields.get(TYPE)) {
        Some("OBJECT") => AttributeType::Object(value_type),
        Some("LIST") => AttributeType::List(value_type),
        Some("PROPERTY") => AttributeType::Property(value_type),
        Some(other) => AttributeType::Primitive(PrimitiveType::from_name(other)),
        None => AttributeType::Primitive(PrimitiveType::Undefined),
    };

    let access = fields
        .get(ACCESS_TYPE)
        .and_then(Value::as_str)
        .map(AccessType::from_name)
        .unwrap_or_default();

    let mut descriptor = AttributeDescriptor::new(attribute_type).with_access(access);
    if let Some(text) = fields.get(DESCRIPTION).and_then(Value::as_str) {
        descriptor = descriptor.with_description(text);
    }
    Ok(descriptor)
}

fn value_type_from(value: &Value) -> Result<ValueType, SchemaError> {
    if let Some(name) = type_name(Some(value)) {
        return Ok(ValueType::Primitive(PrimitiveType::from_name(name)));
    }
    match value {
        Value::Object(_) => Ok(ValueType::Complex(tree_from_attributes(value)?)),
        _ => Ok(ValueType::Primitive(PrimitiveType::Undefined)),
    }
}

/// `"STRING"` or `{"TYPE_MODEL_VALUE": "STRING"}`
fn type_name(value: Option<&Value>) -> Option<&str> {
    match value? {
        Value::String(name) => Some(name.as_str()),
        Value::Object(map) if is_type_model_value(map) => map.get(TYPE_MODEL_VALUE)?.as_str(),
        _ => None,
    }
}

fn is_type_model_value(map: &Map<String, Value>) -> bool {
    map.len() == 1 && map.contains_key(TYPE_MODEL_VALUE)
}

/// Single-entry object, the JSON form of a property
fn as_property(node: &Value) -> Option<(&String, &Value)> {
    match node {
        Value::Object(map) if map.len() == 1 => map.iter().next(),
        _ => None,
    }
}

fn defined(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

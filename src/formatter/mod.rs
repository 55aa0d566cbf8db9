//! Output formatting and colorization for attrsh
//!
//! This module renders command execution results for the terminal:
//! - Attribute descriptions (type, access, description, nested attributes)
//! - Plain messages
//! - Optional color highlighting

mod colorizer;

pub use colorizer::Colorizer;

use crate::executor::{ExecutionResult, ResultData};
use crate::schema::AttributeDescriptor;

/// Main formatter for execution results
pub struct Formatter {
    /// Colorizer for output highlighting
    colorizer: Colorizer,
}

impl Formatter {
    /// Create a new formatter
    ///
    /// # Arguments
    /// * `use_colors` - Enable colored output
    pub fn new(use_colors: bool) -> Self {
        Self {
            colorizer: Colorizer::new(use_colors),
        }
    }

    pub fn colorizer(&self) -> &Colorizer {
        &self.colorizer
    }

    /// Format an execution result
    ///
    /// # Returns
    /// * `Option<String>` - Text to print, or `None` when there is nothing to show
    pub fn format(&self, result: &ExecutionResult) -> Option<String> {
        match &result.data {
            ResultData::Attribute { path, descriptor } => {
                Some(self.format_attribute(path, descriptor))
            }
            ResultData::Message(msg) => Some(msg.clone()),
            ResultData::None => None,
        }
    }

    fn format_attribute(&self, path: &str, descriptor: &AttributeDescriptor) -> String {
        let c = &self.colorizer;
        let mut lines = vec![c.path(path)];

        lines.push(format!(
            "  {} {}",
            c.label("type:       "),
            c.type_name(&descriptor.attribute_type.to_string())
        ));
        lines.push(format!(
            "  {} {}",
            c.label("access:     "),
            c.access(descriptor.access.name(), descriptor.is_writable())
        ));
        if let Some(text) = &descriptor.description {
            lines.push(format!("  {} {}", c.label("description:"), text));
        }
        if let Some(nested) = descriptor.nested() {
            let names: Vec<&str> = nested.iter().map(|(name, _)| name).collect();
            lines.push(format!("  {} {}", c.label("attributes: "), names.join(", ")));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AccessType, AttributeType, DescriptorTree, PrimitiveType, ValueType};

    #[test]
    fn test_format_attribute() {
        let nested = DescriptorTree::new()
            .with("port", AttributeDescriptor::new(AttributeType::Primitive(PrimitiveType::Int)))
            .with("host", AttributeDescriptor::new(AttributeType::Primitive(PrimitiveType::String)));
        let descriptor =
            AttributeDescriptor::new(AttributeType::Object(Some(ValueType::Complex(nested))))
                .with_access(AccessType::ReadOnly)
                .with_description("Socket binding");
        let result = ExecutionResult::success(ResultData::Attribute {
            path: "socket".to_string(),
            descriptor,
        });

        let text = Formatter::new(false).format(&result).unwrap();
        assert_eq!(
            text,
            "socket\n  type:        OBJECT<complex>\n  access:      read-only\n  \
             description: Socket binding\n  attributes:  host, port"
        );
    }

    #[test]
    fn test_format_message_and_none() {
        let formatter = Formatter::new(false);
        assert_eq!(
            formatter.format(&ExecutionResult::message("done")),
            Some("done".to_string())
        );
        assert_eq!(formatter.format(&ExecutionResult::none()), None);
    }
}

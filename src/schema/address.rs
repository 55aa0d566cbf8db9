//! Resource addresses
//!
//! A resource address names a node of the management model as an ordered
//! list of `type=name` pairs, written `/subsystem=web/connector=http`.
//! The empty list is the root address and is written `/`.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// One `type=name` element of a resource address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressNode {
    pub node_type: String,
    pub name: String,
}

impl AddressNode {
    pub fn new(node_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            name: name.into(),
        }
    }

    /// Whether this node selects every child of its type
    pub fn is_wildcard(&self) -> bool {
        self.name == "*"
    }
}

/// Ordered list of address nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceAddress {
    nodes: Vec<AddressNode>,
}

impl ResourceAddress {
    /// The root address `/`
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[AddressNode] {
        &self.nodes
    }

    /// Append a node, returning the child address
    pub fn child(&self, node_type: impl Into<String>, name: impl Into<String>) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.push(AddressNode::new(node_type, name));
        Self { nodes }
    }

    /// Address one level up; the root is its own parent
    pub fn parent(&self) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.pop();
        Self { nodes }
    }

    /// Resolve a `cd`-style target against this address
    ///
    /// # Arguments
    /// * `target` - `..`, an absolute address (`/a=b`) or a relative one (`a=b/c=d`)
    ///
    /// # Returns
    /// * `Result<ResourceAddress, ParseError>` - The resolved address
    pub fn resolve(&self, target: &str) -> Result<Self, ParseError> {
        let target = target.trim();
        if target.starts_with('/') {
            return target.parse();
        }

        let mut resolved = self.clone();
        for part in target.split('/').filter(|p| !p.is_empty()) {
            if part == ".." {
                resolved = resolved.parent();
            } else {
                resolved.nodes.push(parse_node(part, target)?);
            }
        }
        Ok(resolved)
    }
}

fn parse_node(part: &str, whole: &str) -> Result<AddressNode, ParseError> {
    match part.split_once('=') {
        Some((node_type, name)) if !node_type.is_empty() && !name.is_empty() => {
            Ok(AddressNode::new(node_type, name))
        }
        _ => Err(ParseError::InvalidAddress(whole.to_string())),
    }
}

impl FromStr for ResourceAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(rest) = s.strip_prefix('/') else {
            return Err(ParseError::InvalidAddress(s.to_string()));
        };

        let nodes = rest
            .split('/')
            .filter(|p| !p.is_empty())
            .map(|part| parse_node(part, s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { nodes })
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            return write!(f, "/");
        }
        for node in &self.nodes {
            write!(f, "/{}={}", node.node_type, node.name)?;
        }
        Ok(())
    }
}

//! Candidate resolution
//!
//! Walks a [`DescriptorTree`] along a parsed attribute path and works out
//! what may follow the cursor.

use crate::parser::{ParsedPath, PathPosition};
use crate::schema::{AttributeDescriptor, DescriptorTree};

/// Candidates and the byte offset they replace from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub candidates: Vec<String>,
    pub offset: usize,
}

impl Completion {
    fn new(candidates: Vec<String>, offset: usize) -> Self {
        Self { candidates, offset }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Resolve completion candidates for a parsed path
///
/// # Arguments
/// * `path` - Parsed attribute path expression
/// * `schema` - Attribute descriptions of the addressed resource
/// * `writable_only` - Hide read-only attributes
///
/// # Returns
/// * `None` - A committed segment does not resolve to a (visible) complex attribute
/// * `Some(completion)` - Candidates in ascending order, possibly empty
pub fn resolve(
    path: &ParsedPath,
    schema: &DescriptorTree,
    writable_only: bool,
) -> Option<Completion> {
    let visible = |descr: &AttributeDescriptor| !writable_only || descr.is_writable();

    let mut tree = schema;
    for name in path.segments() {
        let descr = tree.get(name).filter(|d| visible(d))?;
        tree = descr.nested()?;
    }

    let offset = path.insertion_offset();
    let completion = match path.position() {
        PathPosition::AfterDot => {
            let names = tree
                .iter()
                .filter(|(_, descr)| visible(descr))
                .map(|(name, _)| name.to_string())
                .collect();
            Completion::new(names, offset)
        }
        PathPosition::OpenBracket | PathPosition::ListIndex => Completion::new(Vec::new(), offset),
        PathPosition::CloseBracket => {
            Completion::new(vec![".".to_string(), "=".to_string()], offset)
        }
        PathPosition::Name => complete_name(tree, path.fragment(), offset, visible),
    };
    Some(completion)
}

fn complete_name(
    tree: &DescriptorTree,
    chunk: &str,
    mut offset: usize,
    visible: impl Fn(&AttributeDescriptor) -> bool,
) -> Completion {
    let mut candidates = Vec::new();
    let mut exact = None;

    for (name, descr) in tree.iter() {
        if !name.starts_with(chunk) || !visible(descr) {
            continue;
        }
        // a fully typed name is not offered again
        if !chunk.is_empty() && name.len() == chunk.len() {
            exact = Some(descr);
            continue;
        }
        candidates.push(name.to_string());
    }

    if let Some(hint) = exact.and_then(AttributeDescriptor::structural_hint) {
        if candidates.is_empty() {
            offset += chunk.len();
        }
        candidates.push(hint.to_string());
    }

    candidates.sort();
    Completion::new(candidates, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_attribute_path;
    use crate::schema::{AccessType, AttributeType, PrimitiveType, ValueType};

    fn string(access: AccessType) -> AttributeDescriptor {
        AttributeDescriptor::new(AttributeType::Primitive(PrimitiveType::String))
            .with_access(access)
    }

    fn object(tree: DescriptorTree) -> AttributeDescriptor {
        AttributeDescriptor::new(AttributeType::Object(Some(ValueType::Complex(tree))))
    }

    fn list(tree: DescriptorTree) -> AttributeDescriptor {
        AttributeDescriptor::new(AttributeType::List(Some(ValueType::Complex(tree))))
    }

    fn schema() -> DescriptorTree {
        let person = DescriptorTree::new()
            .with("name", string(AccessType::ReadWrite))
            .with("secret", string(AccessType::ReadOnly));
        DescriptorTree::new()
            .with("name", object(person.clone()))
            .with("nation", string(AccessType::ReadWrite))
            .with("servers", list(person.clone()))
            .with("locked", object(person).with_access(AccessType::ReadOnly))
            .with("counter", string(AccessType::Metric))
    }

    fn complete(input: &str, writable_only: bool) -> Option<Completion> {
        let path = parse_attribute_path(input).unwrap();
        resolve(&path, &schema(), writable_only)
    }

    fn candidates(input: &str, writable_only: bool) -> Vec<String> {
        complete(input, writable_only).unwrap().candidates
    }

    #[test]
    fn test_property_value_type_descends() {
        let inner = DescriptorTree::new().with("k", string(AccessType::ReadWrite));
        let schema = DescriptorTree::new()
            .with(
                "p",
                AttributeDescriptor::new(AttributeType::Property(Some(ValueType::Complex(
                    inner.clone(),
                )))),
            )
            .with("l", list(inner));
        let resolve_in =
            |input: &str| resolve(&parse_attribute_path(input).unwrap(), &schema, false);

        assert_eq!(resolve_in("p."), Some(Completion::new(vec!["k".to_string()], 2)));
        // a property takes no structural hint
        assert_eq!(resolve_in("p"), Some(Completion::new(Vec::new(), 0)));
        assert_eq!(resolve_in("l[0].k"), Some(Completion::new(Vec::new(), 5)));
    }

    #[test]
    fn test_empty_index_has_no_candidates() {
        let completion = complete("servers[]", false).unwrap();
        assert!(completion.is_empty());
        assert_eq!(completion.offset, 9);

        let completion = complete("servers[]", true).unwrap();
        assert!(completion.is_empty());
    }

    #[test]
    fn test_after_dot_writable_only() {
        assert_eq!(candidates("name.", true), ["name"]);
        assert_eq!(candidates("name.", false), ["name", "secret"]);
        assert_eq!(complete("name.", true).unwrap().offset, 5);
    }

    #[test]
    fn test_exact_object_match_gives_dot() {
        let completion = complete("name", false).unwrap();
        assert_eq!(completion.candidates, ["."]);
        assert_eq!(completion.offset, 4);
    }

    #[test]
    fn test_prefix_with_several_matches() {
        let completion = complete("na", false).unwrap();
        assert_eq!(completion.candidates, ["name", "nation"]);
        assert_eq!(completion.offset, 0);
    }

    #[test]
    fn test_exact_match_alongside_longer_names() {
        let schema = DescriptorTree::new()
            .with("pool", object(DescriptorTree::new()))
            .with("pool-size", string(AccessType::ReadWrite));
        let path = parse_attribute_path("pool").unwrap();
        let completion = resolve(&path, &schema, false).unwrap();

        assert_eq!(completion.candidates, [".", "pool-size"]);
        assert_eq!(completion.offset, 0);
    }

    #[test]
    fn test_exact_list_match_gives_bracket() {
        let completion = complete("servers", false).unwrap();
        assert_eq!(completion.candidates, ["["]);
        assert_eq!(completion.offset, 7);
    }

    #[test]
    fn test_exact_primitive_match_is_empty() {
        let completion = complete("nation", false).unwrap();
        assert!(completion.is_empty());
        assert_eq!(completion.offset, 0);
    }

    #[test]
    fn test_empty_input_lists_everything() {
        assert_eq!(
            candidates("", false),
            ["counter", "locked", "name", "nation", "servers"]
        );
        assert_eq!(candidates("", true), ["counter", "name", "nation", "servers"]);
    }

    #[test]
    fn test_index_positions() {
        assert!(candidates("servers[", false).is_empty());
        assert!(candidates("servers[1", false).is_empty());
        assert_eq!(candidates("servers[1]", false), [".", "="]);
        assert_eq!(complete("servers[1]", false).unwrap().offset, 10);
        assert_eq!(candidates("servers[1].", true), ["name"]);
        assert_eq!(candidates("servers[1].se", false), ["secret"]);
    }

    #[test]
    fn test_unresolvable_paths() {
        assert_eq!(complete("missing.", false), None);
        assert_eq!(complete("nation.", false), None);
        assert_eq!(complete("locked.", true), None);
        assert!(complete("locked.", false).is_some());
        assert_eq!(complete("name.name.", false), None);
    }

    #[test]
    fn test_no_match_is_empty_not_none() {
        let completion = complete("zz", false).unwrap();
        assert!(completion.is_empty());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let path = parse_attribute_path("name.na").unwrap();
        let schema = schema();
        let first = resolve(&path, &schema, true);
        assert_eq!(first, resolve(&path, &schema, true));
        assert_eq!(first.unwrap().candidates, ["name"]);
    }

    #[test]
    fn test_every_prefix_hides_read_only() {
        let interface = DescriptorTree::new()
            .with("public", string(AccessType::ReadWrite))
            .with("private", string(AccessType::ReadOnly));
        let schema = DescriptorTree::new()
            .with(
                "server",
                object(
                    DescriptorTree::new()
                        .with("interface", object(interface))
                        .with("id", string(AccessType::ReadOnly)),
                ),
            )
            .with("status", string(AccessType::ReadOnly));

        let input = "server.interface.pub";
        for end in 0..=input.len() {
            let path = parse_attribute_path(&input[..end]).unwrap();
            if let Some(completion) = resolve(&path, &schema, true) {
                for candidate in &completion.candidates {
                    assert!(
                        !["status", "id", "private"].contains(&candidate.as_str()),
                        "read-only '{candidate}' offered for '{}'",
                        &input[..end]
                    );
                }
            }
        }
    }
}

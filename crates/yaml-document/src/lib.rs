//! YAML parsing into a span-tracking Structural Tree.
//!
//! Produces the data model described in `spec.md` §3: a tagged-union tree
//! with byte-offset spans on every node, explicit scalar raw-form tracking
//! (so `"true"` the string and `true` the boolean stay distinguishable),
//! first-class anchor/alias nodes, and best-effort recovery on syntax
//! errors rather than aborting the whole parse.

mod comments;
mod error;
mod json;
mod node;
mod parser;
mod scalar;
mod span;
mod tags;

pub use comments::Comment;
pub use error::{ParseError, ParseErrorKind};
pub use json::to_json;
pub use node::{Document, MappingEntry, Node, NodeId, NodeKind, ALIAS_EXPANSION_LIMIT};
pub use parser::{parse, Directive, ParseOptions, ParsedDocument};
pub use scalar::{infer_plain_type, InferredType, ScalarStyle, YamlVersion};
pub use span::Span;
pub use tags::{CustomTagKind, CustomTagTable};

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(source: &str) -> ParsedDocument {
        parse(source, &ParseOptions::default())
    }

    #[test]
    fn comment_only_source_yields_one_empty_document() {
        let parsed = parse_default("# just a comment\n");
        assert_eq!(parsed.documents.len(), 1);
        assert!(parsed.documents[0].root.is_none());
        assert_eq!(parsed.documents[0].comments.len(), 1);
    }

    #[test]
    fn empty_source_yields_no_documents() {
        let parsed = parse_default("");
        assert!(parsed.documents.is_empty());
    }

    #[test]
    fn explicit_str_tag_overrides_boolean_inference() {
        let parsed = parse_default("a: !!str yes\n");
        let doc = &parsed.documents[0];
        let root = doc.root.expect("root");
        if let NodeKind::Mapping(entries) = &doc.get(root).kind {
            let value = doc.get(entries[0].value);
            assert!(matches!(value.kind, NodeKind::String(ref s) if s == "yes"));
        } else {
            panic!("expected a mapping root");
        }
    }

    #[test]
    fn duplicate_keys_are_warnings_first_wins() {
        let parsed = parse_default("a: 1\na: 2\n");
        let doc = &parsed.documents[0];
        assert!(doc
            .errors
            .iter()
            .any(|e| e.is_warning && e.kind == ParseErrorKind::DuplicateKey));
    }

    #[test]
    fn custom_tag_matching_declared_kind_parses_without_warning() {
        let options = ParseOptions {
            custom_tags: CustomTagTable::from_entries(["!Ref sequence"]),
            ..ParseOptions::default()
        };
        let parsed = parse("a: !Ref [x, y]\n", &options);
        let doc = &parsed.documents[0];
        assert!(!doc.errors.iter().any(|e| e.kind == ParseErrorKind::DuplicateKey));
        assert!(doc.errors.is_empty());
    }

    #[test]
    fn custom_tag_mismatched_kind_is_a_warning() {
        let options = ParseOptions {
            custom_tags: CustomTagTable::from_entries(["!Ref sequence"]),
            ..ParseOptions::default()
        };
        let parsed = parse("a: !Ref scalar-value\n", &options);
        let doc = &parsed.documents[0];
        assert!(doc.errors.iter().any(|e| e.is_warning));
    }

    #[test]
    fn merge_key_pulls_anchor_properties_into_host_mapping_silently() {
        let parsed = parse_default("base: &b\n  a: 1\nchild:\n  <<: *b\n  c: 2\n");
        let doc = &parsed.documents[0];
        assert!(doc.errors.is_empty());
        let root = doc.root.expect("root");
        let NodeKind::Mapping(entries) = &doc.get(root).kind else { panic!("expected mapping root") };
        let child = entries.iter().find(|e| matches!(&doc.get(e.key).kind, NodeKind::String(s) if s == "child")).unwrap();
        let NodeKind::Mapping(child_entries) = &doc.get(child.value).kind else { panic!("expected mapping") };
        let keys: Vec<&str> = child_entries
            .iter()
            .filter_map(|e| match &doc.get(e.key).kind {
                NodeKind::String(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert!(keys.contains(&"a"));
        assert!(keys.contains(&"c"));
    }

    #[test]
    fn merge_key_with_sequence_value_warns_and_drops() {
        let parsed = parse_default("base: &b\n  - a\n  - b\nchild:\n  <<: *b\n  c: 2\n");
        let doc = &parsed.documents[0];
        assert!(doc
            .errors
            .iter()
            .any(|e| e.is_warning && e.kind == ParseErrorKind::IncludeWithoutValue));
    }

    #[test]
    fn spans_nest_within_parent() {
        let parsed = parse_default("a: {b: 1}\n");
        let doc = &parsed.documents[0];
        for node in &doc.nodes_for_test() {
            if let Some(parent) = node.parent {
                let parent_span = doc.get(parent).span;
                assert!(parent_span.contains(node.span));
            }
        }
    }
}

#[cfg(test)]
impl Document {
    fn nodes_for_test(&self) -> Vec<Node> {
        self.nodes.clone()
    }
}

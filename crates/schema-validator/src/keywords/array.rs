use yaml_document::{Document, NodeId, Span};

use super::helpers::equal;
use crate::result::ValidationResult;
use crate::schema_nav::SchemaCursor;

/// `minItems`/`maxItems`/`uniqueItems` — the keywords that only need the
/// sequence's length and materialized elements, never a subschema
/// recursion (`spec.md` §4.6).
pub fn check(cursor: &SchemaCursor, items: &[NodeId], doc: &Document, span: Span, result: &mut ValidationResult) {
    if let Some(min) = cursor.get("minItems").and_then(serde_json::Value::as_u64) {
        if (items.len() as u64) < min {
            result.push(span, "minItems", format!("Array has fewer than {min} items."));
        }
    }
    if let Some(max) = cursor.get("maxItems").and_then(serde_json::Value::as_u64) {
        if (items.len() as u64) > max {
            result.push(span, "maxItems", format!("Array has more than {max} items."));
        }
    }
    if cursor.get("uniqueItems").and_then(serde_json::Value::as_bool) == Some(true) {
        let values: Vec<_> = items.iter().map(|id| yaml_document::to_json(doc, *id)).collect();
        let has_duplicate = values
            .iter()
            .enumerate()
            .any(|(i, value)| values[..i].iter().any(|earlier| equal(earlier, value)));
        if has_duplicate {
            result.push(span, "uniqueItems", "Array has non-unique elements.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cursor(schema: &serde_json::Value) -> SchemaCursor<'_> {
        let registry = schema_referencing::Registry::options()
            .try_new("mem:///root", schema_referencing::Draft::Draft202012.create_resource(schema.clone()))
            .unwrap();
        let resolver = registry.try_resolver("mem:///root").unwrap();
        SchemaCursor::root(schema, resolver, schema_referencing::Draft::Draft202012)
    }

    #[test]
    fn flags_non_unique_items() {
        let schema = json!({"uniqueItems": true});
        let parsed = yaml_document::parse("- 1\n- 1.0\n", &yaml_document::ParseOptions::default());
        let doc = &parsed.documents[0];
        let root = doc.root.unwrap();
        let yaml_document::NodeKind::Sequence(items) = &doc.get(root).kind else { panic!() };
        let mut result = ValidationResult::default();
        check(&cursor(&schema), items, doc, doc.get(root).span, &mut result);
        assert!(result.has_errors());
    }
}

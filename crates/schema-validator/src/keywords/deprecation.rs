use yaml_document::Span;

use crate::result::ValidationResult;
use crate::schema_nav::SchemaCursor;

/// A non-standard but widely supported `deprecationMessage` keyword: an
/// informational finding on any instance that reaches this schema node,
/// regardless of whether it otherwise validates (`spec.md` §4.6).
pub fn check(cursor: &SchemaCursor, span: Span, result: &mut ValidationResult) {
    if let Some(message) = cursor.get("deprecationMessage").and_then(serde_json::Value::as_str) {
        result.push(span, "deprecationMessage", message.to_string());
    }
}

use serde_json::Value;
use yaml_document::{Document, NodeId, Span};

use super::helpers::equal;
use crate::result::ValidationResult;
use crate::schema_nav::SchemaCursor;

/// `const`/`enum` against a materialized instance value. Beyond the pass/fail
/// verdict this sets `enum_value_match`/`mismatched_enum_values` on the
/// result, the signal `anyOf`/`oneOf` use to rank alternatives that only
/// differ by an enumerated discriminator (`spec.md` §4.6, §8 scenario 2).
pub fn check(
    cursor: &SchemaCursor,
    doc: &Document,
    node: NodeId,
    span: Span,
    result: &mut ValidationResult,
) {
    let instance = yaml_document::to_json(doc, node);

    if let Some(expected) = cursor.get("const") {
        if equal(&instance, expected) {
            result.enum_value_match = true;
        } else {
            result.mismatched_enum_values.push(expected.clone());
            result.push(span, "const", "Value does not match the expected constant.");
        }
        return;
    }

    if let Some(Value::Array(candidates)) = cursor.get("enum") {
        if candidates.iter().any(|candidate| equal(&instance, candidate)) {
            result.enum_value_match = true;
        } else {
            result.mismatched_enum_values.extend(candidates.iter().cloned());
            let rendered: Vec<String> = candidates.iter().map(|v| v.to_string()).collect();
            result.push(
                span,
                "enum",
                format!("Value is not accepted. Valid values: {}.", rendered.join(", ")),
            );
        }
    }
}

use yaml_document::Span;

use crate::result::ValidationResult;
use crate::schema_nav::SchemaCursor;

/// `contains`'s subschema, if present — the caller validates every element
/// against it and passes the count of matches here via [`check_count`].
pub fn subschema<'r>(cursor: &SchemaCursor<'r>) -> Option<SchemaCursor<'r>> {
    cursor.get("contains").map(|sub| cursor.with_contents(sub))
}

/// `minContains`/`maxContains` against the number of elements that matched
/// `contains`'s subschema. With no `contains` keyword these are no-ops.
pub fn check_count(cursor: &SchemaCursor, matches: usize, span: Span, result: &mut ValidationResult) {
    if cursor.get("contains").is_none() {
        return;
    }
    let min = cursor.get("minContains").and_then(serde_json::Value::as_u64);
    let max = cursor.get("maxContains").and_then(serde_json::Value::as_u64);

    if min.is_none() && max.is_none() && matches == 0 {
        result.push(span, "contains", "Array does not contain a matching element.");
        return;
    }
    if let Some(min) = min {
        if (matches as u64) < min {
            result.push(
                span,
                "minContains",
                format!("Array has too few items matching contains schema. Expected {min} or more."),
            );
        }
    }
    if let Some(max) = max {
        if (matches as u64) > max {
            result.push(
                span,
                "maxContains",
                format!("Array has too many items matching contains schema. Expected {max} or fewer."),
            );
        }
    }
}

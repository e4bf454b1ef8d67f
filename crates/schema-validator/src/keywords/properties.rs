use serde_json::Value;

use crate::ecma::is_match;
use crate::schema_nav::SchemaCursor;

/// Which subschemas apply to a mapping key: every `properties` entry with
/// a matching name, every `patternProperties` entry whose pattern matches,
/// and — only when neither matched — `additionalProperties`, mirroring
/// the applicator composition order in `spec.md` §4.6.
pub fn applicable_schemas<'r>(cursor: &SchemaCursor<'r>, key: &str) -> (Vec<SchemaCursor<'r>>, bool) {
    let mut schemas = Vec::new();
    let mut matched = false;

    if let Some(Value::Object(properties)) = cursor.get("properties") {
        if let Some(sub) = properties.get(key) {
            schemas.push(cursor.with_contents(sub));
            matched = true;
        }
    }
    if let Some(Value::Object(pattern_properties)) = cursor.get("patternProperties") {
        for (pattern, sub) in pattern_properties {
            if pattern_matches(pattern, key) {
                schemas.push(cursor.with_contents(sub));
                matched = true;
            }
        }
    }
    if !matched {
        if let Some(additional) = cursor.get("additionalProperties") {
            if !matches!(additional, Value::Bool(true)) {
                schemas.push(cursor.with_contents(additional));
            }
        }
    }
    (schemas, matched)
}

/// Whether `additionalProperties: false` forbids this key outright
/// (it wasn't matched by `properties` or `patternProperties`).
pub fn forbidden_by_additional_properties(cursor: &SchemaCursor, key: &str, matched: bool) -> bool {
    !matched && matches!(cursor.get("additionalProperties"), Some(Value::Bool(false)))
}

fn pattern_matches(pattern: &str, key: &str) -> bool {
    is_match(pattern, key).unwrap_or(false)
}

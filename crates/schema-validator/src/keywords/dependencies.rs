use serde_json::Value;
use yaml_document::Span;

use crate::result::ValidationResult;
use crate::schema_nav::SchemaCursor;

/// Legacy `dependencies` (draft-07 and earlier) plus `dependentRequired`
/// (draft-2019-09+): for each present key with a list-form dependency,
/// every named key must also be present. The schema-form branch of
/// `dependencies`, and `dependentSchemas`, are handled by [`schema_dependencies`]
/// since they need a full subschema validation against the mapping.
pub fn check(cursor: &SchemaCursor, present_keys: &[&str], span: Span, result: &mut ValidationResult) {
    for (keyword, table) in [
        ("dependencies", cursor.get("dependencies")),
        ("dependentRequired", cursor.get("dependentRequired")),
    ] {
        let Some(Value::Object(table)) = table else { continue };
        for (trigger, dependency) in table {
            if !present_keys.contains(&trigger.as_str()) {
                continue;
            }
            let Value::Array(required) = dependency else { continue };
            for name in required.iter().filter_map(Value::as_str) {
                if !present_keys.contains(&name) {
                    result.push(
                        span,
                        keyword,
                        format!("\"{name}\" is required when \"{trigger}\" is present."),
                    );
                }
            }
        }
    }
}

/// Subschemas from `dependencies` (schema-form) and `dependentSchemas`
/// triggered by a present key, each validated by the caller against the
/// whole mapping instance.
pub fn schema_dependencies<'r>(cursor: &SchemaCursor<'r>, present_keys: &[&str]) -> Vec<SchemaCursor<'r>> {
    let mut schemas = Vec::new();
    for table in [cursor.get("dependencies"), cursor.get("dependentSchemas")] {
        let Some(Value::Object(table)) = table else { continue };
        for (trigger, dependency) in table {
            if !present_keys.contains(&trigger.as_str()) {
                continue;
            }
            if !matches!(dependency, Value::Array(_)) {
                schemas.push(cursor.with_contents(dependency));
            }
        }
    }
    schemas
}

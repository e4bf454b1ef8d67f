use yaml_document::NodeKind;

use crate::result::ValidationResult;
use crate::schema_nav::SchemaCursor;

/// `type` accepts a single type name or an array of them; `integer` matches
/// any YAML/JSON number with no fractional part, including whole floats
/// (`1.0` satisfies `integer`, per the JSON Schema numeric model).
pub fn check(cursor: &SchemaCursor, kind: &NodeKind, span: yaml_document::Span, result: &mut ValidationResult) {
    let Some(type_value) = cursor.get("type") else { return };
    let names: Vec<&str> = match type_value {
        serde_json::Value::String(s) => vec![s.as_str()],
        serde_json::Value::Array(items) => items.iter().filter_map(|v| v.as_str()).collect(),
        _ => return,
    };
    if names.is_empty() || names.iter().any(|name| matches_type(name, kind)) {
        return;
    }
    result.push(
        span,
        "type",
        format!("Incorrect type. Expected \"{}\".", names.join(" or ")),
    );
}

fn matches_type(name: &str, kind: &NodeKind) -> bool {
    match name {
        "integer" => matches!(kind, NodeKind::Integer(_))
            || matches!(kind, NodeKind::Float(f) if f.fract() == 0.0),
        "number" => matches!(kind, NodeKind::Integer(_) | NodeKind::Float(_)),
        "string" => matches!(kind, NodeKind::String(_)),
        "boolean" => matches!(kind, NodeKind::Boolean(_)),
        "null" => matches!(kind, NodeKind::Null),
        "array" => matches!(kind, NodeKind::Sequence(_)),
        "object" => matches!(kind, NodeKind::Mapping(_)),
        _ => true,
    }
}

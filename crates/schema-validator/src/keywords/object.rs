use serde_json::Value;
use yaml_document::{Document, MappingEntry, NodeKind, Span};

use crate::ecma::is_match;
use crate::formats;
use crate::result::ValidationResult;
use crate::schema_nav::SchemaCursor;

/// `minProperties`/`maxProperties`/`required`/`propertyNames` against a
/// mapping's entries. `propertyNames` is evaluated narrowly against the
/// subset of string keywords that cover its overwhelmingly common use
/// (`type: string`, `minLength`/`maxLength`/`pattern`/`format`) rather than
/// a full recursive schema application, since a key is a bare string with
/// no structure to recurse into.
pub fn check(cursor: &SchemaCursor, entries: &[MappingEntry], doc: &Document, span: Span, result: &mut ValidationResult) {
    let keys: Vec<&str> = entries
        .iter()
        .filter_map(|entry| match &doc.get(entry.key).kind {
            NodeKind::String(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();

    if let Some(min) = cursor.get("minProperties").and_then(Value::as_u64) {
        if (keys.len() as u64) < min {
            result.push(span, "minProperties", format!("Object has fewer than {min} properties."));
        }
    }
    if let Some(max) = cursor.get("maxProperties").and_then(Value::as_u64) {
        if (keys.len() as u64) > max {
            result.push(span, "maxProperties", format!("Object has more than {max} properties."));
        }
    }
    if let Some(Value::Array(required)) = cursor.get("required") {
        for name in required.iter().filter_map(Value::as_str) {
            if !keys.contains(&name) {
                result.push(span, "required", format!("\"{name}\" is a required property."));
            }
        }
    }
    if let Some(names_schema) = cursor.get("propertyNames") {
        for entry in entries {
            let NodeKind::String(key) = &doc.get(entry.key).kind else { continue };
            if let Some(message) = violates_property_name(names_schema, key) {
                result.push(doc.get(entry.key).span, "propertyNames", message);
            }
        }
    }
}

fn violates_property_name(schema: &Value, key: &str) -> Option<String> {
    if let Value::Bool(false) = schema {
        return Some(format!("Property name \"{key}\" is not allowed."));
    }
    let Value::Object(schema) = schema else { return None };

    if let Some(type_name) = schema.get("type").and_then(Value::as_str) {
        if type_name != "string" {
            return Some(format!("Property name \"{key}\" is not of type \"{type_name}\"."));
        }
    }
    let length = key.chars().count() as u64;
    if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
        if length < min {
            return Some(format!("Property name \"{key}\" is shorter than the minimum length of {min}."));
        }
    }
    if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
        if length > max {
            return Some(format!("Property name \"{key}\" is longer than the maximum length of {max}."));
        }
    }
    if let Some(pattern) = schema.get("pattern").and_then(Value::as_str) {
        if matches!(is_match(pattern, key), Some(false)) {
            return Some(format!("Property name \"{key}\" does not match the pattern \"{pattern}\"."));
        }
    }
    if let Some(format_name) = schema.get("format").and_then(Value::as_str) {
        if formats::is_known_format(format_name) && !formats::check(format_name, key) {
            return Some(format!("Property name \"{key}\" does not match format \"{format_name}\"."));
        }
    }
    None
}

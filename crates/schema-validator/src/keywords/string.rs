use yaml_document::Span;

use crate::ecma::is_match;
use crate::formats;
use crate::result::ValidationResult;
use crate::schema_nav::SchemaCursor;

/// `minLength`/`maxLength`/`pattern`/`format` over a scalar string instance.
/// Lengths count Unicode scalar values, matching the JSON Schema spec's
/// "number of Unicode characters" wording rather than UTF-8 byte length.
pub fn check(cursor: &SchemaCursor, value: &str, span: Span, result: &mut ValidationResult) {
    let length = value.chars().count();

    if let Some(min) = cursor.get("minLength").and_then(serde_json::Value::as_u64) {
        if (length as u64) < min {
            result.push(span, "minLength", format!("String is shorter than the minimum length of {min}."));
        }
    }
    if let Some(max) = cursor.get("maxLength").and_then(serde_json::Value::as_u64) {
        if (length as u64) > max {
            result.push(span, "maxLength", format!("String is longer than the maximum length of {max}."));
        }
    }
    if let Some(pattern) = cursor.get("pattern").and_then(serde_json::Value::as_str) {
        if matches!(is_match(pattern, value), Some(false)) {
            result.push(span, "pattern", format!("String does not match the pattern \"{pattern}\"."));
        }
    }
    if let Some(format_name) = cursor.get("format").and_then(serde_json::Value::as_str) {
        if formats::is_known_format(format_name) && !formats::check(format_name, value) {
            result.push(span, "format", format!("String does not match format \"{format_name}\"."));
        }
    }
}

use serde_json::Value;
use yaml_document::Span;

use crate::result::ValidationResult;
use crate::schema_nav::SchemaCursor;

/// `minimum`/`maximum`/`exclusiveMinimum`/`exclusiveMaximum`/`multipleOf`
/// against a numeric instance. `exclusiveMinimum`/`exclusiveMaximum` accept
/// either a bound value (draft-06+) or the legacy boolean paired with
/// `minimum`/`maximum` (draft-04), per `spec.md` §4.6.
pub fn check(cursor: &SchemaCursor, value: f64, span: Span, result: &mut ValidationResult) {
    let legacy_exclusive_min = matches!(cursor.get("exclusiveMinimum"), Some(Value::Bool(true)));
    let legacy_exclusive_max = matches!(cursor.get("exclusiveMaximum"), Some(Value::Bool(true)));

    if let Some(min) = cursor.get("minimum").and_then(Value::as_f64) {
        let violates = if legacy_exclusive_min { value <= min } else { value < min };
        if violates {
            result.push(span, "minimum", format!("{value} is less than the minimum of {min}."));
        }
    }
    if let Some(max) = cursor.get("maximum").and_then(Value::as_f64) {
        let violates = if legacy_exclusive_max { value >= max } else { value > max };
        if violates {
            result.push(span, "maximum", format!("{value} is greater than the maximum of {max}."));
        }
    }
    if let Some(min) = cursor.get("exclusiveMinimum").and_then(Value::as_f64) {
        if value <= min {
            result.push(
                span,
                "exclusiveMinimum",
                format!("{value} is less than or equal to the exclusive minimum of {min}."),
            );
        }
    }
    if let Some(max) = cursor.get("exclusiveMaximum").and_then(Value::as_f64) {
        if value >= max {
            result.push(
                span,
                "exclusiveMaximum",
                format!("{value} is greater than or equal to the exclusive maximum of {max}."),
            );
        }
    }
    if let Some(step) = cursor.get("multipleOf").and_then(Value::as_f64) {
        if step > 0.0 {
            let ratio = value / step;
            if (ratio - ratio.round()).abs() > f64::EPSILON * ratio.abs().max(1.0) {
                result.push(span, "multipleOf", format!("{value} is not a multiple of {step}."));
            }
        }
    }
}

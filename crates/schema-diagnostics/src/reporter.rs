use yaml_document::{ParseError, ParseErrorKind};
use schema_validator::ValidationResult;

use crate::diagnostic::Diagnostic;
use crate::position::Range;
use crate::severity::Severity;

/// `yaml-schema: <source label>` (`spec.md` §4.7).
pub fn source_field(source_label: &str) -> String {
    format!("yaml-schema: {source_label}")
}

/// YAML syntax errors (`spec.md` §7): everything except `DuplicateKey` is a
/// hard `Error`; duplicate keys are recoverable `Warning`s, per the parser
/// already continuing past them.
fn parse_error_severity(error: &ParseError) -> Severity {
    if error.is_warning || error.kind == ParseErrorKind::DuplicateKey {
        Severity::Warning
    } else {
        Severity::Error
    }
}

/// Convert this edit's parse errors into diagnostics. `source` has no
/// `source-label` concept (it precedes schema selection), so it always
/// carries the bare `"yaml"` source field.
pub fn report_parse_errors(text: &str, errors: &[ParseError]) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|error| {
            Diagnostic::new(
                Range::from_span(text, error.span),
                error.span,
                parse_error_severity(error),
                error.message(),
                "yaml",
            )
        })
        .collect()
}

/// Convert one schema's validation result into diagnostics, all carrying
/// `source_label`. Every keyword-violation diagnostic is `Warning`-class —
/// "currently promoted to warnings by the editor channel" (`spec.md` §4.6) —
/// matching how the upstream tool actually surfaces these, even though they
/// are firm validation failures internally.
pub fn report_validation(text: &str, result: &ValidationResult, source_label: &str) -> Vec<Diagnostic> {
    let source = source_field(source_label);
    result
        .errors
        .iter()
        .map(|message| {
            Diagnostic::new(
                Range::from_span(text, message.span),
                message.span,
                Severity::Warning,
                message.message.clone(),
                source.clone(),
            )
        })
        .collect()
}

/// A failed schema fetch (`spec.md` §7): surfaced once per validation run
/// that relied on the failed schema, at the document root, since there is
/// no more specific instance span to anchor it to.
pub fn report_fetch_failure(text: &str, root_span: yaml_document::Span, uri: &str, reason: &str, source_label: &str) -> Diagnostic {
    Diagnostic::new(
        Range::from_span(text, root_span),
        root_span,
        Severity::Warning,
        format!("Unable to load schema from '{uri}': {reason}"),
        source_field(source_label),
    )
}

/// Drop colocated duplicates (same range, same message) and stable-sort by
/// `(start, end)` — ties keep insertion order (`spec.md` §4.7, §8).
pub fn finalize(mut diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    diagnostics.sort_by(|a, b| {
        (a.range.start.line, a.range.start.character, a.range.end.line, a.range.end.character)
            .cmp(&(b.range.start.line, b.range.start.character, b.range.end.line, b.range.end.character))
    });
    let mut seen: Vec<(Range, String)> = Vec::new();
    diagnostics.retain(|d| {
        let key = (d.range, d.message.clone());
        if seen.iter().any(|(r, m)| *r == key.0 && *m == key.1) {
            false
        } else {
            seen.push(key);
            true
        }
    });
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_validator::ValidationMessage;
    use yaml_document::Span;

    #[test]
    fn duplicate_key_parse_error_is_a_warning() {
        let error = ParseError::warning(Span::new(0, 1), ParseErrorKind::DuplicateKey);
        assert_eq!(parse_error_severity(&error), Severity::Warning);
    }

    #[test]
    fn colon_missing_is_an_error() {
        let error = ParseError::error(Span::new(0, 1), ParseErrorKind::ColonMissing);
        assert_eq!(parse_error_severity(&error), Severity::Error);
    }

    #[test]
    fn colocated_duplicates_are_dropped() {
        let text = "a: 1\n";
        let mut result = ValidationResult::default();
        result.errors.push(ValidationMessage::new(Span::new(0, 1), "type", "same message"));
        result.errors.push(ValidationMessage::new(Span::new(0, 1), "type", "same message"));
        let diagnostics = report_validation(text, &result, "My Schema");
        assert_eq!(finalize(diagnostics).len(), 1);
    }

    #[test]
    fn diagnostics_are_ordered_by_span() {
        let text = "a: 1\nb: 2\n";
        let mut result = ValidationResult::default();
        result.errors.push(ValidationMessage::new(Span::new(5, 6), "type", "second"));
        result.errors.push(ValidationMessage::new(Span::new(0, 1), "type", "first"));
        let diagnostics = finalize(report_validation(text, &result, "schema"));
        assert_eq!(diagnostics[0].message, "first");
        assert_eq!(diagnostics[1].message, "second");
    }

    #[test]
    fn source_field_is_prefixed() {
        assert_eq!(source_field("My Schema"), "yaml-schema: My Schema");
    }
}

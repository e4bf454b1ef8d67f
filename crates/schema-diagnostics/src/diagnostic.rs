use crate::position::Range;
use crate::severity::Severity;

/// One editor-facing finding (`spec.md` §6): a span-derived range, a
/// severity the reporter assigned, the rendered message, and a `source`
/// label of the form `yaml-schema: <source label>` (`spec.md` §4.7).
///
/// `byte_span` keeps the original byte offsets alongside `range` — the
/// line/character form an editor wants, and the byte form `miette`'s
/// `SourceSpan` wants when rendering a [`crate::error::RenderedDiagnostic`].
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub range: Range,
    pub byte_span: yaml_document::Span,
    pub severity: Severity,
    pub message: String,
    pub source: String,
}

impl Diagnostic {
    pub fn new(
        range: Range,
        byte_span: yaml_document::Span,
        severity: Severity,
        message: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self { range, byte_span, severity, message: message.into(), source: source.into() }
    }
}

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// A [`Diagnostic`] rendered against its source text, for terminal/report
/// output via `miette` (following `lintel-diagnostics`'s
/// `NamedSource`/`SourceSpan` pattern) rather than the editor's LSP-shaped
/// `range`. Byte offsets, not the line/character `Range` the editor sees.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("{message}")]
pub struct RenderedDiagnostic {
    #[source_code]
    pub src: NamedSource<String>,
    #[label("{label}")]
    pub span: SourceSpan,
    pub message: String,
    label: &'static str,
    #[diagnostic(severity)]
    severity: miette::Severity,
}

impl RenderedDiagnostic {
    pub fn new(document_uri: &str, source_text: &str, diagnostic: &Diagnostic) -> Self {
        let start = diagnostic.byte_span.start;
        let len = diagnostic.byte_span.len();
        Self {
            src: NamedSource::new(document_uri.to_string(), source_text.to_string()),
            span: SourceSpan::new(start.into(), len),
            message: diagnostic.message.clone(),
            label: "here",
            severity: match diagnostic.severity {
                Severity::Error => miette::Severity::Error,
                Severity::Warning => miette::Severity::Warning,
                Severity::Info | Severity::Hint => miette::Severity::Advice,
            },
        }
    }
}

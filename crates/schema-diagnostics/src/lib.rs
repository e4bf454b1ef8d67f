//! Converts the validator's, resolver's, and fetcher's outputs into
//! editor-facing [`Diagnostic`]s (`spec.md` §2 C7, §4.7): assigns severity
//! (a reporter concern per §4.6), computes line/character ranges from byte
//! spans, labels the `source` field, and drops colocated duplicates.

mod diagnostic;
pub mod error;
mod position;
mod reporter;
mod severity;

pub use diagnostic::Diagnostic;
pub use error::RenderedDiagnostic;
pub use position::{offset_to_line_col, Position, Range};
pub use reporter::{finalize, report_fetch_failure, report_parse_errors, report_validation, source_field};
pub use severity::Severity;

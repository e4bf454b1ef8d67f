/// Reasons a schema fetch can fail (`spec.md` §7 error taxonomy: "Schema
/// fetch failure"). Recoverable everywhere it's surfaced: the caller still
/// gets an [`crate::UnresolvedSchema`] with this error attached instead of a
/// hard abort, so unrelated parts of a large schema graph still validate.
#[derive(Debug, thiserror::Error, Clone)]
pub enum FetchError {
    #[error("unsupported URI scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("failed to read '{0}': {1}")]
    Io(String, String),
    #[error("'{0}' is not valid UTF-8")]
    InvalidUtf8(String),
    #[error("fetch was cancelled")]
    Cancelled,
}

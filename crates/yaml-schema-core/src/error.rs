/// Failures that abort `validate_document` outright — everything else in
/// `spec.md` §7's taxonomy (syntax errors, unresolved `$ref`s, fetch
/// failures, unknown meta-schemas) is recovered and surfaced as a
/// diagnostic instead of an `Err` here.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("failed to build the schema registry: {0}")]
    Registry(#[from] schema_referencing::Error),
}

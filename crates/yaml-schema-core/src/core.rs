use std::sync::{Arc, RwLock};

use schema_diagnostics::Diagnostic;
use schema_fetcher::SchemaFetcher;
use schema_registry::Contribution;
use yaml_document::Document;

use crate::cancellation::VersionGate;
use crate::config::Config;
use crate::error::CoreError;

/// Wires the fetcher, resolver, registry, validator and diagnostics
/// reporter behind one entry point (`spec.md` §2; crate-layout table in
/// `SPEC_FULL.md` §1): `validate_document`. One `Core` is shared across all
/// open documents in a session — the caches it owns are process-wide and
/// read-mostly, per `spec.md` §5's resource model.
pub struct Core {
    fetcher: SchemaFetcher,
    config: RwLock<Config>,
    versions: VersionGate,
}

impl Core {
    pub fn new(fetcher: SchemaFetcher, config: Config) -> Self {
        Self { fetcher, config: RwLock::new(config), versions: VersionGate::new() }
    }

    pub fn with_default_transport(config: Config) -> Self {
        Self::new(SchemaFetcher::with_default_transport(), config)
    }

    pub fn set_config(&self, config: Config) {
        *self.config.write().unwrap_or_else(std::sync::PoisonError::into_inner) = config;
    }

    fn config(&self) -> Config {
        self.config.read().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    /// Validate one edit of `document_uri` and return its diagnostics, or
    /// `None` if a newer edit arrived before this one finished (`spec.md`
    /// §5: late results for a stale version are discarded, never merged).
    #[tracing::instrument(skip(self, text), fields(document_uri, version))]
    pub async fn validate_document(&self, document_uri: &str, version: u64, text: &str) -> Option<Vec<Diagnostic>> {
        if !self.versions.begin(document_uri, version) {
            tracing::debug!("edit superseded before work started");
            return None;
        }

        let config = self.config();
        let parsed = yaml_document::parse(text, &config.parse_options());
        let mut diagnostics = Vec::new();

        let Some(document) = parsed.documents.first() else {
            return Some(schema_diagnostics::finalize(diagnostics));
        };

        diagnostics.extend(schema_diagnostics::report_parse_errors(text, &document.errors));

        if config.validate {
            if !self.versions.is_current(document_uri, version) {
                return None;
            }
            if let Some(mut schema_diagnostics) =
                self.validate_against_schema(document_uri, version, document, text, &config).await
            {
                diagnostics.append(&mut schema_diagnostics);
            }
        }

        if !self.versions.is_current(document_uri, version) {
            return None;
        }
        Some(schema_diagnostics::finalize(diagnostics))
    }

    async fn validate_against_schema(
        &self,
        document_uri: &str,
        version: u64,
        document: &Document,
        text: &str,
        config: &Config,
    ) -> Option<Vec<Diagnostic>> {
        let modeline = schema_registry::modeline::detect(document);
        let registry = config.schema_registry();
        let contributions = registry.select(document_uri, modeline.as_deref());
        let schema_value = schema_registry::synthetic_schema(&contributions)?;

        for contribution in &contributions {
            if !self.versions.is_current(document_uri, version) {
                return None;
            }
            self.fetcher.fetch_with_fallback(&contribution.uri, contribution.fallback.as_ref()).await;
        }

        if !self.versions.is_current(document_uri, version) {
            return None;
        }

        let Some(root) = document.root else {
            return Some(Vec::new());
        };

        match self.resolve_and_validate(document_uri, document, root, text, &schema_value, &contributions, config) {
            Ok(diagnostics) => Some(diagnostics),
            Err(error) => {
                tracing::warn!(%error, "failed to build the schema registry for this document");
                Some(Vec::new())
            }
        }
    }

    /// Resolve the synthetic root schema and validate the document against
    /// it. A failed external `$ref` never aborts this (`schema-fetcher`'s
    /// `RecordingRetriever` resolves it permissively and records why), so
    /// the only error this returns is a malformed root schema URI or an
    /// unresolvable local `$ref` within it.
    fn resolve_and_validate(
        &self,
        document_uri: &str,
        document: &Document,
        root: yaml_document::NodeId,
        text: &str,
        schema_value: &serde_json::Value,
        contributions: &[Contribution],
        config: &Config,
    ) -> Result<Vec<Diagnostic>, CoreError> {
        let root_uri = format!("synthetic:///{document_uri}");
        let resource = schema_referencing::Resource::from_contents(schema_value.clone())?;
        let retriever = Arc::new(self.fetcher.recording_retriever());
        let registry = schema_referencing::Registry::options()
            .retriever(Box::new(Arc::clone(&retriever)))
            .try_new(root_uri.clone(), resource)?;

        let base_uri = schema_referencing::uri::from_str(&root_uri)?;
        let resolver = registry.resolver(base_uri);
        let cursor = schema_validator::SchemaCursor::root(schema_value, resolver.clone(), schema_referencing::Draft::default());

        let result = schema_validator::validate(&cursor, document, root, &config.validation_options());

        let labels: Vec<String> = contributions
            .iter()
            .map(|contribution| {
                let title = resolver
                    .lookup(&contribution.uri)
                    .ok()
                    .and_then(|resolved| resolved.contents().as_object()?.get("title")?.as_str().map(str::to_string));
                schema_registry::source_label(&contribution.uri, title.as_deref())
            })
            .collect();
        let combined_label = schema_registry::combined_label(&labels);

        let mut diagnostics = schema_diagnostics::report_validation(text, &result, &combined_label);

        let root_span = document.get(root).span;
        for (uri, reason) in retriever.take_failures() {
            diagnostics.push(schema_diagnostics::report_fetch_failure(text, root_span, &uri, &reason, &combined_label));
        }

        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_fetcher::StaticSchemaFetch;

    fn core_with(transport: StaticSchemaFetch, config: Config) -> Core {
        Core::new(SchemaFetcher::new(Arc::new(transport)), config)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn type_mismatch_on_scalar_produces_one_diagnostic() {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {"cwd": {"type": "string"}}
        });
        let transport = StaticSchemaFetch::new().with("https://example.com/s.json", serde_json::to_vec(&schema).unwrap());
        let mut config = Config::default();
        config.schemas = vec![schema_registry::SchemaAssociation {
            uri: "https://example.com/s.json".to_string(),
            file_match: vec!["*.yaml".to_string()],
            fallback: None,
        }];
        let core = core_with(transport, config);

        let diagnostics = core.validate_document("pod.yaml", 1, "cwd: 100000\n").await.unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("Incorrect type"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn no_matching_schema_yields_only_parse_diagnostics() {
        let transport = StaticSchemaFetch::new();
        let core = core_with(transport, Config::default());
        let diagnostics = core.validate_document("pod.yaml", 1, "a: 1\n").await.unwrap();
        assert!(diagnostics.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stale_version_is_discarded() {
        let transport = StaticSchemaFetch::new();
        let core = core_with(transport, Config::default());
        assert!(core.validate_document("pod.yaml", 5, "a: 1\n").await.is_some());
        assert!(core.validate_document("pod.yaml", 2, "a: 1\n").await.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_schema_fetch_is_reported_but_does_not_abort() {
        let transport = StaticSchemaFetch::new();
        let mut config = Config::default();
        config.schemas = vec![schema_registry::SchemaAssociation {
            uri: "https://example.com/missing.json".to_string(),
            file_match: vec!["*.yaml".to_string()],
            fallback: None,
        }];
        let core = core_with(transport, config);

        let diagnostics = core.validate_document("pod.yaml", 1, "a: 1\n").await.unwrap();
        assert!(diagnostics.iter().any(|d| d.message.contains("Unable to load schema")));
    }

    fn core_for(schema: serde_json::Value) -> Core {
        let transport = StaticSchemaFetch::new().with("https://example.com/s.json", serde_json::to_vec(&schema).unwrap());
        let mut config = Config::default();
        config.schemas = vec![schema_registry::SchemaAssociation {
            uri: "https://example.com/s.json".to_string(),
            file_match: vec!["*.yaml".to_string()],
            fallback: None,
        }];
        core_with(transport, config)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn one_of_enum_mismatches_are_merged_into_a_single_diagnostic() {
        let schema = serde_json::json!({
            "oneOf": [
                {"properties": {"key": {"enum": ["a", "b"]}}},
                {"properties": {"key": {"enum": ["c", "d"]}}}
            ]
        });
        let core = core_for(schema);

        let diagnostics = core.validate_document("pod.yaml", 1, "key: 3\n").await.unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Value is not accepted. Valid values: \"a\", \"b\", \"c\", \"d\".");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn sibling_keywords_next_to_ref_both_apply_under_2019_09() {
        let schema = serde_json::json!({
            "$schema": "https://json-schema.org/draft/2019-09/schema",
            "$ref": "#/$defs/A",
            "type": "number",
            "$defs": {"A": {"type": "string"}}
        });
        let core = core_for(schema.clone());

        let diagnostics = core.validate_document("pod.yaml", 1, "value: hello\n").await.unwrap();
        assert!(diagnostics.iter().any(|d| d.message.contains("number")));

        let core = core_for(schema);
        let diagnostics = core.validate_document("pod.yaml", 2, "value: 1\n").await.unwrap();
        assert!(diagnostics.iter().any(|d| d.message.contains("string")));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unevaluated_properties_flags_what_allof_branches_did_not_cover() {
        let schema = serde_json::json!({
            "allOf": [
                {"properties": {"a": {"type": "string"}}},
                {"properties": {"b": {"type": "number"}}}
            ],
            "unevaluatedProperties": false
        });
        let core = core_for(schema);

        let diagnostics = core.validate_document("pod.yaml", 1, "a: ok\nb: 1\nc: 2\n").await.unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("c") && diagnostics[0].message.contains("not allowed"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn min_contains_reports_how_many_more_matches_are_needed() {
        let schema = serde_json::json!({
            "type": "array",
            "contains": {
                "type": "object",
                "properties": {"kind": {"const": "ok"}, "id": {"type": "number"}},
                "required": ["kind", "id"]
            },
            "minContains": 2
        });
        let core = core_for(serde_json::json!({"type": "object", "properties": {"items": schema}}));

        let yaml = "items:\n  - kind: ok\n    id: 1\n  - kind: bad\n    id: x\n  - kind: also-bad\n";
        let diagnostics = core.validate_document("pod.yaml", 1, yaml).await.unwrap();
        assert!(diagnostics.iter().any(|d| d.message.contains("too few items matching contains schema")));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unknown_meta_schema_validates_without_crashing() {
        let schema = serde_json::json!({
            "$schema": "https://example.com/my-custom-meta-schema/v1",
            "type": "object",
            "properties": {"name": {"type": "string"}, "count": {"type": "integer"}}
        });
        let core = core_for(schema);

        let diagnostics = core.validate_document("pod.yaml", 1, "name: test\ncount: 42\n").await.unwrap();
        assert!(diagnostics.is_empty());
    }
}

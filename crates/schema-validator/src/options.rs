use yaml_document::YamlVersion;

/// The subset of `spec.md` §6's configuration that the validator itself
/// consults (the rest — `fileMatch`, custom tags, `isKubernetes` — is
/// `schema-registry`'s concern).
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    pub yaml_version: YamlVersion,
    /// Whether flow-style mappings are permitted in this document's dialect.
    pub flow_mapping: bool,
    /// Whether flow-style sequences are permitted in this document's dialect.
    pub flow_sequence: bool,
    /// Cap on `$ref`/`$dynamicRef` recursion depth for one top-level
    /// validation call, guarding against schema graphs that cycle without
    /// narrowing the instance (`spec.md` §7).
    pub max_ref_depth: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            yaml_version: YamlVersion::V1_2,
            flow_mapping: true,
            flow_sequence: true,
            max_ref_depth: 500,
        }
    }
}

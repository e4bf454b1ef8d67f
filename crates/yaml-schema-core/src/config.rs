//! The editor-facing configuration object (`spec.md` §6), deserialized
//! straight off whatever the host sends and translated into the options
//! each collaborator crate actually wants.

use serde::Deserialize;

use schema_registry::{SchemaAssociation, SchemaRegistry};
use schema_validator::ValidationOptions;
use yaml_document::{CustomTagTable, ParseOptions, YamlVersion};

/// `yamlVersion: "1.1" | "1.2"` (`spec.md` §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum YamlVersionSetting {
    #[serde(rename = "1.1")]
    V1_1,
    #[serde(rename = "1.2")]
    V1_2,
}

impl Default for YamlVersionSetting {
    fn default() -> Self {
        Self::V1_2
    }
}

impl From<YamlVersionSetting> for YamlVersion {
    fn from(setting: YamlVersionSetting) -> Self {
        match setting {
            YamlVersionSetting::V1_1 => YamlVersion::V1_1,
            YamlVersionSetting::V1_2 => YamlVersion::V1_2,
        }
    }
}

/// `flowMapping`, `flowSequence: "allow" | "forbid"` (`spec.md` §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStylePolicy {
    Allow,
    Forbid,
}

impl Default for FlowStylePolicy {
    fn default() -> Self {
        Self::Allow
    }
}

impl FlowStylePolicy {
    fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

fn default_true() -> bool {
    true
}

/// The whole of `spec.md` §6's enumerated configuration, deserializable
/// directly off the host's settings payload. `hover`/`completion`/`format`
/// are round-tripped but otherwise inert here: their collaborators live
/// outside this crate's scope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub validate: bool,
    pub hover: bool,
    pub completion: bool,
    pub format: bool,
    pub schemas: Vec<SchemaAssociation>,
    pub custom_tags: Vec<String>,
    pub is_kubernetes: bool,
    pub yaml_version: YamlVersionSetting,
    pub flow_mapping: FlowStylePolicy,
    pub flow_sequence: FlowStylePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate: default_true(),
            hover: false,
            completion: false,
            format: false,
            schemas: Vec::new(),
            custom_tags: Vec::new(),
            is_kubernetes: false,
            yaml_version: YamlVersionSetting::default(),
            flow_mapping: FlowStylePolicy::default(),
            flow_sequence: FlowStylePolicy::default(),
        }
    }
}

impl Config {
    /// Build the glob-to-schema registry this configuration describes,
    /// folding in the built-in Kubernetes preset when requested.
    pub fn schema_registry(&self) -> SchemaRegistry {
        let registry = SchemaRegistry::new(self.schemas.clone());
        if self.is_kubernetes {
            registry.with_kubernetes_preset()
        } else {
            registry
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            custom_tags: CustomTagTable::from_entries(self.custom_tags.iter()),
            yaml_version: self.yaml_version.into(),
        }
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            yaml_version: self.yaml_version.into(),
            flow_mapping: self.flow_mapping.is_allowed(),
            flow_sequence: self.flow_sequence.is_allowed(),
            ..ValidationOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_enables_validation_only() {
        let config = Config::default();
        assert!(config.validate);
        assert!(!config.hover);
        assert!(!config.is_kubernetes);
    }

    #[test]
    fn deserializes_from_camel_case_json() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "validate": true,
            "isKubernetes": true,
            "customTags": ["!Ref sequence"],
            "yamlVersion": "1.1",
            "flowMapping": "forbid",
        }))
        .unwrap();
        assert!(config.is_kubernetes);
        assert_eq!(config.custom_tags, vec!["!Ref sequence".to_string()]);
        assert_eq!(config.yaml_version, YamlVersionSetting::V1_1);
        assert!(!config.flow_mapping.is_allowed());
        assert!(config.flow_sequence.is_allowed());
    }

    #[test]
    fn kubernetes_preset_adds_an_association() {
        let mut config = Config::default();
        config.is_kubernetes = true;
        let registry = config.schema_registry();
        let contributions = registry.select("deployment.yaml", None);
        assert_eq!(contributions.len(), 1);
    }
}

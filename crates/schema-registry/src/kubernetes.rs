use crate::registry::SchemaAssociation;

/// The built-in association activated by `isKubernetes: true` (`spec.md`
/// §6; supplemented in `SPEC_FULL` §3 since the flag is otherwise a dead
/// no-op): every YAML file gets the community Kubernetes resource schema —
/// the same catalog the upstream yaml-language-server wires in under this
/// flag.
pub fn preset() -> SchemaAssociation {
    SchemaAssociation {
        uri: "https://raw.githubusercontent.com/yannh/kubernetes-json-schema/master/master-standalone-strict/all.json"
            .to_string(),
        file_match: vec!["*.yaml".to_string(), "*.yml".to_string()],
        fallback: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_matches_both_yaml_extensions() {
        let assoc = preset();
        assert!(assoc.file_match.iter().any(|p| glob_match::glob_match(p, "deployment.yaml")));
        assert!(assoc.file_match.iter().any(|p| glob_match::glob_match(p, "deployment.yml")));
    }
}

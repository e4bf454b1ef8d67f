use std::collections::BTreeMap;

use crate::node::{Document, NodeId, NodeKind};

/// A minimal, ordering-preserving JSON value used as the bridge between a
/// parsed YAML document and the JSON-Schema resolution machinery, which
/// operates on `serde_json::Value`. Aliases are expanded (guarded by the
/// document's alias-traversal cap); duplicate mapping keys keep their first
/// occurrence, per `spec.md` §4.1.
pub fn to_json(doc: &Document, id: NodeId) -> serde_json::Value {
    let Some(id) = doc.deref(id) else {
        return serde_json::Value::Null;
    };
    match &doc.get(id).kind {
        NodeKind::Null => serde_json::Value::Null,
        NodeKind::Boolean(b) => serde_json::Value::Bool(*b),
        NodeKind::Integer(i) => serde_json::Value::Number((*i).into()),
        NodeKind::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        NodeKind::String(s) => serde_json::Value::String(s.clone()),
        NodeKind::Sequence(items) => {
            serde_json::Value::Array(items.iter().map(|item| to_json(doc, *item)).collect())
        }
        NodeKind::Mapping(entries) => {
            let mut seen = BTreeMap::new();
            let mut map = serde_json::Map::new();
            for entry in entries {
                let key = match &doc.get(entry.key).kind {
                    NodeKind::String(s) => s.clone(),
                    other => scalar_as_key(other),
                };
                if key == "<<" {
                    continue;
                }
                if seen.insert(key.clone(), ()).is_some() {
                    continue; // first occurrence wins
                }
                map.insert(key, to_json(doc, entry.value));
            }
            serde_json::Value::Object(map)
        }
        NodeKind::Alias { .. } => serde_json::Value::Null,
    }
}

fn scalar_as_key(kind: &NodeKind) -> String {
    match kind {
        NodeKind::Boolean(b) => b.to_string(),
        NodeKind::Integer(i) => i.to_string(),
        NodeKind::Float(f) => f.to_string(),
        NodeKind::Null => "null".to_string(),
        _ => String::new(),
    }
}

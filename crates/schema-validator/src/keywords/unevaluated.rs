use yaml_document::{MappingEntry, NodeId};

use crate::context::EvaluatedSet;
use crate::schema_nav::SchemaCursor;

/// Mapping entries not yet covered by `properties`/`patternProperties`/
/// `additionalProperties`/`$ref`/`allOf`/... (`evaluated`), paired with
/// `unevaluatedProperties`'s subschema if present.
pub fn unevaluated_properties<'r, 'a>(
    cursor: &SchemaCursor<'r>,
    entries: &'a [MappingEntry],
    doc: &yaml_document::Document,
    evaluated: &EvaluatedSet,
) -> Option<(SchemaCursor<'r>, Vec<&'a MappingEntry>)> {
    let schema = cursor.get("unevaluatedProperties")?;
    let remaining: Vec<&MappingEntry> = entries
        .iter()
        .filter(|entry| match &doc.get(entry.key).kind {
            yaml_document::NodeKind::String(s) => !evaluated.properties.contains(s),
            _ => true,
        })
        .collect();
    Some((cursor.with_contents(schema), remaining))
}

/// Array indices not yet covered by `items`/`prefixItems`/`contains`,
/// paired with `unevaluatedItems`'s subschema if present.
pub fn unevaluated_items<'r>(
    cursor: &SchemaCursor<'r>,
    items: &[NodeId],
    evaluated: &EvaluatedSet,
) -> Option<(SchemaCursor<'r>, Vec<NodeId>)> {
    let schema = cursor.get("unevaluatedItems")?;
    if evaluated.all_items {
        return Some((cursor.with_contents(schema), Vec::new()));
    }
    let remaining = items
        .iter()
        .copied()
        .skip(evaluated.prefix_count)
        .collect();
    Some((cursor.with_contents(schema), remaining))
}

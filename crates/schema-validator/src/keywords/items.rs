use serde_json::Value;
use yaml_document::NodeId;

use crate::schema_nav::SchemaCursor;

/// One array element's applicable subschema, resolved from `items`
/// (single-schema form), `prefixItems` (draft-2020-12 tuple form), or the
/// legacy draft-07-and-earlier `items` array-of-schemas tuple form.
pub enum ItemSchema<'r> {
    Cursor(SchemaCursor<'r>),
    /// Explicit `items`/`additionalItems: false` — no further elements allowed.
    Forbidden,
    /// No keyword constrains this position.
    Unconstrained,
}

/// Walks `items`/`prefixItems`/`additionalItems` and returns, for each
/// index in `elements`, the subschema that governs it plus whether every
/// position ended up covered by a positional schema (as opposed to only a
/// prefix), which `unevaluatedItems` needs to know (`spec.md` §4.6).
pub fn applicable_schemas<'r>(
    cursor: &SchemaCursor<'r>,
    elements: &[NodeId],
) -> (Vec<ItemSchema<'r>>, usize) {
    let mut schemas = Vec::with_capacity(elements.len());

    if let Some(Value::Array(tuple)) = cursor.get("prefixItems") {
        for index in 0..elements.len() {
            if let Some(sub) = tuple.get(index) {
                schemas.push(ItemSchema::Cursor(cursor.with_contents(sub)));
            } else {
                schemas.push(additional_items_schema(cursor, "items"));
            }
        }
        return (schemas, tuple.len());
    }

    match cursor.get("items") {
        Some(Value::Array(tuple)) => {
            for index in 0..elements.len() {
                if let Some(sub) = tuple.get(index) {
                    schemas.push(ItemSchema::Cursor(cursor.with_contents(sub)));
                } else {
                    schemas.push(additional_items_schema(cursor, "additionalItems"));
                }
            }
            (schemas, tuple.len())
        }
        Some(single) => {
            for _ in elements {
                schemas.push(ItemSchema::Cursor(cursor.with_contents(single)));
            }
            (schemas, elements.len())
        }
        None => {
            for _ in elements {
                schemas.push(ItemSchema::Unconstrained);
            }
            (schemas, 0)
        }
    }
}

fn additional_items_schema<'r>(cursor: &SchemaCursor<'r>, keyword: &str) -> ItemSchema<'r> {
    match cursor.get(keyword) {
        Some(Value::Bool(false)) => ItemSchema::Forbidden,
        Some(sub) => ItemSchema::Cursor(cursor.with_contents(sub)),
        None => ItemSchema::Unconstrained,
    }
}

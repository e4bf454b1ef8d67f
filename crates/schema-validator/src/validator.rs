//! The traversal entry point: walks a [`SchemaCursor`] against a Structural
//! Tree node in lockstep, rather than compiling the schema into a validator
//! tree ahead of time (`schema_nav`'s doc comment explains why). One call
//! to [`validate`] is one `(document, schema)` validation run.

use serde_json::Value;
use yaml_document::{Document, NodeId, NodeKind, Span};

use crate::context::{EvalState, EvaluatedSet};
use crate::keywords;
use crate::keywords::items::ItemSchema;
use crate::options::ValidationOptions;
use crate::result::ValidationResult;
use crate::schema_nav::SchemaCursor;

/// Validate `node` in `doc` against `cursor`, using `options` to seed the
/// per-run recursion guard.
#[tracing::instrument(skip_all)]
pub fn validate(cursor: &SchemaCursor, doc: &Document, node: NodeId, options: &ValidationOptions) -> ValidationResult {
    let mut state = EvalState::new(options);
    validate_node(cursor, &mut state, doc, node).0
}

fn validate_node(
    cursor: &SchemaCursor,
    state: &mut EvalState,
    doc: &Document,
    node_id: NodeId,
) -> (ValidationResult, EvaluatedSet) {
    let mut result = ValidationResult::default();
    let mut evaluated = EvaluatedSet::default();

    if cursor.is_true() {
        return (result, evaluated);
    }

    let Some(node_id) = doc.deref(node_id) else {
        return (result, evaluated);
    };
    let node = doc.get(node_id);
    let span = node.span;

    if cursor.is_false() {
        result.push(span, "false", "False schema does not allow this value.");
        return (result, evaluated);
    }

    let mut referenced = false;
    for (keyword, target) in [
        ("$ref", cursor.get("$ref").and_then(Value::as_str)),
        ("$dynamicRef", cursor.get("$dynamicRef").and_then(Value::as_str)),
    ] {
        let Some(reference) = target else { continue };
        referenced = true;
        if !state.enter_ref() {
            continue;
        }
        match cursor.follow(reference) {
            Ok(target_cursor) => {
                let (sub_result, sub_eval) = validate_node(&target_cursor, state, doc, node_id);
                result.merge(sub_result);
                evaluated.merge(&sub_eval);
            }
            Err(err) => result.push(span, keyword, format!("Problems loading reference '{reference}': {err}")),
        }
        state.exit_ref();
    }
    if cursor.get("$recursiveRef").is_some() {
        referenced = true;
        if state.enter_ref() {
            match cursor.follow_recursive_ref() {
                Ok(target_cursor) => {
                    let (sub_result, sub_eval) = validate_node(&target_cursor, state, doc, node_id);
                    result.merge(sub_result);
                    evaluated.merge(&sub_eval);
                }
                Err(err) => result.push(span, "$recursiveRef", format!("Problems loading reference: {err}")),
            }
            state.exit_ref();
        }
    }

    if referenced && !cursor.honors_ref_siblings() {
        return (result, evaluated);
    }

    let kind = node.kind.clone();

    keywords::type_::check(cursor, &kind, span, &mut result);
    keywords::enum_const::check(cursor, doc, node_id, span, &mut result);
    keywords::deprecation::check(cursor, parent_span(doc, node_id, span), &mut result);

    match &kind {
        NodeKind::String(s) => keywords::string::check(cursor, s, span, &mut result),
        NodeKind::Integer(i) => keywords::numeric::check(cursor, *i as f64, span, &mut result),
        NodeKind::Float(f) => keywords::numeric::check(cursor, *f, span, &mut result),
        NodeKind::Sequence(items) => {
            validate_array(cursor, state, doc, items, span, &mut result, &mut evaluated);
        }
        NodeKind::Mapping(entries) => {
            validate_object(cursor, state, doc, node_id, entries, span, &mut result, &mut evaluated);
        }
        NodeKind::Null | NodeKind::Boolean(_) | NodeKind::Alias { .. } => {}
    }

    validate_combinators(cursor, state, doc, node_id, span, &mut result, &mut evaluated);

    if let NodeKind::Mapping(entries) = &kind {
        if let Some((sub, remaining)) = keywords::unevaluated::unevaluated_properties(cursor, entries, doc, &evaluated) {
            for entry in remaining {
                let (sub_result, _) = validate_node(&sub, state, doc, entry.value);
                if sub_result.has_errors() {
                    if let NodeKind::String(key) = &doc.get(entry.key).kind {
                        result.push(doc.get(entry.key).span, "unevaluatedProperties", format!("Property {key} is not allowed."));
                    }
                }
            }
        }
    }
    if let NodeKind::Sequence(items) = &kind {
        if let Some((sub, remaining)) = keywords::unevaluated::unevaluated_items(cursor, items, &evaluated) {
            for id in remaining {
                let (sub_result, _) = validate_node(&sub, state, doc, id);
                if sub_result.has_errors() {
                    result.push(doc.get(id).span, "unevaluatedItems", "Item is not allowed by unevaluatedItems.");
                }
            }
        }
    }

    (result, evaluated)
}

fn parent_span(doc: &Document, node_id: NodeId, own: Span) -> Span {
    doc.get(node_id).parent.map(|p| doc.get(p).span).unwrap_or(own)
}

fn validate_array(
    cursor: &SchemaCursor,
    state: &mut EvalState,
    doc: &Document,
    items: &[NodeId],
    span: Span,
    result: &mut ValidationResult,
    evaluated: &mut EvaluatedSet,
) {
    keywords::array::check(cursor, items, doc, span, result);

    let (item_schemas, prefix_count) = keywords::items::applicable_schemas(cursor, items);
    for (item_id, schema) in items.iter().zip(item_schemas) {
        match schema {
            ItemSchema::Forbidden => {
                result.push(span, "additionalItems", "Array has more items than allowed by the schema.");
            }
            ItemSchema::Cursor(sub) => {
                let (sub_result, _) = validate_node(&sub, state, doc, *item_id);
                result.merge(sub_result);
            }
            ItemSchema::Unconstrained => {}
        }
    }
    let single_schema_covers_all = cursor.get("prefixItems").is_none() && matches!(cursor.get("items"), Some(v) if !v.is_array());
    if single_schema_covers_all {
        evaluated.all_items = true;
    } else {
        evaluated.prefix_count = evaluated.prefix_count.max(prefix_count);
    }

    if let Some(contains_schema) = keywords::contains::subschema(cursor) {
        let matches = items
            .iter()
            .filter(|id| !validate_node(&contains_schema, state, doc, **id).0.has_errors())
            .count();
        keywords::contains::check_count(cursor, matches, span, result);
    }
}

fn validate_object(
    cursor: &SchemaCursor,
    state: &mut EvalState,
    doc: &Document,
    node_id: NodeId,
    entries: &[yaml_document::MappingEntry],
    span: Span,
    result: &mut ValidationResult,
    evaluated: &mut EvaluatedSet,
) {
    keywords::object::check(cursor, entries, doc, span, result);

    let present_keys: Vec<&str> = entries
        .iter()
        .filter_map(|entry| match &doc.get(entry.key).kind {
            NodeKind::String(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();

    keywords::dependencies::check(cursor, &present_keys, span, result);
    for sub in keywords::dependencies::schema_dependencies(cursor, &present_keys) {
        let (sub_result, sub_eval) = validate_node(&sub, state, doc, node_id);
        result.merge(sub_result);
        evaluated.merge(&sub_eval);
    }

    for entry in entries {
        let NodeKind::String(key) = &doc.get(entry.key).kind else { continue };
        let (schemas, matched) = keywords::properties::applicable_schemas(cursor, key);
        if keywords::properties::forbidden_by_additional_properties(cursor, key, matched) {
            result.push(
                doc.get(entry.key).span,
                "additionalProperties",
                format!("Property {key} is not allowed."),
            );
            continue;
        }
        let mut property_matched = matched;
        let mut property_value_matched = true;
        for sub in schemas {
            let (sub_result, _) = validate_node(&sub, state, doc, entry.value);
            property_value_matched &= !sub_result.has_errors();
            result.merge(sub_result);
            property_matched = true;
        }
        if property_matched {
            evaluated.properties.insert(key.clone());
            result.properties_matches += 1;
            if property_value_matched {
                result.properties_value_matches += 1;
            }
        }
    }
}

fn validate_combinators(
    cursor: &SchemaCursor,
    state: &mut EvalState,
    doc: &Document,
    node_id: NodeId,
    span: Span,
    result: &mut ValidationResult,
    evaluated: &mut EvaluatedSet,
) {
    if let Some(Value::Array(subschemas)) = cursor.get("allOf") {
        for sub in subschemas {
            let (sub_result, sub_eval) = validate_node(&cursor.with_contents(sub), state, doc, node_id);
            result.merge(sub_result);
            evaluated.merge(&sub_eval);
        }
    }

    if let Some(Value::Array(subschemas)) = cursor.get("anyOf") {
        let alternatives: Vec<(ValidationResult, EvaluatedSet)> = subschemas
            .iter()
            .map(|sub| validate_node(&cursor.with_contents(sub), state, doc, node_id))
            .collect();
        if alternatives.iter().all(|(r, _)| r.has_errors()) {
            let results: Vec<ValidationResult> = alternatives.iter().map(|(r, _)| r.clone()).collect();
            result.merge(ValidationResult::merge_failing_alternatives(results));
        } else if let Some((_, eval)) = alternatives.into_iter().find(|(r, _)| !r.has_errors()) {
            evaluated.merge(&eval);
        }
    }

    if let Some(Value::Array(subschemas)) = cursor.get("oneOf") {
        let alternatives: Vec<(ValidationResult, EvaluatedSet)> = subschemas
            .iter()
            .map(|sub| validate_node(&cursor.with_contents(sub), state, doc, node_id))
            .collect();
        let passing: Vec<usize> = alternatives
            .iter()
            .enumerate()
            .filter(|(_, (r, _))| !r.has_errors())
            .map(|(i, _)| i)
            .collect();
        match passing.len() {
            1 => evaluated.merge(&alternatives[passing[0]].1),
            0 => {
                let results: Vec<ValidationResult> = alternatives.into_iter().map(|(r, _)| r).collect();
                result.merge(ValidationResult::merge_failing_alternatives(results));
            }
            _ => result.push(span, "oneOf", "Value matches more than one of the alternatives in 'oneOf'."),
        }
    }

    if let Some(sub) = cursor.get("not") {
        let (sub_result, _) = validate_node(&cursor.with_contents(sub), state, doc, node_id);
        if !sub_result.has_errors() {
            result.push(span, "not", "Value must not match the schema given in 'not'.");
        }
    }

    if let Some(if_schema) = cursor.get("if") {
        let (if_result, if_eval) = validate_node(&cursor.with_contents(if_schema), state, doc, node_id);
        let branch = if !if_result.has_errors() {
            evaluated.merge(&if_eval);
            cursor.get("then")
        } else {
            cursor.get("else")
        };
        if let Some(branch_schema) = branch {
            let (branch_result, branch_eval) = validate_node(&cursor.with_contents(branch_schema), state, doc, node_id);
            result.merge(branch_result);
            evaluated.merge(&branch_eval);
        }
    }
}

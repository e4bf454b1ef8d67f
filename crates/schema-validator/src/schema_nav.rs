use serde_json::Value;

use schema_referencing::{Draft, Resolved, Resolver};

use crate::error::ValidatorError;

/// A schema node plus the resolver scope it was reached through — the
/// teacher's lazy, on-demand resolution model (`schema_referencing::Resolver`)
/// walked alongside the instance instead of pre-compiled into a validator
/// tree (`spec.md` §4.6, §9: no eagerly materialized validator DAG).
pub struct SchemaCursor<'r> {
    pub contents: &'r Value,
    pub resolver: Resolver<'r>,
    pub draft: Draft,
}

impl<'r> SchemaCursor<'r> {
    pub fn root(contents: &'r Value, resolver: Resolver<'r>, default_draft: Draft) -> Self {
        let draft = default_draft.detect(contents);
        Self { contents, resolver, draft }
    }

    /// Build a cursor over a `schema-referencing` resolution result, reusing
    /// the dialect it already detected at resolve time.
    pub fn from_resolved(resolved: Resolved<'r>) -> Self {
        let draft = resolved.draft();
        let (contents, resolver) = resolved.into_inner();
        Self { contents, resolver, draft }
    }

    /// Follow a `$ref`/`$dynamicRef` target string, re-detecting the dialect
    /// at the target resource since a referenced document may declare its
    /// own `$schema` (`spec.md` §4.4).
    pub fn follow(&self, reference: &str) -> Result<SchemaCursor<'r>, ValidatorError> {
        let resolved = self
            .resolver
            .lookup(reference)
            .map_err(|e| ValidatorError::UnresolvedRef(reference.to_string(), e.to_string()))?;
        let (contents, resolver) = resolved.into_inner();
        let draft = self.draft.detect(contents);
        Ok(SchemaCursor { contents, resolver, draft })
    }

    /// Follow `$recursiveRef` (draft-2019-09's precursor to `$dynamicRef`):
    /// resolves "#", then walks the dynamic scope while `$recursiveAnchor:
    /// true` holds, per `schema_referencing::Resolver::lookup_recursive_ref`.
    pub fn follow_recursive_ref(&self) -> Result<SchemaCursor<'r>, ValidatorError> {
        let resolved = self
            .resolver
            .lookup_recursive_ref()
            .map_err(|e| ValidatorError::UnresolvedRef("$recursiveRef".to_string(), e.to_string()))?;
        let (contents, resolver) = resolved.into_inner();
        let draft = self.draft.detect(contents);
        Ok(SchemaCursor { contents, resolver, draft })
    }

    /// Draft-2019-09+ evaluates keywords sitting next to `$ref` in the same
    /// object; draft-07 and earlier treat `$ref` as replacing the whole
    /// schema object, silently ignoring siblings (`spec.md` §4.4, §8
    /// scenario 3).
    pub fn honors_ref_siblings(&self) -> bool {
        self.draft >= Draft::Draft201909
    }

    /// A cursor over an embedded subschema `Value` reached without a
    /// `$ref` (e.g. a `properties`/`items` entry) — same resolver scope,
    /// dialect re-detected in case the subschema carries its own `$schema`.
    pub fn with_contents(&self, contents: &'r Value) -> SchemaCursor<'r> {
        let draft = self.draft.detect(contents);
        SchemaCursor { contents, resolver: self.resolver.clone(), draft }
    }

    pub fn as_object(&self) -> Option<&serde_json::Map<String, Value>> {
        self.contents.as_object()
    }

    pub fn get(&self, key: &str) -> Option<&'r Value> {
        match self.contents {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self.contents, Value::Bool(true))
    }

    pub fn is_false(&self) -> bool {
        matches!(self.contents, Value::Bool(false))
    }
}

use std::collections::HashSet;

use crate::options::ValidationOptions;

/// Which property names and array indices a schema application already
/// accounted for, threaded through `allOf`/`if`-`then`-`else`/`$ref`/
/// `dependentSchemas` so `unevaluatedProperties`/`unevaluatedItems` only see
/// what's left over (`spec.md` §4.6, §8 scenario 4).
#[derive(Debug, Clone, Default)]
pub struct EvaluatedSet {
    pub properties: HashSet<String>,
    /// Highest index covered by `items`/`prefixItems` positional schemas.
    pub prefix_count: usize,
    /// Whether `contains`/`items` (non-positional) already evaluated every
    /// element, making positional tracking moot.
    pub all_items: bool,
}

impl EvaluatedSet {
    pub fn merge(&mut self, other: &EvaluatedSet) {
        self.properties.extend(other.properties.iter().cloned());
        self.prefix_count = self.prefix_count.max(other.prefix_count);
        self.all_items = self.all_items || other.all_items;
    }
}

/// Per-run state: the fixed options plus a mutable recursion guard. One
/// `EvalState` is shared across an entire `validate()` call.
pub struct EvalState<'o> {
    pub options: &'o ValidationOptions,
    depth: usize,
}

impl<'o> EvalState<'o> {
    pub fn new(options: &'o ValidationOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// Enter one more level of `$ref`/`$dynamicRef` following. Returns
    /// `false` once `max_ref_depth` is exceeded so the caller can fail open
    /// (treat the reference as unconstrained) instead of overflowing the
    /// stack on a schema that cycles without narrowing the instance.
    pub fn enter_ref(&mut self) -> bool {
        if self.depth >= self.options.max_ref_depth {
            return false;
        }
        self.depth += 1;
        true
    }

    pub fn exit_ref(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

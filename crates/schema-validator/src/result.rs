use serde_json::Value;
use yaml_document::Span;

/// One validator finding, anchored at the Structural Tree span it concerns
/// (`spec.md` §4.6). `keyword` names the schema keyword responsible, used by
/// `schema-diagnostics` to decide severity and wording.
#[derive(Debug, Clone)]
pub struct ValidationMessage {
    pub span: Span,
    pub message: String,
    pub keyword: &'static str,
}

impl ValidationMessage {
    pub fn new(span: Span, keyword: &'static str, message: impl Into<String>) -> Self {
        Self { span, keyword, message: message.into() }
    }
}

/// The validator's output for one (instance, schema) pair. Beyond the firm
/// `errors`, it carries the scoring counters `spec.md` §4.6 uses to rank
/// `anyOf`/`oneOf` alternatives: `propertiesMatches`, `propertiesValueMatches`,
/// `enumValueMatch`, and the merged `mismatchedEnumValues`.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationMessage>,
    pub properties_matches: usize,
    pub properties_value_matches: usize,
    pub enum_value_match: bool,
    pub mismatched_enum_values: Vec<Value>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn push(&mut self, span: Span, keyword: &'static str, message: impl Into<String>) {
        self.errors.push(ValidationMessage::new(span, keyword, message));
    }

    /// Merge `other` into `self`. Pure and associative when neither side has
    /// errors (`spec.md` §9): merging two all-valid results just sums their
    /// match counters and unions their (empty) mismatch lists, in either order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.properties_matches += other.properties_matches;
        self.properties_value_matches += other.properties_value_matches;
        self.enum_value_match = self.enum_value_match || other.enum_value_match;
        for value in other.mismatched_enum_values {
            if !self.mismatched_enum_values.iter().any(|v| v == &value) {
                self.mismatched_enum_values.push(value);
            }
        }
    }

    /// The tuple-lexicographic ranking from `spec.md` §4.6: fewer errors
    /// first, then `enumValueMatch`, then the two match counters. Smaller
    /// (`Ordering::Less`) is "more informative" / preferred.
    pub fn rank(&self) -> (bool, std::cmp::Reverse<bool>, std::cmp::Reverse<usize>, std::cmp::Reverse<usize>) {
        (
            self.has_errors(),
            std::cmp::Reverse(self.enum_value_match),
            std::cmp::Reverse(self.properties_value_matches),
            std::cmp::Reverse(self.properties_matches),
        )
    }

    /// Pick the best of a non-empty set of alternative results (`anyOf`/`oneOf`
    /// branches), per the ranking above, keeping the full list of
    /// alternatives so callers can merge enum mismatches across all of them.
    pub fn best_alternative(alternatives: Vec<ValidationResult>) -> ValidationResult {
        let mut alternatives = alternatives;
        alternatives.sort_by_key(ValidationResult::rank);
        let mut iter = alternatives.into_iter();
        let mut best = iter.next().unwrap_or_default();
        if best.has_errors() {
            for rest in iter {
                for value in rest.mismatched_enum_values {
                    if !best.mismatched_enum_values.iter().any(|v| v == &value) {
                        best.mismatched_enum_values.push(value);
                    }
                }
            }
        }
        best
    }

    /// Combine all failing `anyOf`/`oneOf` alternatives into the single set
    /// of diagnostics the outer combinator reports (`spec.md` §4.6, §8
    /// scenario 2). When every alternative's only complaint is the same
    /// `enum`/`const` mismatch (a discriminator property with different
    /// allowed values per branch), the branches are collapsed into one
    /// re-rendered "Valid values: ..." diagnostic listing every
    /// alternative's candidates. Otherwise the best-ranked alternative's own
    /// diagnostics are surfaced as-is — more informative than a generic
    /// "matches none of the alternatives" wrapper, and what "matched-schemas
    /// are merged into the outer result" (§4.6) calls for.
    pub fn merge_failing_alternatives(alternatives: Vec<ValidationResult>) -> ValidationResult {
        let sole_enum_mismatch = alternatives
            .iter()
            .all(|r| r.errors.len() == 1 && matches!(r.errors[0].keyword, "enum" | "const"));

        let mut best = ValidationResult::best_alternative(alternatives);
        if sole_enum_mismatch && !best.mismatched_enum_values.is_empty() {
            let rendered: Vec<String> = best.mismatched_enum_values.iter().map(ToString::to_string).collect();
            let error_span = best.errors[0].span;
            best.errors.clear();
            best.push(error_span, "enum", format!("Value is not accepted. Valid values: {}.", rendered.join(", ")));
        }
        best
    }
}

/// The structural kind a custom tag is declared to produce, e.g. the
/// `sequence` in `"!Ref sequence"` (`spec.md` §6, `customTags`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomTagKind {
    Scalar,
    Sequence,
    Mapping,
    /// No kind was given after the tag name; any structural kind parses as opaque.
    Any,
}

impl CustomTagKind {
    fn parse(s: &str) -> Self {
        match s {
            "scalar" => Self::Scalar,
            "sequence" => Self::Sequence,
            "mapping" => Self::Mapping,
            _ => Self::Any,
        }
    }

    pub fn allows(self, kind: &crate::node::NodeKind) -> bool {
        use crate::node::NodeKind;
        match self {
            Self::Any => true,
            Self::Scalar => kind.is_scalar(),
            Self::Sequence => matches!(kind, NodeKind::Sequence(_)),
            Self::Mapping => matches!(kind, NodeKind::Mapping(_)),
        }
    }
}

/// An allow-list of user-defined tags treated as opaque during parsing
/// (`spec.md` §2, C9). Built from the raw `customTags` configuration
/// strings such as `"!Ref sequence"` or `"!include"` (kind defaults to `Any`).
#[derive(Debug, Clone, Default)]
pub struct CustomTagTable {
    entries: std::collections::HashMap<String, CustomTagKind>,
}

impl CustomTagTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry.as_ref());
        }
        table
    }

    pub fn insert(&mut self, declaration: &str) {
        let mut parts = declaration.splitn(2, ' ');
        let Some(tag) = parts.next() else { return };
        if tag.is_empty() {
            return;
        }
        let kind = parts
            .next()
            .map(str::trim)
            .map(CustomTagKind::parse)
            .unwrap_or(CustomTagKind::Any);
        self.entries.insert(tag.to_string(), kind);
    }

    pub fn kind_for(&self, tag: &str) -> Option<CustomTagKind> {
        self.entries.get(tag).copied()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }
}

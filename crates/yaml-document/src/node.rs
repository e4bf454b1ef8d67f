use crate::scalar::ScalarStyle;
use crate::span::Span;

/// A handle into a [`Document`]'s node arena. Cheap to copy, stable for the
/// lifetime of the document that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct MappingEntry {
    pub key: NodeId,
    pub colon_offset: usize,
    pub value: NodeId,
}

/// The tagged-union variants of a Structural Tree node (`spec.md` §3).
#[derive(Debug, Clone)]
pub enum NodeKind {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<NodeId>),
    Mapping(Vec<MappingEntry>),
    /// A first-class alias node: `*name`. Not eagerly expanded — holds a
    /// reference to the node that `&name` anchored.
    Alias { anchor_name: String, target: Option<NodeId> },
}

impl NodeKind {
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Boolean(_) | Self::Integer(_) | Self::Float(_) | Self::String(_)
        )
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    /// `Some` only for scalar nodes; distinguishes quoted from plain forms.
    pub raw_form: Option<ScalarStyle>,
    pub tag: Option<String>,
    pub anchor: Option<String>,
}

/// The node arena backing one parsed YAML document (one `---`-delimited
/// section of the source). Owns spans, the anchor table, and per-document
/// parse diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    pub root: Option<NodeId>,
    pub anchors: std::collections::HashMap<String, NodeId>,
    pub comments: Vec<crate::comments::Comment>,
    pub errors: Vec<crate::error::ParseError>,
    pub(crate) alias_expansions: std::cell::Cell<u32>,
}

/// Number of alias dereferences a single document may perform while
/// materializing an expanded value, guarding against billion-laughs-style
/// expansion bombs (`spec.md` §4.1).
pub const ALIAS_EXPANSION_LIMIT: u32 = 10_000;

impl Document {
    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn root_node(&self) -> Option<&Node> {
        self.root.map(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve an alias chain to its concrete target, bumping (and checking)
    /// the per-document alias-traversal counter. Returns `None` once the
    /// cap is exceeded; the caller is expected to have already recorded the
    /// resulting `AliasLimitExceeded` parse error (see [`Document::note_alias_overflow`]).
    pub fn resolve_alias(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            let count = self.alias_expansions.get();
            if count >= ALIAS_EXPANSION_LIMIT {
                return None;
            }
            self.alias_expansions.set(count + 1);
            match &self.get(current).kind {
                NodeKind::Alias { target: Some(t), .. } => current = *t,
                NodeKind::Alias { target: None, .. } => return None,
                _ => return Some(current),
            }
        }
    }

    /// The concrete node `id` denotes: if `id` is an alias, its resolved
    /// target; otherwise `id` itself.
    pub fn deref(&self, id: NodeId) -> Option<NodeId> {
        if matches!(self.get(id).kind, NodeKind::Alias { .. }) {
            self.resolve_alias(id)
        } else {
            Some(id)
        }
    }
}

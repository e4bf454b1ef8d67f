//! The structural kinds a `type` keyword can name, used for building
//! `Incorrect type. Expected "..."` diagnostics (`spec.md` §4.6).

use std::fmt;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrimitiveType::Array => "array",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Null => "null",
            PrimitiveType::Number => "number",
            PrimitiveType::Object => "object",
            PrimitiveType::String => "string",
        })
    }
}

impl From<&yaml_document::NodeKind> for PrimitiveType {
    fn from(kind: &yaml_document::NodeKind) -> Self {
        use yaml_document::NodeKind;
        match kind {
            NodeKind::Null => PrimitiveType::Null,
            NodeKind::Boolean(_) => PrimitiveType::Boolean,
            NodeKind::Integer(_) => PrimitiveType::Integer,
            NodeKind::Float(_) => PrimitiveType::Number,
            NodeKind::String(_) => PrimitiveType::String,
            NodeKind::Sequence(_) => PrimitiveType::Array,
            NodeKind::Mapping(_) => PrimitiveType::Object,
            NodeKind::Alias { .. } => PrimitiveType::Null,
        }
    }
}

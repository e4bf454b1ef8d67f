//! Maps a document to the schemas that apply to it (`spec.md` §4.5 C5,
//! §4.8 C8): glob-based associations plus an inline modeline override, with
//! multiple contributing schemas combined into a synthetic `allOf` root so
//! none of them silently shadows another.

mod kubernetes;
pub mod modeline;
mod registry;

pub use registry::{combined_label, source_label, synthetic_schema, Contribution, SchemaAssociation, SchemaRegistry};

//! Validates a YAML Structural Tree against a Resolved Schema.
//!
//! Instead of compiling a schema into a validator tree ahead of time, this
//! crate walks a [`SchemaCursor`] (a schema node plus its `schema_referencing`
//! resolver scope) alongside the instance tree, resolving `$ref`/`$dynamicRef`
//! lazily as the traversal reaches them. See [`schema_nav`] for the rationale.
//!
//! ```
//! use schema_referencing::{Draft, Registry};
//! use serde_json::json;
//! use yaml_document::{parse, ParseOptions};
//!
//! let schema = json!({"type": "object", "required": ["name"]});
//! let registry = Registry::options()
//!     .try_new("mem:///schema", Draft::Draft202012.create_resource(schema.clone()))
//!     .unwrap();
//! let resolver = registry.try_resolver("mem:///schema").unwrap();
//! let cursor = schema_validator::SchemaCursor::root(&schema, resolver, Draft::Draft202012);
//!
//! let parsed = parse("age: 1\n", &ParseOptions::default());
//! let doc = &parsed.documents[0];
//! let options = schema_validator::ValidationOptions::default();
//! let result = schema_validator::validate(&cursor, doc, doc.root.unwrap(), &options);
//! assert!(result.has_errors());
//! ```

mod context;
mod ecma;
pub mod error;
pub mod formats;
mod keywords;
mod options;
pub mod primitive_type;
mod result;
mod schema_nav;
mod validator;

pub use context::{EvalState, EvaluatedSet};
pub use error::ValidatorError;
pub use options::ValidationOptions;
pub use primitive_type::PrimitiveType;
pub use result::{ValidationMessage, ValidationResult};
pub use schema_nav::SchemaCursor;
pub use validator::validate;

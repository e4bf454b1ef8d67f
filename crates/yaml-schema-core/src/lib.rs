//! Orchestrates the parser, resolver, registry, validator and diagnostics
//! reporter (`spec.md` §2 C1–C9) behind one entry point: [`Core::validate_document`].
//! Owns the process-wide [`Config`] and the edit-version cancellation gate
//! (`spec.md` §5).

mod cancellation;
mod config;
mod core;
mod error;

pub use config::{Config, FlowStylePolicy, YamlVersionSetting};
pub use error::CoreError;
pub use self::core::Core;

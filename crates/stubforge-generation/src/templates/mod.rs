//! Stub templates: lookup, compilation and token casing

pub mod casing;
pub mod compiler;
pub mod store;

// Re-export public API
pub use casing::{
    naming_tokens, to_class_name, to_kebab_name, to_pascal_slug, to_snake_name,
    to_variable_name, CaseTransform, NAMING_TOKENS,
};
pub use compiler::{context_tokens, substitute, StubCompiler};
pub use store::{TemplateStore, STUB_EXTENSION};

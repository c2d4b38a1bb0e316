#![warn(missing_docs)]

//! Stub-based file generation for stubforge
//!
//! Compiles `<name>.stub` templates by literal `{{token}}` substitution,
//! derives naming-convention tokens from a single identifier and writes the
//! result to disk without clobbering existing files unless asked to.

pub mod error;
pub mod generator;
pub mod models;
pub mod output_writer;
pub mod templates;

// Re-export public API
pub use error::{GenerationError, Result};
pub use generator::{GenerateOptions, Generator, GeneratorContext, StubGenerator};
pub use models::{Replacements, Template};
pub use output_writer::{OutputWriter, OutputWriterConfig};
pub use stubforge_config::{GeneratorConfig, ProjectContext};
pub use templates::{
    naming_tokens, to_class_name, to_kebab_name, to_pascal_slug, to_snake_name,
    to_variable_name, CaseTransform, StubCompiler, TemplateStore,
};

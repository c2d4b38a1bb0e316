//! Stubforge configuration management
//!
//! Loads generator settings from built-in defaults, an optional TOML file and
//! `STUBFORGE_*` environment variables, in that order of precedence.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{ConfigStore, GeneratorConfig, ProjectContext, DEFAULT_DIR_MODE};

//! Core configuration types

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Permission mode applied to directories created by the writer
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Settings shared by every generator run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory holding `<name>.stub` templates
    pub stub_dir: PathBuf,
    /// Root that generator output paths are resolved against
    pub base_path: PathBuf,
    /// Whether existing files may be replaced
    pub overwrite: bool,
    /// Permission mode for created directories
    pub dir_mode: u32,
    /// Log level name
    pub log_level: String,
    /// Default token values applied to every compile
    pub defaults: HashMap<String, String>,
    /// Project identity used for context-aware compiles
    pub project: Option<ProjectContext>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            stub_dir: PathBuf::from("stubs"),
            base_path: PathBuf::from("."),
            overwrite: false,
            dir_mode: DEFAULT_DIR_MODE,
            log_level: "info".to_string(),
            defaults: HashMap::new(),
            project: None,
        }
    }
}

/// Identity of the project that generated files belong to.
///
/// Every generator needs the same derived tokens from these four values,
/// see `StubCompiler::compile_with_context`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectContext {
    /// Hyphenated project slug (e.g. `my-plugin`)
    pub slug: String,
    /// Identifier prefix (e.g. `myplugin_`)
    pub prefix: String,
    /// Translation text domain
    pub text_domain: String,
    /// Root code namespace (e.g. `MyPlugin`)
    pub namespace: String,
}

impl ProjectContext {
    /// Create a project context
    pub fn new(
        slug: impl Into<String>,
        prefix: impl Into<String>,
        text_domain: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            prefix: prefix.into(),
            text_domain: text_domain.into(),
            namespace: namespace.into(),
        }
    }
}

/// Loading, saving and validating generator configuration
pub trait ConfigStore {
    /// Load configuration
    fn load_config(&mut self) -> Result<GeneratorConfig, crate::error::ConfigError>;
    /// Save configuration
    fn save_config(&self, config: &GeneratorConfig) -> Result<(), crate::error::ConfigError>;
    /// Validate configuration
    fn validate_config(&self, config: &GeneratorConfig) -> Result<(), crate::error::ConfigError>;
}

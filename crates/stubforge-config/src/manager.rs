//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{ConfigStore, GeneratorConfig},
};

const ENV_PREFIX: &str = "STUBFORGE";

/// Configuration manager
///
/// Layers, lowest precedence first: [`GeneratorConfig::default`], the TOML
/// file at `config_path` (optional), then `<PREFIX>_*` environment variables.
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create with custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Path of the configuration file
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get default config path
    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stubforge")
            .join("config.toml")
    }

    fn load_file(&self) -> Result<GeneratorConfig> {
        if !self.config_path.is_file() {
            debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(GeneratorConfig::default());
        }

        let raw = std::fs::read_to_string(&self.config_path)?;
        let config: GeneratorConfig = toml::from_str(&raw)?;
        debug!(path = %self.config_path.display(), "Loaded config file");
        Ok(config)
    }

    fn apply_env(&self, config: &mut GeneratorConfig) -> Result<()> {
        let env = Config::builder()
            .add_source(Environment::with_prefix(&self.env_prefix))
            .build()?;

        if let Some(dir) = lookup(env.get_string("stub_dir"))? {
            config.stub_dir = PathBuf::from(dir);
        }
        if let Some(base) = lookup(env.get_string("base_path"))? {
            config.base_path = PathBuf::from(base);
        }
        if let Some(overwrite) = lookup(env.get_bool("overwrite"))? {
            config.overwrite = overwrite;
        }
        if let Some(mode) = lookup(env.get_string("dir_mode"))? {
            config.dir_mode = parse_mode(&mode)?;
        }
        if let Some(level) = lookup(env.get_string("log_level"))? {
            config.log_level = level;
        }

        Ok(())
    }
}

/// Treat a missing key as "not set" and surface every other error
fn lookup<T>(value: std::result::Result<T, config::ConfigError>) -> Result<Option<T>> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Parse a permission mode written as `0o755`, `0755` (octal) or `493` (decimal)
pub fn parse_mode(raw: &str) -> Result<u32> {
    let raw = raw.trim();
    let parsed = if let Some(octal) = raw.strip_prefix("0o") {
        u32::from_str_radix(octal, 8)
    } else if raw.len() > 1 && raw.starts_with('0') {
        u32::from_str_radix(&raw[1..], 8)
    } else {
        raw.parse::<u32>()
    };

    parsed.map_err(|e| ConfigError::Parse(format!("Invalid dir_mode '{}': {}", raw, e)))
}

impl ConfigStore for ConfigManager {
    fn load_config(&mut self) -> Result<GeneratorConfig> {
        let mut config = self.load_file()?;
        self.apply_env(&mut config)?;
        self.validate_config(&config)?;
        Ok(config)
    }

    fn save_config(&self, config: &GeneratorConfig) -> Result<()> {
        let toml = toml::to_string(config)?;
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }

    fn validate_config(&self, config: &GeneratorConfig) -> Result<()> {
        if config.stub_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "stub_dir must not be empty".to_string(),
            ));
        }
        if config.dir_mode > 0o7777 {
            return Err(ConfigError::Validation(format!(
                "dir_mode {:o} is not a valid permission mode",
                config.dir_mode
            )));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProjectContext, DEFAULT_DIR_MODE};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::with_path(temp_dir.path().join("absent.toml"))
            .with_env_prefix("STUBFORGE_TEST_MISSING");

        let config = manager.load_config().unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
stub_dir = "templates/stubs"
overwrite = true
dir_mode = 0o700

[defaults]
author = "someone"

[project]
slug = "my-plugin"
prefix = "myplugin_"
text_domain = "my-plugin"
namespace = "MyPlugin"
"#,
        )
        .unwrap();

        let mut manager = ConfigManager::with_path(&path).with_env_prefix("STUBFORGE_TEST_FILE");
        let config = manager.load_config().unwrap();

        assert_eq!(config.stub_dir, PathBuf::from("templates/stubs"));
        assert!(config.overwrite);
        assert_eq!(config.dir_mode, 0o700);
        assert_eq!(config.defaults.get("author").map(String::as_str), Some("someone"));
        assert_eq!(
            config.project,
            Some(ProjectContext::new("my-plugin", "myplugin_", "my-plugin", "MyPlugin"))
        );
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "stub_dir = \"from-file\"\noverwrite = false\n").unwrap();

        std::env::set_var("STUBFORGE_TEST_ENV_STUB_DIR", "from-env");
        std::env::set_var("STUBFORGE_TEST_ENV_OVERWRITE", "true");
        std::env::set_var("STUBFORGE_TEST_ENV_DIR_MODE", "0750");

        let mut manager = ConfigManager::with_path(&path).with_env_prefix("STUBFORGE_TEST_ENV");
        let config = manager.load_config().unwrap();

        assert_eq!(config.stub_dir, PathBuf::from("from-env"));
        assert!(config.overwrite);
        assert_eq!(config.dir_mode, 0o750);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "overwrite = \"maybe\"").unwrap();

        let mut manager = ConfigManager::with_path(&path).with_env_prefix("STUBFORGE_TEST_BAD");
        assert!(matches!(manager.load_config(), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let mut manager = ConfigManager::with_path(&path).with_env_prefix("STUBFORGE_TEST_SAVE");

        let mut config = GeneratorConfig::default();
        config.stub_dir = PathBuf::from("my-stubs");
        config.defaults.insert("license".to_string(), "MIT".to_string());
        manager.save_config(&config).unwrap();

        assert!(path.exists());
        assert_eq!(manager.load_config().unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let manager = ConfigManager::new();

        let mut config = GeneratorConfig::default();
        assert!(manager.validate_config(&config).is_ok());

        config.dir_mode = 0o17777;
        assert!(matches!(
            manager.validate_config(&config),
            Err(ConfigError::Validation(_))
        ));

        config.dir_mode = DEFAULT_DIR_MODE;
        config.stub_dir = PathBuf::new();
        assert!(manager.validate_config(&config).is_err());
    }

    #[test]
    fn test_parse_mode_formats() {
        assert_eq!(parse_mode("0o755").unwrap(), 0o755);
        assert_eq!(parse_mode("0755").unwrap(), 0o755);
        assert_eq!(parse_mode("493").unwrap(), 0o755);
        assert_eq!(parse_mode("0").unwrap(), 0);
        assert!(parse_mode("rwx").is_err());
    }
}

//! Generator interface used by concrete scaffolding commands
//!
//! A generator only decides which stub to compile and where the result goes.
//! Compilation and writing are shared through [`GeneratorContext`].

use std::path::{Path, PathBuf};

use stubforge_config::{ConfigManager, ConfigStore, GeneratorConfig, ProjectContext};
use tracing::info;

use crate::error::Result;
use crate::models::Replacements;
use crate::output_writer::OutputWriter;
use crate::templates::{naming_tokens, substitute, StubCompiler, TemplateStore};

/// Per-call generation options
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Replace files that already exist
    pub force: bool,
    /// Leave existing files alone instead of failing (ignored when `force` is set)
    pub skip_existing: bool,
    /// Extra tokens; these win over the naming tokens
    pub replacements: Replacements,
}

impl GenerateOptions {
    /// Options that replace existing files
    pub fn forced() -> Self {
        Self {
            force: true,
            ..Self::default()
        }
    }

    /// Add an extra token
    pub fn with_replacement(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.replacements.insert(token.into(), value.into());
        self
    }
}

/// Collaborators shared by every generator
#[derive(Debug, Clone)]
pub struct GeneratorContext {
    /// Stub compiler
    pub compiler: StubCompiler,
    /// Output writer
    pub writer: OutputWriter,
    /// Root that relative output paths are resolved against
    pub base_path: PathBuf,
    /// Project identity; when set, compiles add the project tokens
    pub project: Option<ProjectContext>,
}

impl GeneratorContext {
    /// Create a context without project tokens
    pub fn new(compiler: StubCompiler, writer: OutputWriter, base_path: impl Into<PathBuf>) -> Self {
        Self {
            compiler,
            writer,
            base_path: base_path.into(),
            project: None,
        }
    }

    /// Attach a project context
    pub fn with_project(mut self, project: ProjectContext) -> Self {
        self.project = Some(project);
        self
    }

    /// Build every collaborator from generator settings
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let compiler = StubCompiler::new(TemplateStore::new(&config.stub_dir))
            .with_defaults(config.defaults.clone());

        Self {
            compiler,
            writer: OutputWriter::from_config(config),
            base_path: config.base_path.clone(),
            project: config.project.clone(),
        }
    }

    /// Load settings through [`ConfigManager`] (file plus `STUBFORGE_*` environment)
    pub fn load(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config = ConfigManager::with_path(config_path).load_config()?;
        Ok(Self::from_config(&config))
    }

    /// Resolve an output path against `base_path`; absolute paths pass through
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }

    /// Compile `stub`, adding project tokens when a project is attached
    pub fn compile(&self, stub: &str, replacements: &Replacements) -> Result<String> {
        match &self.project {
            Some(project) => self.compiler.compile_with_context(stub, project, replacements),
            None => self.compiler.compile(stub, replacements),
        }
    }
}

/// A kind of generated file (class, config file, ...)
pub trait Generator {
    /// Stub compiled for each item
    fn stub_name(&self) -> &str;

    /// Output path for the item called `name`, relative to the base path
    fn output_path(&self, name: &str) -> PathBuf;

    /// Tokens for the item called `name`
    fn replacements(&self, name: &str, options: &GenerateOptions) -> Replacements {
        let mut tokens = naming_tokens(name);
        tokens.extend(options.replacements.clone());
        tokens
    }

    /// Compile and write the item called `name`.
    ///
    /// Returns the paths written; a file skipped under `skip_existing` is not
    /// included.
    fn generate(
        &self,
        ctx: &GeneratorContext,
        name: &str,
        options: &GenerateOptions,
    ) -> Result<Vec<PathBuf>> {
        let content = ctx.compile(self.stub_name(), &self.replacements(name, options))?;
        let path = ctx.resolve(&self.output_path(name));

        let written = if options.force {
            let mut writer = ctx.writer.clone();
            writer.set_overwrite(true).write(&path, &content)?;
            true
        } else if options.skip_existing {
            ctx.writer.write_if_absent(&path, &content)?
        } else {
            ctx.writer.write(&path, &content)?;
            true
        };

        if !written {
            info!(stub = self.stub_name(), path = %path.display(), "Skipped existing file");
            return Ok(Vec::new());
        }

        info!(stub = self.stub_name(), path = %path.display(), "Generated file");
        Ok(vec![path])
    }
}

/// Generator described by data: a stub name plus an output path template.
///
/// The path template goes through [`substitute`] with the naming tokens
/// only (no compiler defaults or option replacements), e.g.
/// `src/Models/{{class}}.php`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubGenerator {
    stub: String,
    path_template: String,
}

impl StubGenerator {
    /// Create a generator
    pub fn new(stub: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self {
            stub: stub.into(),
            path_template: path_template.into(),
        }
    }
}

impl Generator for StubGenerator {
    fn stub_name(&self) -> &str {
        &self.stub
    }

    fn output_path(&self, name: &str) -> PathBuf {
        PathBuf::from(substitute(&self.path_template, &naming_tokens(name)))
    }
}

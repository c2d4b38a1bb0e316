//! Template lookup on disk
//!
//! Stubs live directly under a root directory as `<name>.stub`. Nothing is
//! cached: every load re-reads the file so edits show up on the next compile.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{GenerationError, Result};
use crate::models::Template;

/// File extension of stub templates
pub const STUB_EXTENSION: &str = "stub";

/// Resolves stub names to template text under a root directory
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the stub called `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, STUB_EXTENSION))
    }

    /// Whether a stub called `name` exists
    pub fn exists(&self, name: &str) -> bool {
        is_stub_name(name) && self.path_for(name).is_file()
    }

    /// Read the raw text of the stub called `name`
    pub fn load(&self, name: &str) -> Result<String> {
        if !is_stub_name(name) {
            debug!(stub = name, "Rejected stub name outside the root");
            return Err(GenerationError::TemplateNotFound(name.to_string()));
        }

        let path = self.path_for(name);

        if !path.exists() {
            return Err(GenerationError::TemplateNotFound(name.to_string()));
        }

        let content = fs::read_to_string(&path).map_err(|source| GenerationError::TemplateReadError {
            name: name.to_string(),
            source,
        })?;

        debug!(stub = name, path = %path.display(), bytes = content.len(), "Loaded stub");
        Ok(content)
    }

    /// Load the stub called `name` as a [`Template`]
    pub fn load_template(&self, name: &str) -> Result<Template> {
        Ok(Template::new(name, self.load(name)?))
    }

    /// Names of all stubs in the root, sorted.
    ///
    /// A missing or unreadable root yields an empty list; discovery is only
    /// used for help output.
    pub fn list_available(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(root = %self.root.display(), error = %e, "Stub directory not readable");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!(root = %self.root.display(), error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|path| path.is_file())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(STUB_EXTENSION))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .filter(|stem| !stem.is_empty() && !stem.starts_with('.'))
                    .map(str::to_string)
            })
            .collect();

        names.sort();
        names
    }
}

/// Stub names are plain file stems: no separators, no `.`/`..` components
fn is_stub_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && name != "." && name != ".."
}

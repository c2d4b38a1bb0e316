//! Error types for stub generation

use std::path::PathBuf;

use stubforge_config::ConfigError;
use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors that can occur while compiling stubs and writing their output
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No `<name>.stub` file exists in the template root
    #[error("Stub not found: {0}")]
    TemplateNotFound(String),

    /// The stub exists but could not be read
    #[error("Could not read stub: {name}: {source}")]
    TemplateReadError {
        /// Stub name
        name: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A file is already present and overwriting is disabled
    #[error("File already exists: {}", .0.display())]
    DestinationAlreadyExists(PathBuf),

    /// The destination's parent directory could not be created
    #[error("Could not create directory: {}: {source}", .path.display())]
    DirectoryCreateFailed {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The content could not be written
    #[error("Could not write file: {}: {source}", .path.display())]
    WriteFailed {
        /// Destination path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GenerationError {
    /// Path the error refers to, when it concerns a destination
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            GenerationError::DestinationAlreadyExists(path)
            | GenerationError::DirectoryCreateFailed { path, .. }
            | GenerationError::WriteFailed { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_stub() {
        let err = GenerationError::TemplateNotFound("nonexistent".to_string());
        assert_eq!(err.to_string(), "Stub not found: nonexistent");
    }

    #[test]
    fn test_path_accessor() {
        let err = GenerationError::DestinationAlreadyExists(PathBuf::from("src/a.php"));
        assert_eq!(err.path(), Some(std::path::Path::new("src/a.php")));
        assert!(err.to_string().contains("src/a.php"));

        let err = GenerationError::TemplateNotFound("a".to_string());
        assert!(err.path().is_none());
    }
}

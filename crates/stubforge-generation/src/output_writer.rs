//! Output writer for compiled stubs
//!
//! Each write runs three steps: the overwrite check, parent directory
//! creation and the content write. The content goes to a sibling temporary
//! file that is renamed over the destination, so readers see either the old
//! or the new file.
//!
//! The existence check and the write are not atomic as a pair. Callers that
//! generate the same path concurrently must serialise those writes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use stubforge_config::{GeneratorConfig, DEFAULT_DIR_MODE};
use tracing::debug;
use uuid::Uuid;

use crate::error::{GenerationError, Result};

/// Configuration for output writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputWriterConfig {
    /// Whether existing files may be replaced
    pub overwrite: bool,
    /// Permission mode for created directories (ignored off unix)
    pub dir_mode: u32,
}

impl Default for OutputWriterConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            dir_mode: DEFAULT_DIR_MODE,
        }
    }
}

/// Writes generated content to disk under an overwrite policy
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    config: OutputWriterConfig,
}

impl OutputWriter {
    /// Create a writer that refuses to overwrite
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom configuration
    pub fn with_config(config: OutputWriterConfig) -> Self {
        Self { config }
    }

    /// Create a writer from generator settings
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::with_config(OutputWriterConfig {
            overwrite: config.overwrite,
            dir_mode: config.dir_mode,
        })
    }

    /// Current configuration
    pub fn config(&self) -> &OutputWriterConfig {
        &self.config
    }

    /// Whether existing files may be replaced
    pub fn overwrite(&self) -> bool {
        self.config.overwrite
    }

    /// Change the overwrite policy for subsequent writes
    pub fn set_overwrite(&mut self, overwrite: bool) -> &mut Self {
        self.config.overwrite = overwrite;
        self
    }

    /// Write `content` to `path`.
    ///
    /// Fails with [`GenerationError::DestinationAlreadyExists`] when `path`
    /// exists and overwriting is disabled; the filesystem is left untouched
    /// in that case.
    pub fn write(&self, path: &Path, content: &str) -> Result<()> {
        if !self.config.overwrite && path.exists() {
            return Err(GenerationError::DestinationAlreadyExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.ensure_directory(parent)?;
        }

        self.write_atomic(path, content)?;

        debug!(path = %path.display(), bytes = content.len(), "Wrote file");
        Ok(())
    }

    /// Write only when nothing exists at `path`.
    ///
    /// Returns `false` without touching the filesystem if `path` exists.
    pub fn write_if_absent(&self, path: &Path, content: &str) -> Result<bool> {
        if path.exists() {
            debug!(path = %path.display(), "File exists, skipping");
            return Ok(false);
        }

        self.write(path, content)?;
        Ok(true)
    }

    fn ensure_directory(&self, dir: &Path) -> Result<()> {
        if dir.is_dir() {
            return Ok(());
        }

        match create_dir_all(dir, self.config.dir_mode) {
            Ok(()) => {
                debug!(path = %dir.display(), mode = %format!("{:o}", self.config.dir_mode), "Created directory");
                Ok(())
            }
            // Someone else created it in the meantime
            Err(_) if dir.is_dir() => Ok(()),
            Err(source) => Err(GenerationError::DirectoryCreateFailed {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let temp_path = temp_path(path);

        let result = fs::write(&temp_path, content).and_then(|()| fs::rename(&temp_path, path));

        if let Err(source) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(GenerationError::WriteFailed {
                path: path.to_path_buf(),
                source,
            });
        }

        Ok(())
    }
}

fn create_dir_all(dir: &Path, mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(dir)
}

/// Sibling temporary path: `.tmp-<uuid>`.
///
/// The name is fixed length so any destination name the filesystem accepts
/// also gets a valid temporary.
fn temp_path(path: &Path) -> PathBuf {
    path.with_file_name(format!(".tmp-{}", Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.php");

        OutputWriter::new().write(&path, "<?php echo \"test\";").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<?php echo \"test\";");
    }

    #[test]
    fn test_write_creates_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deep/nested/dir/file.php");

        OutputWriter::new().write(&path, "content").unwrap();

        assert!(path.exists());
        assert!(temp_dir.path().join("deep/nested").is_dir());
    }

    #[test]
    fn test_write_refuses_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("exists.php");
        fs::write(&path, "original").unwrap();

        let err = OutputWriter::new().write(&path, "new content").unwrap_err();

        assert!(matches!(err, GenerationError::DestinationAlreadyExists(ref p) if p == &path));
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_write_overwrites_when_enabled() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("overwrite.php");
        fs::write(&path, "original content that is longer").unwrap();

        let writer = OutputWriter::with_config(OutputWriterConfig {
            overwrite: true,
            ..Default::default()
        });
        writer.write(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_set_overwrite_affects_later_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("toggle.php");
        fs::write(&path, "original").unwrap();

        let mut writer = OutputWriter::new();
        assert!(writer.write(&path, "first").is_err());

        writer.set_overwrite(true).write(&path, "second").unwrap();
        assert!(writer.overwrite());
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");

        writer.set_overwrite(false);
        assert!(writer.write(&path, "third").is_err());
    }

    #[test]
    fn test_write_if_absent_skips_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("exists.php");
        fs::write(&path, "original").unwrap();

        let written = OutputWriter::new().write_if_absent(&path, "new content").unwrap();

        assert!(!written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_write_if_absent_creates_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sub/new.php");

        let written = OutputWriter::new().write_if_absent(&path, "content").unwrap();

        assert!(written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clean.php");

        OutputWriter::new().write(&path, "content").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_long_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(format!("{}.php", "a".repeat(240)));

        OutputWriter::new().write(&path, "content").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_directory_blocked_by_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("blocker"), "i am a file").unwrap();
        let path = temp_dir.path().join("blocker/child/file.php");

        let err = OutputWriter::new().write(&path, "content").unwrap_err();

        assert!(matches!(err, GenerationError::DirectoryCreateFailed { .. }));
        assert_eq!(err.path(), Some(temp_dir.path().join("blocker/child").as_path()));
    }

    #[test]
    fn test_write_onto_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a-directory");
        fs::create_dir(&path).unwrap();

        let mut writer = OutputWriter::new();
        writer.set_overwrite(true);
        let err = writer.write(&path, "content").unwrap_err();

        assert!(matches!(err, GenerationError::WriteFailed { .. }));
        assert!(path.is_dir());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_created_directories_use_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("private/file.txt");

        let writer = OutputWriter::with_config(OutputWriterConfig {
            overwrite: false,
            dir_mode: 0o700,
        });
        writer.write(&path, "secret").unwrap();

        let mode = fs::metadata(temp_dir.path().join("private"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn test_from_config() {
        let config = GeneratorConfig {
            overwrite: true,
            dir_mode: 0o750,
            ..Default::default()
        };
        let writer = OutputWriter::from_config(&config);
        assert!(writer.overwrite());
        assert_eq!(writer.config().dir_mode, 0o750);
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let temp = temp_path(Path::new("out/dir/file.php"));
        assert_eq!(temp.parent(), Some(Path::new("out/dir")));
        let name = temp.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(".tmp-"));
        assert_eq!(name.len(), ".tmp-".len() + 36);
    }
}

//! File-based snapshot output.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{OutputError, SnapshotWriter};

/// File-based implementation of [`SnapshotWriter`].
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename pattern to prevent torn reads:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
#[derive(Debug, Clone)]
pub struct FileOutput {
    path: PathBuf,
}

impl FileOutput {
    /// Creates an output writing to the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the output file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Performs the blocking write.
    ///
    /// Separated out so it can be wrapped in `spawn_blocking`.
    fn write_blocking(path: &Path, bytes: &[u8]) -> Result<(), OutputError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(OutputError::Write)?;
            }
        }

        let temp_path = temp_path_for(path);

        std::fs::write(&temp_path, bytes).map_err(OutputError::Write)?;
        if let Err(e) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(OutputError::Write(e));
        }

        Ok(())
    }
}

/// Appends `.tmp` to the full file name (ip_info.json -> ip_info.json.tmp).
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

impl SnapshotWriter for FileOutput {
    async fn write(&self, bytes: &[u8]) -> Result<(), OutputError> {
        let path = self.path.clone();
        let bytes = bytes.to_vec();

        tokio::task::spawn_blocking(move || Self::write_blocking(&path, &bytes))
            .await
            .map_err(OutputError::Task)?
    }
}

//! Filesystem side of generation.
//!
//! Directories are created idempotently. Files are created strictly: an
//! existing file is never truncated, even if it appeared after the conflict
//! check ran.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{GenerateError, Result};

/// Create `dir` and any missing parents.
///
/// # Errors
///
/// [`GenerateError::Io`] if a directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| GenerateError::io(dir, e))?;
    debug!(path = %dir.display(), "directory ready");
    Ok(())
}

/// Write `contents` to a file that must not exist yet, creating parent
/// directories as needed.
///
/// # Errors
///
/// [`GenerateError::TargetAlreadyExists`] if the file exists and
/// [`GenerateError::Io`] for any other filesystem failure.
pub fn write_new(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => GenerateError::TargetAlreadyExists {
                paths: vec![path.to_path_buf()],
            },
            _ => GenerateError::io(path, e),
        })?;
    file.write_all(contents.as_bytes())
        .map_err(|e| GenerateError::io(path, e))?;
    info!(path = %path.display(), bytes = contents.len(), "file written");
    Ok(())
}

/// Every path in `paths` that already exists, in input order. Symlinks count
/// even when their target is missing, since `create_new` refuses them too.
#[must_use]
pub fn find_conflicts<'a, I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = &'a Path>,
{
    paths
        .into_iter()
        .filter(|p| fs::symlink_metadata(p).is_ok())
        .map(Path::to_path_buf)
        .collect()
}

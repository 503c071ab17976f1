//! Whole-file persistence shared by the registry state file and bundles.
//!
//! Every write replaces the target in full: the contents go to a sibling
//! temporary file which is then renamed over the target, so a concurrent
//! reader sees either the old or the new file. There is no locking between
//! writers; two processes rewriting the same file race and the last rename
//! wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, instrument, trace};

use crate::error::{Result, SnipError};

/// Read a file to a string, mapping a missing file to `None`.
///
/// A path below a regular file counts as missing. Contents that are not
/// UTF-8 come back as [`SnipError::Io`] with [`ErrorKind::InvalidData`].
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            trace!(path = %path.display(), bytes = contents.len(), "Read file");
            Ok(Some(contents))
        }
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            trace!(path = %path.display(), "File does not exist");
            Ok(None)
        }
        Err(e) => Err(SnipError::Io(e)),
    }
}

/// Replace `path` with `contents`, creating parent directories as needed.
///
/// Failures are logged and reported as [`SnipError::SaveFailed`].
#[instrument(skip(contents), fields(path = %path.display(), bytes = contents.len()))]
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let result = try_write(path, contents);
    if let Err(e) = &result {
        error!(path = %path.display(), error = %e, "Failed to write file");
    }
    result.map_err(|e| SnipError::SaveFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn try_write(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    debug!(path = %path.display(), "File written");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

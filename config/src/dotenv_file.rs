//! Project `.env` loading. Keys already present in the process environment are kept.

use std::path::{Path, PathBuf};

use crate::LoadError;

/// `.env` in `override_dir` if given, else the current directory; `None` when absent.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Applies `.env` to the process environment without overriding set variables.
/// Returns the path that was applied.
pub(crate) fn apply(override_dir: Option<&Path>) -> Result<Option<PathBuf>, LoadError> {
    let Some(path) = dotenv_path(override_dir) else {
        return Ok(None);
    };
    ::dotenv::from_path(&path).map_err(|e| LoadError::DotenvRead(e.to_string()))?;
    Ok(Some(path))
}

//! Output directory handling.

use crate::error::{Result, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Make sure `dir` exists so chart files can be written into it.
///
/// Idempotent: an existing directory is left untouched. Fails only on real
/// filesystem errors (permissions, a regular file in the way, ...).
pub fn ensure_output(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        fs::create_dir_all(dir)
            .context(format!("Creating output directory '{}'", dir.display()))?;
        debug!("Created output directory: {}", dir.display());
    }
    Ok(dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_output_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("nested").join("output");

        let first = ensure_output(&target).unwrap();
        assert!(first.is_dir());

        let second = ensure_output(&target).unwrap();
        assert_eq!(first, second);
        assert!(target.is_dir());
    }

    #[test]
    fn test_ensure_output_fails_when_file_in_the_way() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("output");
        fs::write(&blocker, b"not a directory").unwrap();

        let error = ensure_output(&blocker).unwrap_err();
        assert_eq!(error.error_code(), "IO_ERROR");
    }
}

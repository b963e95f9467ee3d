use crate::prelude::*;

use std::path::{Path, PathBuf};

use super::Error;

/// Path extensions
pub trait PathExt: Sized + AsRef<Path> {
    /// Convert to an absolute path
    fn to_abs(&self) -> Result<PathBuf, Error> {
        let path = self.as_ref();
        dunce::canonicalize(path)
            .change_context_lazy(|| Error::Canonicalize(path.display().to_string()))
    }
    /// Convert to relative path from base.
    ///
    /// If either path is relative, `self` is returned as is
    fn rebase(&self, base: impl AsRef<Path>) -> PathBuf {
        let path = self.as_ref();
        let base = base.as_ref();
        if !path.is_absolute() || !base.is_absolute() {
            return path.to_path_buf();
        }
        pathdiff::diff_paths(path, base).unwrap_or(path.to_path_buf())
    }
}

impl PathExt for PathBuf {}

impl PathExt for &Path {}

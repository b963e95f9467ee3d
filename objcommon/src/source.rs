//! Source files and compile targets, as seen by the resolver
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Anything that can be resolved to the full path of a source file
pub trait FullPath {
    /// Full (absolute) path of the source file
    fn full_path(&self) -> &Path;
}

impl FullPath for Path {
    #[inline]
    fn full_path(&self) -> &Path {
        self
    }
}

impl FullPath for PathBuf {
    #[inline]
    fn full_path(&self) -> &Path {
        self
    }
}

impl<T: FullPath + ?Sized> FullPath for &T {
    #[inline]
    fn full_path(&self) -> &Path {
        (**self).full_path()
    }
}

/// A source file of a target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceFile {
    /// Full path of the source file
    path: PathBuf,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FullPath for SourceFile {
    #[inline]
    fn full_path(&self) -> &Path {
        &self.path
    }
}

/// A compile target with its ordered source files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub sources: Vec<SourceFile>,
}

impl Target {
    pub fn new(name: impl Into<String>, sources: Vec<SourceFile>) -> Self {
        Self {
            name: name.into(),
            sources,
        }
    }
}

/// Get the file name from a path, with the last extension removed.
///
/// Both `/` and `\` are treated as separators. Only the text after the last
/// `.` of the file name is removed, so `a.b.c` becomes `a.b`, and a name
/// without a `.` is returned as is.
pub fn base_name(path: &str) -> &str {
    let slash = path.rfind(|c: char| c == '/' || c == '\\').map(|i| i + 1).unwrap_or(0);
    let name = &path[slash..];
    match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("/src/Foo.cpp"), "Foo");
        assert_eq!(base_name("/src/Foo"), "Foo");
        assert_eq!(base_name("Foo.cpp"), "Foo");
        assert_eq!(base_name("/src/archive.tar.gz"), "archive.tar");
        assert_eq!(base_name("C:\\src\\Bar.mm"), "Bar");
    }

    #[test]
    fn test_base_name_ignores_dots_in_directories() {
        assert_eq!(base_name("/proj.d/src/Makefile"), "Makefile");
        assert_eq!(base_name("/proj.d/src/main.c"), "main");
    }

    #[test]
    fn test_base_name_dot_file() {
        // only the text before the last dot is kept
        assert_eq!(base_name("/src/.hidden"), "");
    }

    #[test]
    fn test_source_file_full_path() {
        let source = SourceFile::new("/proj/src/Util.CPP");
        assert_eq!(source.full_path(), Path::new("/proj/src/Util.CPP"));
    }
}

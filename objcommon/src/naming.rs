//! Object file naming for a target's sources
//!
//! Each source is assigned `<base>.o`, where `<base>` is the file name without
//! its last extension. Names are compared case-insensitively, since object
//! directories usually live on a case-insensitive (but case-preserving)
//! filesystem. Duplicates are detected and reported, but never renamed:
//! the build tool consuming the generated project is expected to give
//! duplicate objects a unique suffix itself.
use derive_more::derive::{Deref, Display};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::hintln;
use crate::source::{base_name, FullPath};

/// Extension of object files
pub const OBJECT_EXT: &str = ".o";

/// Name of an object file, with the case of the source preserved
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectName(String);

impl ObjectName {
    /// Derive the object name from the full path of a source file
    pub fn from_source(source: &impl FullPath) -> Self {
        let path = source.full_path().to_string_lossy();
        let mut name = base_name(&path).to_string();
        name.push_str(OBJECT_EXT);
        Self(name)
    }

    /// The case-folded form used to detect collisions
    pub fn folded(&self) -> String {
        fold_case(&self.0)
    }
}

/// Case-fold a name for comparing on case-insensitive filesystems
#[inline]
pub fn fold_case(name: &str) -> String {
    name.to_lowercase()
}

/// Occurrence counts of folded object names within one target
#[derive(Debug, Default, Clone)]
pub struct CollisionTable {
    counts: FxHashMap<String, usize>,
}

impl CollisionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of a folded name.
    ///
    /// Returns true only when this occurrence is the second one,
    /// so each colliding name is flagged exactly once.
    pub fn insert(&mut self, folded: &str) -> bool {
        let count = match self.counts.get_mut(folded) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                self.counts.insert(folded.to_string(), 1);
                1
            }
        };
        count == 2
    }

    /// Number of times a folded name has been recorded
    pub fn count(&self, folded: &str) -> usize {
        self.counts.get(folded).copied().unwrap_or(0)
    }
}

/// Folded object names that occur more than once in a target,
/// in the order they were detected
#[derive(Debug, Default, Clone, PartialEq, Eq, Deref, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collisions(Vec<String>);

impl Collisions {
    pub fn contains(&self, folded: &str) -> bool {
        self.0.iter().any(|x| x == folded)
    }

    /// Print a warning for each collision
    pub fn report(&self, target: impl std::fmt::Display) {
        for folded in &self.0 {
            hintln!(
                "Warning",
                "target `{}` has multiple sources that compile to object `{}`",
                target,
                folded
            );
        }
    }
}

/// Object names of a target, index-aligned with its sources
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedObjects {
    /// One name per source, in source order
    pub names: Vec<ObjectName>,
    /// Folded names flagged as duplicates
    pub collisions: Collisions,
}

impl NamedObjects {
    /// Indices of the sources whose object name folds to `folded`
    pub fn colliding_sources(&self, folded: &str) -> Vec<usize> {
        self.names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.folded() == folded)
            .map(|(i, _)| i)
            .collect()
    }

    #[inline]
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }
}

/// Assign an object name to each source of a target
///
/// The output has the same length and order as `sources`. Sources whose
/// names collide keep the same name; the collision is only recorded.
pub fn name_objects<S: FullPath>(sources: &[S]) -> NamedObjects {
    let mut table = CollisionTable::new();
    let mut names = Vec::with_capacity(sources.len());
    let mut collisions = Vec::new();

    for source in sources {
        let name = ObjectName::from_source(source);
        let folded = name.folded();
        if table.insert(&folded) {
            collisions.push(folded);
        }
        names.push(name);
    }

    NamedObjects {
        names,
        collisions: Collisions(collisions),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use proptest::prelude::*;

    use super::*;
    use crate::source::SourceFile;

    fn sources(paths: &[&str]) -> Vec<SourceFile> {
        paths.iter().map(SourceFile::new).collect()
    }

    fn names(objects: &NamedObjects) -> Vec<&str> {
        objects.names.iter().map(|x| x.as_str()).collect()
    }

    #[test]
    fn test_empty() {
        let result = name_objects::<SourceFile>(&[]);
        assert!(result.names.is_empty());
        assert!(!result.has_collisions());
    }

    #[test]
    fn test_strip_extension() {
        let result = name_objects(&sources(&["/proj/src/Foo.cpp"]));
        assert_eq!(names(&result), vec!["Foo.o"]);
        assert!(!result.has_collisions());
    }

    #[test]
    fn test_no_extension() {
        let result = name_objects(&sources(&["/proj/src/Foo"]));
        assert_eq!(names(&result), vec!["Foo.o"]);
    }

    #[test]
    fn test_only_last_extension_removed() {
        let result = name_objects(&sources(&["/proj/src/foo.pb.cc"]));
        assert_eq!(names(&result), vec!["foo.pb.o"]);
    }

    #[test]
    fn test_case_differing_collision() {
        let result = name_objects(&sources(&["/proj/a/Foo.cpp", "/proj/b/foo.CPP"]));
        assert_eq!(names(&result), vec!["Foo.o", "foo.o"]);
        assert_eq!(*result.collisions, vec!["foo.o".to_string()]);
        assert_eq!(result.colliding_sources("foo.o"), vec![0, 1]);
    }

    #[test]
    fn test_same_base_flagged_once() {
        let result = name_objects(&sources(&["/p/Foo.cpp", "/p/Foo.c", "/p/Foo.mm"]));
        assert_eq!(names(&result), vec!["Foo.o", "Foo.o", "Foo.o"]);
        assert_eq!(result.collisions.len(), 1, "{:#?}", result.collisions);
        assert!(result.collisions.contains("foo.o"));
    }

    #[test]
    fn test_collisions_in_detection_order() {
        let result = name_objects(&sources(&[
            "/p/b.c", "/p/a.c", "/p/A.cpp", "/p/B.cpp", "/p/c.c",
        ]));
        assert_eq!(
            *result.collisions,
            vec!["a.o".to_string(), "b.o".to_string()]
        );
    }

    #[test]
    fn test_collision_table_counts() {
        let mut table = CollisionTable::new();
        assert!(!table.insert("foo.o"));
        assert!(table.insert("foo.o"));
        assert!(!table.insert("foo.o"));
        assert_eq!(table.count("foo.o"), 3);
        assert_eq!(table.count("bar.o"), 0);
    }

    #[test]
    fn test_accepts_plain_paths() {
        let paths = vec![PathBuf::from("/p/x.s"), PathBuf::from("/p/y.asm")];
        let result = name_objects(&paths);
        assert_eq!(names(&result), vec!["x.o", "y.o"]);
    }

    #[test]
    fn test_tables_are_per_call() {
        let input = sources(&["/p/Foo.cpp"]);
        let first = name_objects(&input);
        let second = name_objects(&input);
        assert!(!first.has_collisions());
        assert!(!second.has_collisions());
    }

    proptest! {
        #[test]
        fn test_length_and_order_preserved(
            files in prop::collection::vec("[A-Za-z]{1,4}(\\.[a-z]{1,3})?", 0..32)
        ) {
            let paths = files
                .iter()
                .map(|f| PathBuf::from(format!("/src/{}", f)))
                .collect::<Vec<_>>();
            let result = name_objects(&paths);
            prop_assert_eq!(result.names.len(), paths.len());
            for (name, path) in result.names.iter().zip(&paths) {
                prop_assert_eq!(name.clone(), ObjectName::from_source(path));
            }
        }

        #[test]
        fn test_each_collision_flagged_once(
            files in prop::collection::vec("[aAbB]{1,2}\\.(c|cpp|CPP)", 0..32)
        ) {
            let result = name_objects(&files.iter().map(PathBuf::from).collect::<Vec<_>>());
            let mut seen = result.collisions.to_vec();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), result.collisions.len());
            for folded in result.collisions.iter() {
                prop_assert!(result.colliding_sources(folded).len() >= 2);
            }
        }
    }
}

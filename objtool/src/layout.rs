//! Resolving the object layout of targets
use objcommon::prelude::*;

use std::path::Path;

use objcommon::config::Generator;
use objcommon::naming::{self, NamedObjects, ObjectName};
use objcommon::objdir::ObjectDirectory;
use objcommon::source::{FullPath, Target};
use objcommon::system::Executor;
use serde::Serialize;

use crate::error::Error;

/// Resolved object layout of one target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetLayout {
    pub name: String,
    pub object_dir: ObjectDirectory,
    /// Full paths of the sources, index-aligned with `objects.names`
    pub sources: Vec<String>,
    #[serde(flatten)]
    pub objects: NamedObjects,
}

impl TargetLayout {
    /// Resolve the object directory and object names of a target
    pub fn resolve(generator: &Generator, target: &Target) -> Self {
        let object_dir = generator.object_directory(&target.name);
        let objects = naming::name_objects(&target.sources);
        let sources = target
            .sources
            .iter()
            .map(|source| source.full_path().display().to_string())
            .collect();
        Self {
            name: target.name.clone(),
            object_dir,
            sources,
            objects,
        }
    }

    /// Each source paired with the object it compiles to
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ObjectName)> {
        self.sources
            .iter()
            .map(String::as_str)
            .zip(self.objects.names.iter())
    }

    #[inline]
    pub fn has_collisions(&self) -> bool {
        self.objects.has_collisions()
    }

    /// Report each collision with the sources involved
    pub fn report_collisions(&self, root: &Path) {
        self.objects.collisions.report(&self.name);
        for folded in self.objects.collisions.iter() {
            for i in self.objects.colliding_sources(folded) {
                hintln!("", "  {}", Path::new(&self.sources[i]).rebase(root).display());
            }
        }
    }
}

/// Resolve all targets on the executor
///
/// Each target is resolved independently, in its own task
pub fn resolve_all(generator: &Generator, targets: Vec<Target>) -> Result<Vec<TargetLayout>, Error> {
    let executor = Executor::new();
    let tasks = targets
        .into_iter()
        .map(|target| {
            let generator = generator.clone();
            executor.execute(move || TargetLayout::resolve(&generator, &target))
        })
        .collect::<Vec<_>>();

    let mut layouts = Vec::with_capacity(tasks.len());
    for task in tasks {
        let layout = task.wait().change_context(Error::Resolve)?;
        verboseln!(
            "resolved `{}`: {} object(s)",
            layout.name,
            layout.sources.len()
        );
        layouts.push(layout);
    }
    Ok(layouts)
}

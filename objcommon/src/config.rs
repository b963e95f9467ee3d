//! Generator configuration
//!
//! This is the `[generator]` section of `Objplace.toml`. It fixes everything
//! the resolver needs to know about the project format up front, so resolution
//! itself stays pure.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::objdir::{
    FeatureVersion, LegacyArch, ObjectDirectory, ObjectDirectoryResolver, ObjectsBaseDirectory,
    StandardObjectsBase, CONFIG_PLACEHOLDER, CURRENT_ARCH_MIN_VERSION, PROJECT_NAME_PLACEHOLDER,
};
use crate::Unused;

/// Config in the `[generator]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GeneratorConfig {
    /// Version of the project format being generated
    pub feature_version: u32,

    /// Architecture directory used by formats older than
    /// [`CURRENT_ARCH_MIN_VERSION`]
    pub legacy_arch: LegacyArch,

    /// Binary directory that object directories are placed under,
    /// relative to the config file
    pub binary_dir: String,

    /// Project name token passed through to the object directory
    pub project_name: String,

    /// Configuration token passed through to the object directory
    pub configuration: String,

    #[serde(flatten)]
    pub unused: Unused,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            feature_version: CURRENT_ARCH_MIN_VERSION,
            legacy_arch: LegacyArch::default(),
            binary_dir: ".".to_string(),
            project_name: PROJECT_NAME_PLACEHOLDER.to_string(),
            configuration: CONFIG_PLACEHOLDER.to_string(),
            unused: Unused::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create the object directory resolver for this configuration
    pub fn resolver(&self) -> ObjectDirectoryResolver {
        ObjectDirectoryResolver::new(self.legacy_arch)
    }

    /// Create a generator rooted at `root` (the directory containing the config file)
    pub fn generator(&self, root: impl AsRef<Path>) -> Generator {
        let root = root.as_ref();
        let binary_dir = match self.binary_dir.as_str() {
            "" | "." => root.to_path_buf(),
            dir => root.join(dir),
        };
        Generator {
            base: StandardObjectsBase::new(binary_dir.to_string_lossy().into_owned()),
            resolver: self.resolver(),
            feature_version: self.feature_version,
            project_name: self.project_name.clone(),
            configuration: self.configuration.clone(),
        }
    }
}

/// Generator with the standard object directory layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    base: StandardObjectsBase,
    resolver: ObjectDirectoryResolver,
    feature_version: u32,
    project_name: String,
    configuration: String,
}

impl Generator {
    /// Resolve the object directory of a target with the configured tokens
    pub fn object_directory(&self, target: &str) -> ObjectDirectory {
        self.resolver.resolve(
            self,
            target,
            &self.project_name,
            &self.configuration,
            self.feature_version(),
        )
    }
}

impl ObjectsBaseDirectory for Generator {
    fn objects_base_directory(&self, project_name: &str, config: &str, target: &str) -> String {
        self.base.objects_base_directory(project_name, config, target)
    }
}

impl FeatureVersion for Generator {
    fn feature_version(&self) -> u32 {
        self.feature_version
    }
}

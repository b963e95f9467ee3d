//! Config structures
use objcommon::prelude::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use objcommon::config::GeneratorConfig;
use objcommon::source::{SourceFile, Target};
use objcommon::Unused;
use serde::{Deserialize, Serialize};

use crate::cli::TopLevelOptions;
use crate::error::Error;

/// Name of the config file searched for
pub const CONFIG_FILE: &str = "Objplace.toml";

/// Config data read from Objplace.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The `[generator]` section
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// The `[target.<name>]` sections
    #[serde(default)]
    pub target: BTreeMap<String, TargetConfig>,

    #[serde(flatten)]
    pub unused: Unused,
}

error_context!(pub LoadConfig, |r| -> Error {
    errorln!("Failed", "Loading {}", CONFIG_FILE);
    r.change_context(Error::Config)
});

impl Config {
    /// Load a config from a file
    ///
    /// Prints formatted error message when failed
    pub fn from_path(path: impl AsRef<Path>) -> ResultIn<Self, LoadConfig> {
        let config = system::read_file(path)?;
        Ok(Self::parse(&config)?)
    }

    /// Parse config from TOML text and warn about unused keys
    pub fn parse(config: &str) -> Result<Self, toml::de::Error> {
        // print pretty toml error
        let config: Self = toml::from_str(config).map_err(|e| {
            for line in e.to_string().lines() {
                errorln!("Error", "{}", line);
            }
            e
        })?;
        config.check_unused();
        Ok(config)
    }

    fn check_unused(&self) {
        self.unused.check();
        self.generator.unused.check_prefixed("generator");
        for (name, target) in &self.target {
            target.unused.check_prefixed(&format!("target.{}", name));
        }
    }

    /// Get the targets to resolve, with source paths made absolute against `root`.
    ///
    /// If `only` is set, only that target is returned
    pub fn targets(&self, root: &Path, only: Option<&str>) -> Result<Vec<Target>, Error> {
        if let Some(name) = only {
            let target = self
                .target
                .get(name)
                .ok_or_else(|| report!(Error::NoTarget(name.to_string())))
                .attach_printable_lazy(|| {
                    let names = self.target.keys().cloned().collect::<Vec<_>>();
                    format!("available targets: {}", names.join(", "))
                })?;
            return Ok(vec![target.to_target(name, root)]);
        }
        Ok(self
            .target
            .iter()
            .map(|(name, target)| target.to_target(name, root))
            .collect())
    }
}

/// Config in a `[target.<name>]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetConfig {
    /// Source files in build order, relative to Objplace.toml
    #[serde(default)]
    pub sources: Vec<String>,

    #[serde(flatten)]
    pub unused: Unused,
}

impl TargetConfig {
    fn to_target(&self, name: &str, root: &Path) -> Target {
        let sources = self
            .sources
            .iter()
            .map(|source| SourceFile::new(root.join(source)))
            .collect();
        Target::new(name, sources)
    }
}

error_context!(pub FindProjectRoot, |r| -> Error {
    errorln!("Failed", "Cannot find {}", CONFIG_FILE);
    hintln!("Consider", "Run in a directory containing {}, or pass `-f`", CONFIG_FILE);
    r.change_context(Error::Config)
});

/// Find the config file and the project root from the top level options
///
/// Without `-f`, directories are searched upwards from `-C` for the config file
pub fn find_config(top: &TopLevelOptions) -> ResultIn<(PathBuf, PathBuf), FindProjectRoot> {
    let dir = Path::new(&top.dir).to_abs()?;
    if let Some(config) = &top.config {
        let config = dir.join(config).to_abs()?;
        let root = match config.parent() {
            Some(root) => root.to_path_buf(),
            None => dir,
        };
        return Ok((root, config));
    }
    let mut root: &Path = dir.as_path();
    while !root.join(CONFIG_FILE).exists() {
        root = root
            .parent()
            .ok_or(system::Error::FindProjectRoot(CONFIG_FILE))?;
    }
    verboseln!("found project root: {}", root.display());
    Ok((root.to_path_buf(), root.join(CONFIG_FILE)))
}

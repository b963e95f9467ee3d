//! Object directory resolution
//!
//! The object directory of a target is the generator's
//! `Objects-normal/` prefix followed by one architecture directory.
//! Newer project formats leave the architecture as a placeholder that the
//! build tool expands per architecture, so one project can build several
//! architectures from the same tree. Older formats need a fixed
//! architecture directory, which is selected by configuration.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::{report, Report};
use serde::{Deserialize, Serialize};

use crate::system::Error;

/// First project format version that supports the current architecture placeholder
pub const CURRENT_ARCH_MIN_VERSION: u32 = 21;

/// Placeholder for the project name, expanded by the build tool
pub const PROJECT_NAME_PLACEHOLDER: &str = "$(PROJECT_NAME)";

/// Placeholder for the per-configuration intermediate directory
pub const CONFIG_PLACEHOLDER: &str = "$(CONFIGURATION)$(EFFECTIVE_PLATFORM_NAME)";

/// Placeholder for the architecture being built
pub const CURRENT_ARCH_PLACEHOLDER: &str = "$(CURRENT_ARCH)";

/// Provides the directory prefix that architecture fragments are appended to
pub trait ObjectsBaseDirectory {
    /// Get the `Objects-normal/` directory of a target, ending with `/`
    fn objects_base_directory(&self, project_name: &str, config: &str, target: &str) -> String;
}

/// Provides the version of the project format being generated
pub trait FeatureVersion {
    fn feature_version(&self) -> u32;
}

/// Standard object directory layout under a binary directory:
/// `<root>/<project>.build/<config>/<target>.build/Objects-normal/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardObjectsBase {
    root: String,
}

impl StandardObjectsBase {
    pub fn new(root: impl Into<String>) -> Self {
        let mut root = root.into();
        while root.len() > 1 && root.ends_with('/') {
            root.pop();
        }
        Self { root }
    }
}

impl ObjectsBaseDirectory for StandardObjectsBase {
    fn objects_base_directory(&self, project_name: &str, config: &str, target: &str) -> String {
        // an empty root keeps the layout relative
        let separator = if self.root.is_empty() || self.root.ends_with('/') {
            ""
        } else {
            "/"
        };
        format!(
            "{}{}{}.build/{}/{}.build/Objects-normal/",
            self.root, separator, project_name, config, target
        )
    }
}

/// Architectures supported by project formats before the
/// current architecture placeholder existed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LegacyArch {
    Ppc,
    #[default]
    I386,
}

impl LegacyArch {
    pub const ALL: [LegacyArch; 2] = [LegacyArch::Ppc, LegacyArch::I386];

    /// Name of the architecture directory
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Ppc => "ppc",
            Self::I386 => "i386",
        }
    }
}

impl Display for LegacyArch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for LegacyArch {
    type Err = Report<Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|arch| arch.dir_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| report!(Error::UnknownArch(s.to_string())))
    }
}

impl TryFrom<String> for LegacyArch {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map_err(|_| {
            let expected = Self::ALL.map(|x| x.dir_name()).join("`, `");
            format!("unknown legacy architecture `{}`, expected one of `{}`", value, expected)
        })
    }
}

impl From<LegacyArch> for String {
    fn from(value: LegacyArch) -> Self {
        value.dir_name().to_string()
    }
}

/// The architecture directory at the end of an object directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchFragment {
    /// Left for the build tool to expand, one directory per architecture built
    Current,
    /// A fixed architecture directory
    Legacy(LegacyArch),
}

impl Display for ArchFragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Current => f.write_str(CURRENT_ARCH_PLACEHOLDER),
            Self::Legacy(arch) => f.write_str(arch.dir_name()),
        }
    }
}

/// Object directory of a target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectDirectory {
    prefix: String,
    arch: ArchFragment,
}

impl ObjectDirectory {
    /// The `Objects-normal/` prefix, without the architecture
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn arch(&self) -> ArchFragment {
        self.arch
    }

    /// Expand the architecture placeholder with a concrete architecture name.
    ///
    /// Directories with a fixed architecture are returned unchanged.
    pub fn with_arch(&self, arch: &str) -> String {
        match self.arch {
            ArchFragment::Current => format!("{}{}/", self.prefix, arch),
            ArchFragment::Legacy(_) => self.to_string(),
        }
    }
}

impl Display for ObjectDirectory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}/", self.prefix, self.arch)
    }
}

impl Serialize for ObjectDirectory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Resolves the object directory of targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectDirectoryResolver {
    legacy_arch: LegacyArch,
}

impl ObjectDirectoryResolver {
    /// Create a resolver that uses `legacy_arch` for project
    /// formats without the current architecture placeholder
    pub fn new(legacy_arch: LegacyArch) -> Self {
        Self { legacy_arch }
    }

    /// Resolve the object directory of a target.
    ///
    /// The placeholders are passed through to the base directory as is.
    pub fn resolve<B>(
        &self,
        base: &B,
        target: &str,
        project_name: &str,
        config: &str,
        feature_version: u32,
    ) -> ObjectDirectory
    where
        B: ObjectsBaseDirectory + ?Sized,
    {
        let prefix = base.objects_base_directory(project_name, config, target);
        let arch = if feature_version >= CURRENT_ARCH_MIN_VERSION {
            ArchFragment::Current
        } else {
            ArchFragment::Legacy(self.legacy_arch)
        };
        ObjectDirectory { prefix, arch }
    }

    /// Resolve with the standard placeholders and the generator's own feature version
    pub fn resolve_default<G>(&self, generator: &G, target: &str) -> ObjectDirectory
    where
        G: ObjectsBaseDirectory + FeatureVersion + ?Sized,
    {
        self.resolve(
            generator,
            target,
            PROJECT_NAME_PLACEHOLDER,
            CONFIG_PLACEHOLDER,
            generator.feature_version(),
        )
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    struct Generator {
        base: StandardObjectsBase,
        version: u32,
    }

    impl ObjectsBaseDirectory for Generator {
        fn objects_base_directory(&self, project_name: &str, config: &str, target: &str) -> String {
            self.base.objects_base_directory(project_name, config, target)
        }
    }

    impl FeatureVersion for Generator {
        fn feature_version(&self) -> u32 {
            self.version
        }
    }

    fn base() -> StandardObjectsBase {
        StandardObjectsBase::new("/proj/build")
    }

    #[test]
    fn test_standard_base() {
        let dir = base().objects_base_directory("$(PROJECT_NAME)", "Debug", "app");
        assert_eq!(dir, "/proj/build/$(PROJECT_NAME).build/Debug/app.build/Objects-normal/");
    }

    #[test]
    fn test_standard_base_trailing_slash() {
        let dir = StandardObjectsBase::new("/proj/build//").objects_base_directory("p", "c", "t");
        assert_eq!(dir, "/proj/build/p.build/c/t.build/Objects-normal/");
    }

    #[test]
    fn test_standard_base_empty_and_filesystem_root() {
        let dir = StandardObjectsBase::new("").objects_base_directory("p", "c", "t");
        assert_eq!(dir, "p.build/c/t.build/Objects-normal/");
        let dir = StandardObjectsBase::new("/").objects_base_directory("p", "c", "t");
        assert_eq!(dir, "/p.build/c/t.build/Objects-normal/");
    }

    #[test]
    fn test_current_arch() {
        let resolver = ObjectDirectoryResolver::new(LegacyArch::Ppc);
        let dir = resolver.resolve(&base(), "app", "pp", "cp", 21);
        assert_eq!(dir.arch(), ArchFragment::Current);
        assert_eq!(
            dir.to_string(),
            "/proj/build/pp.build/cp/app.build/Objects-normal/$(CURRENT_ARCH)/"
        );
        assert!(dir.to_string().ends_with("$(CURRENT_ARCH)/"));
    }

    #[test]
    fn test_future_version_uses_current_arch() {
        let resolver = ObjectDirectoryResolver::default();
        let dir = resolver.resolve(&base(), "app", "pp", "cp", 46);
        assert_eq!(dir.arch(), ArchFragment::Current);
    }

    #[test]
    fn test_legacy_arch() {
        for arch in LegacyArch::ALL {
            let resolver = ObjectDirectoryResolver::new(arch);
            let dir = resolver.resolve(&base(), "app", "pp", "cp", 20);
            assert_eq!(dir.arch(), ArchFragment::Legacy(arch));
            let s = dir.to_string();
            assert!(s.ends_with(&format!("/{}/", arch.dir_name())), "{}", s);
            assert!(!s.contains(CURRENT_ARCH_PLACEHOLDER), "{}", s);
        }
    }

    #[test]
    fn test_with_arch() {
        let resolver = ObjectDirectoryResolver::default();
        let dir = resolver.resolve(&base(), "app", "pp", "cp", 21);
        assert_eq!(
            dir.with_arch("arm64"),
            "/proj/build/pp.build/cp/app.build/Objects-normal/arm64/"
        );
        let legacy = resolver.resolve(&base(), "app", "pp", "cp", 12);
        assert_eq!(legacy.with_arch("arm64"), legacy.to_string());
    }

    #[test]
    fn test_resolve_default() {
        let generator = Generator {
            base: base(),
            version: 21,
        };
        let dir = ObjectDirectoryResolver::default().resolve_default(&generator, "lib");
        assert_eq!(
            dir.prefix(),
            "/proj/build/$(PROJECT_NAME).build/$(CONFIGURATION)$(EFFECTIVE_PLATFORM_NAME)/lib.build/Objects-normal/"
        );
        assert_eq!(dir.arch(), ArchFragment::Current);
    }

    #[test]
    fn test_parse_legacy_arch() {
        assert_eq!("ppc".parse::<LegacyArch>().unwrap(), LegacyArch::Ppc);
        assert_eq!("I386".parse::<LegacyArch>().unwrap(), LegacyArch::I386);
        assert!("x86_64".parse::<LegacyArch>().is_err());
    }

    proptest! {
        #[test]
        fn test_resolve_is_deterministic(
            target in "[a-zA-Z_]{1,8}",
            version in 0u32..64,
            arch in prop::sample::select(LegacyArch::ALL.to_vec()),
        ) {
            let resolver = ObjectDirectoryResolver::new(arch);
            let first = resolver.resolve(&base(), &target, PROJECT_NAME_PLACEHOLDER, CONFIG_PLACEHOLDER, version);
            let second = resolver.resolve(&base(), &target, PROJECT_NAME_PLACEHOLDER, CONFIG_PLACEHOLDER, version);
            prop_assert_eq!(first.to_string(), second.to_string());
            prop_assert_eq!(
                first.arch() == ArchFragment::Current,
                version >= CURRENT_ARCH_MIN_VERSION
            );
        }
    }
}

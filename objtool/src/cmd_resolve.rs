use objcommon::prelude::*;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use derive_more::derive::Deref;

use crate::cli::{CommonOptions, TopLevelOptions};
use crate::config::{self, Config};
use crate::error::Error;
use crate::layout::{self, TargetLayout};

/// CLI Options for the resolve command
#[derive(Debug, Clone, PartialEq, Args, Deref)]
pub struct Options {
    /// Only resolve this target
    #[clap(short, long)]
    pub target: Option<String>,

    /// Print the layout as JSON
    #[clap(short, long)]
    pub json: bool,

    /// Write the output to a file instead of stdout
    #[clap(short, long)]
    pub output: Option<String>,

    /// Common options
    #[deref]
    #[clap(flatten)]
    pub options: CommonOptions,
}

/// Project loaded from the config file
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    pub fn load(top: &TopLevelOptions) -> Result<Self, Error> {
        let (root, config_path) = config::find_config(top).into_report()?;
        verboseln!("loading '{}'", config_path.display());
        let loaded = Config::from_path(&config_path)
            .attach_printable(format!("config file: {}", config_path.display()))?;
        Ok(Self {
            root,
            config: loaded,
        })
    }

    /// Resolve the selected targets
    pub fn resolve(&self, only: Option<&str>) -> Result<Vec<TargetLayout>, Error> {
        let generator = self.config.generator.generator(&self.root);
        let targets = self.config.targets(&self.root, only)?;
        layout::resolve_all(&generator, targets)
    }
}

pub fn run(top: &TopLevelOptions, options: &Options) -> Result<(), Error> {
    let start_time = Instant::now();
    let project = Project::load(top)?;
    let layouts = project.resolve(options.target.as_deref())?;

    for layout in &layouts {
        if layout.has_collisions() {
            layout.report_collisions(&project.root);
        }
    }

    let output = if options.json {
        let mut s = serde_json::to_string_pretty(&layouts).change_context(Error::Output)?;
        s.push('\n');
        s
    } else {
        format_text(&layouts, &project.root)
    };

    match &options.output {
        Some(path) => {
            system::write_file(path, output).change_context(Error::Output)?;
            infoln!("Wrote", "{}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .change_context(Error::Output)?;
        }
    }

    infoln!(
        "Finished",
        "{} target(s) in {:.2}s",
        layouts.len(),
        start_time.elapsed().as_secs_f32()
    );
    Ok(())
}

/// Format layouts as plain text, with sources relative to the project root
fn format_text(layouts: &[TargetLayout], root: &Path) -> String {
    let mut out = String::new();
    for layout in layouts {
        out.push_str(&format!("{}: {}\n", layout.name, layout.object_dir));
        for (source, object) in layout.entries() {
            let source = Path::new(source).rebase(root);
            out.push_str(&format!("  {} -> {}\n", source.display(), object));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use objcommon::config::GeneratorConfig;
    use objcommon::source::{SourceFile, Target};

    #[test]
    fn test_format_text() {
        let generator = GeneratorConfig::default().generator("/proj");
        let target = Target::new(
            "app",
            vec![SourceFile::new("/proj/src/Foo.cpp"), SourceFile::new("/proj/src/foo.c")],
        );
        let layout = TargetLayout::resolve(&generator, &target);
        let text = format_text(&[layout], Path::new("/proj"));
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3, "{}", text);
        assert!(lines[0].starts_with("app: /proj/"), "{}", text);
        assert_eq!(lines[1], "  src/Foo.cpp -> Foo.o");
        assert_eq!(lines[2], "  src/foo.c -> foo.o");
    }
}

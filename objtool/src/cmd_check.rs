use objcommon::prelude::*;

use clap::Args;
use derive_more::derive::Deref;

use crate::cli::{CommonOptions, TopLevelOptions};
use crate::cmd_resolve::Project;
use crate::error::Error;
use crate::layout::TargetLayout;

/// CLI Options for the check command
#[derive(Debug, Clone, PartialEq, Args, Deref)]
pub struct Options {
    /// Only check this target
    #[clap(short, long)]
    pub target: Option<String>,

    /// Common options
    #[deref]
    #[clap(flatten)]
    pub options: CommonOptions,
}

pub fn run(top: &TopLevelOptions, options: &Options) -> Result<(), Error> {
    let project = Project::load(top)?;
    let layouts = project.resolve(options.target.as_deref())?;
    for layout in &layouts {
        if layout.has_collisions() {
            layout.report_collisions(&project.root);
        } else {
            verboseln!("`{}` has no collisions", layout.name);
        }
    }
    check_layouts(&layouts)?;
    infoln!("Checked", "{} target(s)", layouts.len());
    Ok(())
}

/// Fail if any layout has object name collisions
fn check_layouts(layouts: &[TargetLayout]) -> Result<(), Error> {
    let failed = layouts.iter().filter(|x| x.has_collisions()).count();
    if failed == 0 {
        return Ok(());
    }
    errorln!("Failed", "{} target(s) have colliding object names", failed);
    hintln!(
        "Consider",
        "Rename one of the sources, since objects are compared case-insensitively"
    );
    Err(report!(Error::Collision(failed)))
}

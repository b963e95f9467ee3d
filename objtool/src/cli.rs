use objcommon::print;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Object file placement and naming for generated projects
#[derive(Debug, Clone, PartialEq, Parser)]
#[clap(bin_name = "objplace")]
pub struct Cli {
    /// Top level options
    #[clap(flatten)]
    pub top: TopLevelOptions,

    /// Subcommand
    #[clap(subcommand)]
    pub command: Command,

    /// Common options
    #[clap(flatten)]
    pub options: CommonOptions,
}

/// Top level options
#[derive(Debug, Clone, PartialEq, Args)]
pub struct TopLevelOptions {
    /// Change the directory to run in
    #[clap(short('C'), long, default_value = ".")]
    pub dir: String,

    /// Use this config file instead of searching for Objplace.toml
    #[clap(short('f'), long)]
    pub config: Option<String>,
}

impl Cli {
    pub fn apply_print_options(&self) {
        if self.is_verbose_on() {
            print::verbose_on();
        }

        match (&self.command.color, &self.options.color) {
            (Some(ColorOption::Never), _) | (None, Some(ColorOption::Never)) => {
                print::color_off();
            }
            (Some(ColorOption::Always), _) | (None, Some(ColorOption::Always)) => {
                // color is already on by default
            }
            _ => print::auto_color(),
        }
    }

    #[inline]
    pub fn is_verbose_on(&self) -> bool {
        self.options.verbose || self.command.verbose
    }

    #[inline]
    pub fn is_trace_on(&self) -> bool {
        self.options.trace || self.command.trace
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Print the object directory and object names of each target
    Resolve(crate::cmd_resolve::Options),
    /// Fail if any target has sources with colliding object names
    Check(crate::cmd_check::Options),
}

impl std::ops::Deref for Command {
    type Target = CommonOptions;

    fn deref(&self) -> &Self::Target {
        match self {
            Command::Resolve(x) => x,
            Command::Check(x) => x,
        }
    }
}

/// Common options for all commands
#[derive(Debug, Clone, PartialEq, Args)]
pub struct CommonOptions {
    /// Enable verbose output
    #[clap(short = 'V', long)]
    pub verbose: bool,

    /// Enable error trace
    #[clap(short = 'T', long)]
    pub trace: bool,

    /// Set output color option
    ///
    /// By default, color is enabled when stderr is terminal
    #[clap(long)]
    pub color: Option<ColorOption>,
}

/// Color options for output
#[derive(Debug, Clone, PartialEq, ValueEnum)]
pub enum ColorOption {
    Always,
    Never,
}

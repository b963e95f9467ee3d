use std::process::ExitCode;

use clap::Parser;
use error_stack::Result;

use objcommon::errorln;

mod cli;
mod cmd_check;
mod cmd_resolve;
mod config;
mod error;
mod layout;

use cli::{Cli, Command};
use error::Error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.apply_print_options();
    if let Err(e) = main_internal(&cli) {
        if cli.is_trace_on() {
            eprintln!("error: {:?}", e);
        } else {
            errorln!("Error", "{}", e.current_context());
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main_internal(cli: &Cli) -> Result<(), Error> {
    match &cli.command {
        Command::Resolve(options) => cmd_resolve::run(&cli.top, options),
        Command::Check(options) => cmd_check::run(&cli.top, options),
    }
}

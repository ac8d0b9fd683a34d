//! lljail - run a command under a Landlock filesystem ruleset

mod cli;
mod commands;
mod launcher;
mod logging;
mod runner;

use cli::Action;
use commands::{check_requirements, print_usage, print_version};
use console::style;
use lljail_core::LljailError;
use runner::run_jailed;

fn main() {
    let action = match cli::parse(std::env::args_os().skip(1)) {
        Ok(action) => action,
        Err(e) => fail(e.into()),
    };

    match action {
        Action::Help => print_usage(),
        Action::Version => print_version(),
        Action::Check => {
            if !check_requirements() {
                std::process::exit(1);
            }
        }
        Action::Run(invocation) => {
            logging::init_logger(invocation.verbose);
            if let Err(e) = run_jailed(invocation) {
                fail(e);
            }
        }
    }
}

fn fail(e: LljailError) -> ! {
    eprintln!("{} {}", style("error:").red().bold(), e);
    std::process::exit(1);
}

use lljail_core::Result;
use lljail_landlock::{install, Kernel};
use log::info;
use std::convert::Infallible;

use crate::cli::Invocation;
use crate::launcher::launch;

/// Build and enforce the ruleset, then become the target command.
///
/// Only returns on failure; on success the process image is replaced.
pub fn run_jailed(invocation: Invocation) -> Result<Infallible> {
    info!(
        "Jailing {:?} with {} directive(s)",
        invocation.command,
        invocation.directives.len()
    );

    let bound = install(&Kernel, &Kernel, &invocation.directives)?;

    Err(launch(bound, &invocation.command, std::env::vars_os()))
}

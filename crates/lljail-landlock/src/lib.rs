//! lljail-landlock: Unprivileged filesystem self-restriction via Landlock LSM (Linux 5.13+)
//!
//! Builds a ruleset from path directives, sets `no_new_privs`, and binds the
//! ruleset to the calling process. The binding is irreversible and is
//! inherited across `execve`.

pub mod access;
pub mod kernel;
pub mod rule;
pub mod ruleset;
pub mod sequencer;
pub mod service;

#[cfg(test)]
mod testing;

pub use access::{effective, AccessFs, GrantClass, HANDLED_ACCESS};
pub use kernel::Kernel;
pub use rule::{add_path_rule, Directive, PathRule};
pub use ruleset::{Ruleset, RulesetManager};
pub use sequencer::{NoNewPrivs, PolicyBound, RestrictionSequencer};
pub use service::{LandlockService, PrivilegeControl};

use lljail_core::Result;

/// Create a ruleset handling [`HANDLED_ACCESS`], attach `directives`, and
/// enforce it on the calling process.
///
/// WARNING: on success this is irreversible for the current process.
pub fn install<S, P>(service: &S, privileges: &P, directives: &[Directive]) -> Result<PolicyBound>
where
    S: LandlockService,
    P: PrivilegeControl,
{
    let manager = RulesetManager::new(service);
    let mut ruleset = manager.create(HANDLED_ACCESS)?;
    manager.populate(&mut ruleset, directives)?;
    RestrictionSequencer::new(service, privileges).restrict(ruleset)
}

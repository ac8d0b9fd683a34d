//! Capability-service seams between the restriction protocol and the kernel
//!
//! [`LandlockService`] covers the three Landlock operations, and
//! [`PrivilegeControl`] covers `no_new_privs`. The protocol code in
//! [`crate::ruleset`] and [`crate::sequencer`] only talks to these traits;
//! [`crate::kernel::Kernel`] is the real implementation.

use crate::access::AccessFs;
use std::io;
use std::os::fd::BorrowedFd;

/// The kernel access-control primitive, as three calls.
pub trait LandlockService {
    /// Live ruleset object; dropping it releases the kernel handle
    type Handle;

    /// Create a ruleset that handles exactly `handled`.
    fn create_ruleset(&self, handled: AccessFs) -> io::Result<Self::Handle>;

    /// Allow `allowed` beneath the filesystem node `parent` refers to.
    fn add_path_beneath(
        &self,
        ruleset: &Self::Handle,
        parent: BorrowedFd<'_>,
        allowed: AccessFs,
    ) -> io::Result<()>;

    /// Enforce `ruleset` on the calling thread and its future children.
    fn restrict_self(&self, ruleset: &Self::Handle) -> io::Result<()>;
}

/// Process-wide privilege switch that must be thrown before binding a ruleset
pub trait PrivilegeControl {
    /// Forbid this process and its descendants from gaining privileges
    /// through execve (set-user-ID, file capabilities). Irreversible.
    fn set_no_new_privs(&self) -> io::Result<()>;
}

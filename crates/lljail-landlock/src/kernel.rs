//! Raw Landlock syscalls
//!
//! Requires Linux 5.13+ with Landlock in the active LSM list. There is no
//! glibc wrapper for these calls, so they go through `libc::syscall`.

use crate::access::AccessFs;
use crate::service::{LandlockService, PrivilegeControl};
use std::io;
use std::os::fd::{AsRawFd, BorrowedFd, FromRawFd, OwnedFd, RawFd};

const LANDLOCK_RULE_PATH_BENEATH: u32 = 1;

// Kernel structures for landlock syscalls
#[repr(C)]
struct LandlockRulesetAttr {
    handled_access_fs: u64,
}

#[repr(C, packed)]
struct LandlockPathBeneathAttr {
    allowed_access: u64,
    parent_fd: i32,
}

/// The running kernel
#[derive(Debug, Clone, Copy, Default)]
pub struct Kernel;

impl LandlockService for Kernel {
    type Handle = OwnedFd;

    fn create_ruleset(&self, handled: AccessFs) -> io::Result<OwnedFd> {
        let attr = LandlockRulesetAttr {
            handled_access_fs: handled.bits(),
        };

        let ret = unsafe {
            libc::syscall(
                libc::SYS_landlock_create_ruleset,
                &attr as *const LandlockRulesetAttr,
                std::mem::size_of::<LandlockRulesetAttr>(),
                0u32,
            )
        };

        if ret < 0 {
            return Err(io::Error::last_os_error());
        }

        // SAFETY: a non-negative return is a fresh O_CLOEXEC descriptor we now own
        Ok(unsafe { OwnedFd::from_raw_fd(ret as RawFd) })
    }

    fn add_path_beneath(
        &self,
        ruleset: &OwnedFd,
        parent: BorrowedFd<'_>,
        allowed: AccessFs,
    ) -> io::Result<()> {
        let attr = LandlockPathBeneathAttr {
            allowed_access: allowed.bits(),
            parent_fd: parent.as_raw_fd(),
        };

        let ret = unsafe {
            libc::syscall(
                libc::SYS_landlock_add_rule,
                ruleset.as_raw_fd(),
                LANDLOCK_RULE_PATH_BENEATH,
                &attr as *const LandlockPathBeneathAttr,
                0u32,
            )
        };

        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn restrict_self(&self, ruleset: &OwnedFd) -> io::Result<()> {
        let ret = unsafe {
            libc::syscall(libc::SYS_landlock_restrict_self, ruleset.as_raw_fd(), 0u32)
        };

        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl PrivilegeControl for Kernel {
    fn set_no_new_privs(&self) -> io::Result<()> {
        if unsafe { libc::prctl(libc::PR_SET_NO_NEW_PRIVS, 1, 0, 0, 0) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

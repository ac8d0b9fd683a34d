//! Runtime detection of Landlock support
//!
//! Queries the running kernel for the Landlock ABI version and the current
//! `no_new_privs` state of this process, for the `--check` report and for
//! diagnostics before a ruleset is created.

use log::debug;

/// `landlock_create_ruleset` flag asking for the highest supported ABI
const LANDLOCK_CREATE_RULESET_VERSION: u32 = 1;

/// Outcome of the Landlock ABI version query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandlockSupport {
    /// Landlock is usable; the kernel speaks this ABI version
    Available { abi: u32 },
    /// Built into the kernel but not in the active LSM list
    Disabled,
    /// The kernel has no Landlock syscalls at all
    Unsupported,
    /// Any other errno from the version query
    Unknown { errno: i32 },
}

impl LandlockSupport {
    pub fn is_usable(&self) -> bool {
        matches!(self, LandlockSupport::Available { .. })
    }

    pub fn from_errno(errno: i32) -> Self {
        match errno {
            libc::ENOSYS => LandlockSupport::Unsupported,
            libc::EOPNOTSUPP => LandlockSupport::Disabled,
            errno => LandlockSupport::Unknown { errno },
        }
    }

    pub fn describe(&self) -> String {
        match self {
            LandlockSupport::Available { abi } => format!("Landlock available (ABI v{})", abi),
            LandlockSupport::Disabled => {
                "Landlock is not enabled in your kernel (add it to the lsm= boot parameter)"
                    .to_string()
            }
            LandlockSupport::Unsupported => {
                "Landlock is not supported by your kernel (requires Linux 5.13+)".to_string()
            }
            LandlockSupport::Unknown { errno } => format!(
                "Landlock status unknown: {}",
                std::io::Error::from_raw_os_error(*errno)
            ),
        }
    }
}

/// Detected system capabilities relevant to self-restriction
#[derive(Debug, Clone)]
pub struct SystemCapabilities {
    pub landlock: LandlockSupport,
    /// `no_new_privs` is already set on this process
    pub no_new_privs: bool,
    /// Effective uid of this process
    pub euid: u32,
}

impl SystemCapabilities {
    pub fn detect() -> Self {
        let caps = Self {
            landlock: detect_landlock(),
            no_new_privs: detect_no_new_privs(),
            euid: unsafe { libc::geteuid() },
        };
        debug!("Detected capabilities: {:?}", caps);
        caps
    }

    /// Get a human-readable summary of capabilities
    pub fn summary(&self) -> String {
        let check = |ok: bool| if ok { "[ok]" } else { "[--]" };

        [
            format!(
                "{} {}",
                check(self.landlock.is_usable()),
                self.landlock.describe()
            ),
            format!(
                "{} no_new_privs {}",
                check(true),
                if self.no_new_privs {
                    "already set (inherited)"
                } else {
                    "not set yet (lljail sets it before enforcing)"
                }
            ),
            format!(
                "{} Effective uid {}{}",
                check(true),
                self.euid,
                if self.euid == 0 { " (root)" } else { "" }
            ),
        ]
        .join("\n")
    }
}

fn detect_landlock() -> LandlockSupport {
    // With NULL attrs and the VERSION flag the return value is the ABI
    // version, not a file descriptor.
    let ret = unsafe {
        libc::syscall(
            libc::SYS_landlock_create_ruleset,
            std::ptr::null::<libc::c_void>(),
            0usize,
            LANDLOCK_CREATE_RULESET_VERSION,
        )
    };

    if ret >= 0 {
        return LandlockSupport::Available { abi: ret as u32 };
    }

    let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
    LandlockSupport::from_errno(errno)
}

fn detect_no_new_privs() -> bool {
    let ret = unsafe { libc::prctl(libc::PR_GET_NO_NEW_PRIVS, 0, 0, 0, 0) };
    ret == 1
}

//! Error types for ruleset construction and self-restriction

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for lljail operations
pub type Result<T> = std::result::Result<T, LljailError>;

/// Errors that can occur while building, installing or handing off a jail.
///
/// Every variant is fatal: the caller reports it and exits without running
/// the target command.
#[derive(Error, Debug)]
pub enum LljailError {
    #[error("Landlock is not supported by your kernel")]
    UnsupportedFeature,

    #[error("Landlock is not enabled in your kernel")]
    DisabledFeature,

    #[error("Unknown error creating Landlock ruleset: {}", describe_errno(.errno))]
    RulesetCreation { errno: i32 },

    #[error("Cannot open {} for a ruleset rule: {source}", .path.display())]
    PathUnresolvable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to update ruleset with {}: {source}", .path.display())]
    RuleRejected {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to restrict privileges: {0}")]
    PrivilegeDropFailed(#[source] io::Error),

    #[error("Failed to enforce ruleset: {0}")]
    PolicyBindFailed(#[source] io::Error),

    #[error(
        "Failed to execute \"{}\": {source}\nHint: access to the binary, the interpreter or shared libraries may be denied.",
        .program.to_string_lossy()
    )]
    LaunchFailed {
        program: OsString,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Usage(#[from] UsageError),
}

/// Command-line syntax errors, detected before any kernel call is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("Needs -- before command")]
    MissingSeparator,

    #[error("Unknown flag {}. Use -r, -rw or -w.", .0.to_string_lossy())]
    UnknownFlag(OsString),

    #[error("Missing filename after flag {0}")]
    MissingPath(String),

    #[error("Missing command after --")]
    MissingCommand,
}

impl LljailError {
    /// Raw OS error behind this failure, if there is one
    pub fn errno(&self) -> Option<i32> {
        match self {
            LljailError::UnsupportedFeature => Some(libc::ENOSYS),
            LljailError::DisabledFeature => Some(libc::EOPNOTSUPP),
            LljailError::RulesetCreation { errno } => Some(*errno),
            LljailError::PathUnresolvable { source, .. }
            | LljailError::RuleRejected { source, .. }
            | LljailError::PrivilegeDropFailed(source)
            | LljailError::PolicyBindFailed(source)
            | LljailError::LaunchFailed { source, .. } => source.raw_os_error(),
            LljailError::Usage(_) => None,
        }
    }

    /// Classify a failed `landlock_create_ruleset` call.
    ///
    /// ENOSYS and EOPNOTSUPP are kept apart because the fix differs: the
    /// first needs a newer kernel, the second a boot parameter (`lsm=`).
    pub fn from_create_errno(errno: i32) -> Self {
        match errno {
            libc::ENOSYS => LljailError::UnsupportedFeature,
            libc::EOPNOTSUPP => LljailError::DisabledFeature,
            errno => LljailError::RulesetCreation { errno },
        }
    }
}

fn describe_errno(errno: &i32) -> io::Error {
    io::Error::from_raw_os_error(*errno)
}

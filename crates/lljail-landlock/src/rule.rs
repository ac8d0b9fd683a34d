//! Path-beneath rules built from command-line directives

use crate::access::{effective, AccessFs, GrantClass};
use crate::ruleset::Ruleset;
use crate::service::LandlockService;
use lljail_core::{LljailError, Result};
use log::debug;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

/// One `-r`/`-rw`/`-w` [`file`] PATH directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub class: GrantClass,
    pub file_only: bool,
    pub path: PathBuf,
}

impl Directive {
    pub fn new(class: GrantClass, file_only: bool, path: impl Into<PathBuf>) -> Self {
        Self {
            class,
            file_only,
            path: path.into(),
        }
    }

    /// Rights this directive grants beneath its path
    pub fn allowed(&self) -> AccessFs {
        effective(self.class, self.file_only)
    }
}

/// A rule that has been accepted into a ruleset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRule {
    pub path: PathBuf,
    pub allowed: AccessFs,
}

/// Open `path` for identification only.
///
/// `O_PATH` pins the node without granting read or write on its content,
/// so renaming a parent directory later cannot redirect the rule.
fn open_path(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_PATH | libc::O_CLOEXEC)
        .open(path)
}

/// Attach one path-beneath rule to `ruleset`.
///
/// The path descriptor lives only for the duration of this call and is
/// closed on every return path.
pub fn add_path_rule<S: LandlockService>(
    service: &S,
    ruleset: &mut Ruleset<S::Handle>,
    path: &Path,
    allowed: AccessFs,
) -> Result<()> {
    let parent = open_path(path).map_err(|source| LljailError::PathUnresolvable {
        path: path.to_path_buf(),
        source,
    })?;

    service
        .add_path_beneath(ruleset.handle(), parent.as_fd(), allowed)
        .map_err(|source| LljailError::RuleRejected {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "Allowed {} beneath {}",
        allowed.names().join(","),
        path.display()
    );
    ruleset.record(PathRule {
        path: path.to_path_buf(),
        allowed,
    });
    Ok(())
}

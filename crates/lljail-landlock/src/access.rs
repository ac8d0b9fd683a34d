//! Filesystem access rights understood by Landlock ABI v1
//!
//! Rights are grouped the way the command line grants them: a directive
//! asks for "roughly read", "roughly write" or both, and the `file`
//! modifier narrows that to the rights that make sense on a single file.

use bitflags::bitflags;

bitflags! {
    /// One bit per `LANDLOCK_ACCESS_FS_*` right.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFs: u64 {
        const EXECUTE     = 1;
        const WRITE_FILE  = 1 << 1;
        const READ_FILE   = 1 << 2;
        const READ_DIR    = 1 << 3;
        const REMOVE_DIR  = 1 << 4;
        const REMOVE_FILE = 1 << 5;
        const MAKE_CHAR   = 1 << 6;
        const MAKE_DIR    = 1 << 7;
        const MAKE_REG    = 1 << 8;
        const MAKE_SOCK   = 1 << 9;
        const MAKE_FIFO   = 1 << 10;
        const MAKE_BLOCK  = 1 << 11;
        const MAKE_SYM    = 1 << 12;
    }
}

impl AccessFs {
    /// Rights granted by `-r`
    pub const ROUGHLY_READ: Self = Self::EXECUTE.union(Self::READ_FILE).union(Self::READ_DIR);

    /// Rights granted by `-w`
    pub const ROUGHLY_WRITE: Self = Self::WRITE_FILE
        .union(Self::REMOVE_DIR)
        .union(Self::REMOVE_FILE)
        .union(Self::MAKE_CHAR)
        .union(Self::MAKE_DIR)
        .union(Self::MAKE_REG)
        .union(Self::MAKE_SOCK)
        .union(Self::MAKE_FIFO)
        .union(Self::MAKE_BLOCK)
        .union(Self::MAKE_SYM);

    /// The only rights the kernel accepts on a rule whose target is not a directory
    pub const FILE_ONLY: Self = Self::EXECUTE.union(Self::WRITE_FILE).union(Self::READ_FILE);

    /// Lower-case names of the set rights, for log lines
    pub fn names(&self) -> Vec<String> {
        self.iter_names()
            .map(|(name, _)| name.to_lowercase().replace('_', "-"))
            .collect()
    }
}

/// Every right a ruleset declares it handles; anything outside is left unrestricted
pub const HANDLED_ACCESS: AccessFs = AccessFs::ROUGHLY_READ.union(AccessFs::ROUGHLY_WRITE);

/// Coarse grant requested by a command-line flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantClass {
    /// `-r`
    Read,
    /// `-rw`
    ReadWrite,
    /// `-w`
    Write,
}

impl GrantClass {
    /// Parse the flag token that introduces a directive
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "-r" => Some(GrantClass::Read),
            "-rw" => Some(GrantClass::ReadWrite),
            "-w" => Some(GrantClass::Write),
            _ => None,
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            GrantClass::Read => "-r",
            GrantClass::ReadWrite => "-rw",
            GrantClass::Write => "-w",
        }
    }

    pub fn access(&self) -> AccessFs {
        match self {
            GrantClass::Read => AccessFs::ROUGHLY_READ,
            GrantClass::ReadWrite => AccessFs::ROUGHLY_READ | AccessFs::ROUGHLY_WRITE,
            GrantClass::Write => AccessFs::ROUGHLY_WRITE,
        }
    }
}

/// Rights a directive actually grants.
///
/// `file_only` only ever removes bits: the result is a subset of `class.access()`.
pub fn effective(class: GrantClass, file_only: bool) -> AccessFs {
    let access = class.access();
    if file_only {
        access & AccessFs::FILE_ONLY
    } else {
        access
    }
}

//! Process image replacement

use lljail_core::LljailError;
use lljail_landlock::PolicyBound;
use log::debug;
use nix::unistd::execvpe;
use std::ffi::{CString, OsStr, OsString};
use std::io;
use std::os::unix::ffi::OsStrExt;

/// Replace this process with `command`, searching `PATH` like a shell.
///
/// Requires a [`PolicyBound`], so nothing runs before the ruleset is
/// enforced. Returns only on failure.
pub fn launch<I>(bound: PolicyBound, command: &[OsString], env: I) -> LljailError
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    debug!("Executing {:?} under {} rule(s)", command, bound.rules());
    exec(command, env)
}

fn exec<I>(command: &[OsString], env: I) -> LljailError
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let Some(program) = command.first() else {
        return LljailError::LaunchFailed {
            program: OsString::new(),
            source: io::Error::from(io::ErrorKind::InvalidInput),
        };
    };

    let failed = |source: io::Error| LljailError::LaunchFailed {
        program: program.clone(),
        source,
    };

    let argv = match command.iter().map(|a| to_cstring(a)).collect::<io::Result<Vec<_>>>() {
        Ok(argv) => argv,
        Err(e) => return failed(e),
    };
    let envp = match env
        .into_iter()
        .map(|(k, v)| environ_entry(&k, &v))
        .collect::<io::Result<Vec<_>>>()
    {
        Ok(envp) => envp,
        Err(e) => return failed(e),
    };

    match execvpe(&argv[0], &argv, &envp) {
        Ok(never) => match never {},
        Err(errno) => failed(io::Error::from(errno)),
    }
}

fn to_cstring(s: &OsStr) -> io::Result<CString> {
    CString::new(s.as_bytes()).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn environ_entry(key: &OsStr, value: &OsStr) -> io::Result<CString> {
    let mut entry = key.to_os_string();
    entry.push("=");
    entry.push(value);
    to_cstring(&entry)
}

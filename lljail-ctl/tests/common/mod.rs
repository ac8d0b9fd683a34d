//! Shared E2E helpers for `lljail` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use lljail_core::SystemCapabilities;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TIMEOUT: Duration = Duration::from_secs(10);

/// Directories a dynamically linked coreutils binary needs to start.
const RUNTIME_PATHS: &[&str] = &["/usr", "/bin", "/lib", "/lib64", "/etc/ld.so.cache"];

pub fn lljail() -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("lljail");
    cmd.timeout(TIMEOUT);
    cmd
}

pub fn landlock_usable() -> bool {
    SystemCapabilities::detect().landlock.is_usable()
}

/// Read grants for every runtime path present on this host.
///
/// Regular files get the `file` modifier: directory rights on a file are
/// rejected by the kernel.
pub fn runtime_grants() -> Vec<String> {
    let mut args = Vec::new();
    for path in RUNTIME_PATHS.iter().map(Path::new) {
        if !path.exists() {
            continue;
        }
        args.push("-r".to_string());
        if !path.is_dir() {
            args.push("file".to_string());
        }
        args.push(path.display().to_string());
    }
    args
}

/// Absolute path of a tool, so the jailed `execvpe` does not walk `PATH`
pub fn tool(name: &str) -> PathBuf {
    ["/usr/bin", "/bin"]
        .iter()
        .map(|dir| Path::new(dir).join(name))
        .find(|p| p.exists())
        .unwrap_or_else(|| panic!("{name} not found in /usr/bin or /bin"))
}

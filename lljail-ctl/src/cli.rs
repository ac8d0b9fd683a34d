//! Command-line scanning
//!
//! The grammar is positional: `-r`, `-rw` and `-w` are whole tokens (not
//! clustered short flags), each optionally followed by the literal `file`,
//! then a path. Everything after `--` belongs to the target command.

use lljail_core::UsageError;
use lljail_landlock::{Directive, GrantClass};
use std::ffi::OsString;

pub const USAGE: &str = "\
Usage:
  lljail [OPTIONS...] -- [ARGV...]

Options:
  -r PATH         permit only reading for the path
  -rw PATH        permit reading and writing
  -w PATH         permit only writing
  -v, --verbose   log each step of the restriction to stderr
  --check         report Landlock support and exit
  --version       print version and exit

  In order to only give file (not directory) permissions,
  you can pass two arguments, a literal 'file' and the path.
  Example: lljail -r file /dev/random ... -- /bin/bash

Example:
  lljail -r /usr -r /bin -r /tmp -r /etc -r /root -- /bin/bash
";

const SEPARATOR: &str = "--";
const FILE_MODIFIER: &str = "file";

/// What the command line asks for
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Help,
    Check,
    Version,
    Run(Invocation),
}

/// A jail to build and the command to run inside it
#[derive(Debug, PartialEq, Eq)]
pub struct Invocation {
    pub directives: Vec<Directive>,
    pub command: Vec<OsString>,
    pub verbose: bool,
}

/// Parse the arguments following the program name.
///
/// Purely syntactic: no path is touched and no kernel call is made.
pub fn parse<I>(args: I) -> Result<Action, UsageError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter().peekable();

    if let Some(first) = args.peek().and_then(|a| a.to_str()) {
        match first {
            "-h" | "--help" => return Ok(Action::Help),
            "--check" => return Ok(Action::Check),
            "--version" => return Ok(Action::Version),
            _ => {}
        }
    }

    let mut directives = Vec::new();
    let mut verbose = false;

    loop {
        let token = args.next().ok_or(UsageError::MissingSeparator)?;
        let flag = token.into_string().map_err(UsageError::UnknownFlag)?;

        match flag.as_str() {
            SEPARATOR => break,
            "-v" | "--verbose" => {
                verbose = true;
                continue;
            }
            _ => {}
        }

        let class = GrantClass::from_flag(&flag)
            .ok_or_else(|| UsageError::UnknownFlag(OsString::from(&flag)))?;

        let mut path = next_path(&mut args, class)?;
        let file_only = path == FILE_MODIFIER;
        if file_only {
            path = next_path(&mut args, class)?;
        }

        directives.push(Directive::new(class, file_only, path));
    }

    let command: Vec<OsString> = args.collect();
    if command.is_empty() {
        return Err(UsageError::MissingCommand);
    }

    Ok(Action::Run(Invocation {
        directives,
        command,
        verbose,
    }))
}

fn next_path(
    args: &mut impl Iterator<Item = OsString>,
    class: GrantClass,
) -> Result<OsString, UsageError> {
    match args.next() {
        Some(path) if path != SEPARATOR => Ok(path),
        _ => Err(UsageError::MissingPath(class.flag().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse_strs(args: &[&str]) -> Result<Action, UsageError> {
        parse(args.iter().map(OsString::from))
    }

    fn invocation(args: &[&str]) -> Invocation {
        match parse_strs(args) {
            Ok(Action::Run(inv)) => inv,
            other => panic!("expected an invocation, got {:?}", other),
        }
    }

    #[test]
    fn help_only_as_first_argument() {
        assert_eq!(parse_strs(&["-h"]), Ok(Action::Help));
        assert_eq!(parse_strs(&["--help", "-r", "/usr"]), Ok(Action::Help));
        assert_eq!(
            parse_strs(&["-r", "/usr", "-h", "--", "true"]),
            Err(UsageError::UnknownFlag(OsString::from("-h")))
        );
    }

    #[test]
    fn check_and_version() {
        assert_eq!(parse_strs(&["--check"]), Ok(Action::Check));
        assert_eq!(parse_strs(&["--version"]), Ok(Action::Version));
    }

    #[test]
    fn directives_in_order() {
        let inv = invocation(&["-r", "/usr", "-rw", "/tmp", "-w", "file", "/dev/null", "--", "ls", "-l"]);

        assert_eq!(
            inv.directives,
            vec![
                Directive::new(GrantClass::Read, false, "/usr"),
                Directive::new(GrantClass::ReadWrite, false, "/tmp"),
                Directive::new(GrantClass::Write, true, "/dev/null"),
            ]
        );
        assert_eq!(inv.command, vec![OsString::from("ls"), OsString::from("-l")]);
        assert!(!inv.verbose);
    }

    #[test]
    fn command_arguments_pass_through_untouched() {
        let inv = invocation(&["--", "sh", "-c", "echo -- -r file", "--"]);
        assert!(inv.directives.is_empty());
        assert_eq!(
            inv.command,
            vec![
                OsString::from("sh"),
                OsString::from("-c"),
                OsString::from("echo -- -r file"),
                OsString::from("--"),
            ]
        );
    }

    #[test]
    fn verbose_anywhere_before_separator() {
        let inv = invocation(&["-r", "/usr", "-v", "--", "true"]);
        assert!(inv.verbose);
        assert_eq!(inv.directives.len(), 1);
        assert!(invocation(&["--verbose", "--", "true"]).verbose);
    }

    #[test]
    fn missing_separator() {
        assert_eq!(parse_strs(&["-r", "/usr"]), Err(UsageError::MissingSeparator));
        assert_eq!(parse_strs(&[]), Err(UsageError::MissingSeparator));
    }

    #[test]
    fn unknown_flag() {
        assert_eq!(
            parse_strs(&["-x", "/usr", "--", "true"]),
            Err(UsageError::UnknownFlag(OsString::from("-x")))
        );
        assert_eq!(
            parse_strs(&["/usr", "--", "true"]),
            Err(UsageError::UnknownFlag(OsString::from("/usr")))
        );
    }

    #[test]
    fn missing_path_after_flag() {
        assert_eq!(parse_strs(&["-r"]), Err(UsageError::MissingPath("-r".into())));
        assert_eq!(parse_strs(&["-rw", "file"]), Err(UsageError::MissingPath("-rw".into())));
        assert_eq!(
            parse_strs(&["-w", "--", "true"]),
            Err(UsageError::MissingPath("-w".into()))
        );
        assert_eq!(
            parse_strs(&["-r", "/usr", "-w", "file", "--", "true"]),
            Err(UsageError::MissingPath("-w".into()))
        );
    }

    #[test]
    fn missing_command() {
        assert_eq!(parse_strs(&["-r", "/usr", "--"]), Err(UsageError::MissingCommand));
    }

    #[test]
    fn file_modifier_applies_to_next_path_only() {
        let inv = invocation(&["-r", "file", "/etc/hostname", "-r", "/etc", "--", "cat"]);
        assert!(inv.directives[0].file_only);
        assert_eq!(inv.directives[0].path, PathBuf::from("/etc/hostname"));
        assert!(!inv.directives[1].file_only);
    }

    #[test]
    fn relative_path_named_file_needs_prefix() {
        let inv = invocation(&["-r", "./file", "--", "true"]);
        assert!(!inv.directives[0].file_only);
        assert_eq!(inv.directives[0].path, PathBuf::from("./file"));
    }

    #[test]
    fn usage_mentions_every_flag() {
        for flag in ["-r PATH", "-rw PATH", "-w PATH", "--check", "'file'"] {
            assert!(USAGE.contains(flag), "usage lacks {flag}");
        }
    }
}

//! helper::process
//!
//! Synchronous subprocess execution with captured output.
//!
//! The CLI layer imposes no timeout; it waits for the wrapped tool to
//! finish. Captured output is replayed to the terminal according to the
//! verbosity level, and kept on the outcome so callers can build error
//! messages from it.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;
use std::process::Command;

use crate::ui::output::{self, Verbosity};

/// Captured result of one subprocess run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Everything the process wrote to stdout
    pub stdout: String,
    /// Everything the process wrote to stderr
    pub stderr: String,
    /// The process exit code; `-1` when terminated by a signal
    pub exit_code: i32,
}

impl ProcessOutcome {
    /// Whether the process exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// A one-line description of the failure, preferring stderr.
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exit code {}", self.exit_code)
        } else {
            stderr.to_string()
        }
    }
}

/// Run `program` with `args`, waiting for completion.
///
/// `envs` are added on top of the inherited environment. Spawn failures
/// (program not found, permission denied) surface as `io::Error`; a non-zero
/// exit is not an error here - callers decide what a failure means.
pub fn run<I, S>(
    program: &str,
    args: I,
    cwd: Option<&Path>,
    envs: &[(String, String)],
    verbosity: Verbosity,
) -> io::Result<ProcessOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
    output::debug(
        format!(
            "running: {} {}",
            program,
            args.iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" ")
        ),
        verbosity,
    );

    let mut command = Command::new(program);
    command.args(&args);
    for (key, value) in envs {
        command.env(key, value);
    }
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }

    let captured = command.output()?;
    let outcome = ProcessOutcome {
        stdout: String::from_utf8_lossy(&captured.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&captured.stderr).into_owned(),
        exit_code: captured.status.code().unwrap_or(-1),
    };

    if verbosity != Verbosity::Quiet {
        if !outcome.stdout.is_empty() {
            print!("{}", outcome.stdout);
        }
        if !outcome.stderr.is_empty() {
            eprint!("{}", outcome.stderr);
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_exit_code() {
        let outcome = run(
            "sh",
            ["-c", "printf hello"],
            None,
            &[],
            Verbosity::Quiet,
        )
        .unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.stdout, "hello");
        assert_eq!(outcome.exit_code, 0);
    }

    #[test]
    fn nonzero_exit_is_an_outcome_not_an_error() {
        let outcome = run(
            "sh",
            ["-c", "echo boom >&2; exit 3"],
            None,
            &[],
            Verbosity::Quiet,
        )
        .unwrap();
        assert!(!outcome.success());
        assert_eq!(outcome.exit_code, 3);
        assert_eq!(outcome.failure_message(), "boom");
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let result = run(
            "definitely-not-a-real-program",
            ["x"],
            None,
            &[],
            Verbosity::Quiet,
        );
        assert!(result.is_err());
    }

    #[test]
    fn failure_message_falls_back_to_exit_code() {
        let outcome = ProcessOutcome {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 7,
        };
        assert_eq!(outcome.failure_message(), "exit code 7");
    }

    #[test]
    fn extra_envs_are_applied() {
        let envs = vec![("CAPSTAN_TEST_VALUE".to_string(), "present".to_string())];
        let outcome = run(
            "sh",
            ["-c", "printf \"$CAPSTAN_TEST_VALUE\""],
            None,
            &envs,
            Verbosity::Quiet,
        )
        .unwrap();
        assert_eq!(outcome.stdout, "present");
    }
}

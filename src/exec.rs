//! Subprocess execution.
//!
//! The runner only sees the [`Executor`] trait; tests substitute a scripted
//! implementation so the dispatch loop never spawns real processes.

use std::io;
use std::path::Path;
use std::process::Command;

/// Fully captured result of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs a shell command to completion in a directory.
pub trait Executor {
    /// Run `command` with `cwd` as its working directory, blocking until it
    /// exits. `Err` means the command could not be started at all.
    fn execute(&mut self, command: &str, cwd: &Path) -> io::Result<CommandOutput>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn execute(&mut self, command: &str, cwd: &Path) -> io::Result<CommandOutput> {
        (**self).execute(command, cwd)
    }
}

/// Executes commands through the platform shell (`sh -c` / `cmd /C`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellExecutor;

impl ShellExecutor {
    fn shell(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

impl Executor for ShellExecutor {
    fn execute(&mut self, command: &str, cwd: &Path) -> io::Result<CommandOutput> {
        log::debug!("exec in {}: {command}", cwd.display());
        let output = Self::shell(command).current_dir(cwd).output()?;
        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let out = ShellExecutor
            .execute("echo out; echo err >&2", tmp.path())
            .unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
    }

    #[test]
    fn reports_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let out = ShellExecutor.execute("exit 3", tmp.path()).unwrap();
        assert_eq!(out.status, Some(3));
        assert!(!out.success());
    }

    #[test]
    fn runs_in_working_dir() {
        let tmp = tempfile::tempdir().unwrap();
        ShellExecutor
            .execute("echo '{}' > plan.json", tmp.path())
            .unwrap();
        assert!(tmp.path().join("plan.json").is_file());
    }

    #[test]
    fn missing_cwd_is_launch_error() {
        let tmp = tempfile::tempdir().unwrap();
        let gone = tmp.path().join("gone");
        assert!(ShellExecutor.execute("true", &gone).is_err());
    }
}

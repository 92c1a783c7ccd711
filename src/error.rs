use std::path::PathBuf;

use crate::commands::Step;

/// Exit status for startup errors and failures without a child status.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Captured result of a step that exited unsuccessfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: Step,
    /// The child's exit status, or `None` when it was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl StepFailure {
    pub fn exit_code(&self) -> i32 {
        self.status.unwrap_or(FAILURE_EXIT_CODE)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("the target directory '{}' does not exist", .0.display())]
    NotFound(PathBuf),
    #[error(
        "directory structure must contain at least <service>/<resource>/<attribute> at the end: '{0}'"
    )]
    MalformedPath(String),
    #[error("command {} ({}) failed with exit code {}", .0.step.id(), .0.step.label(), .0.exit_code())]
    StepFailed(StepFailure),
    #[error("could not launch command {} ({}): {source}", .step.id(), .step.label())]
    Launch {
        step: Step,
        #[source]
        source: std::io::Error,
    },
    #[error("console I/O failed: {0}")]
    Console(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::StepFailed(failure) => failure.exit_code(),
            _ => FAILURE_EXIT_CODE,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(status: Option<i32>) -> Error {
        Error::StepFailed(StepFailure {
            step: Step::Plan,
            status,
            stdout: String::new(),
            stderr: String::new(),
        })
    }

    #[test]
    fn step_failure_keeps_child_code() {
        assert_eq!(failure(Some(3)).exit_code(), 3);
    }

    #[test]
    fn signalled_child_maps_to_one() {
        assert_eq!(failure(None).exit_code(), 1);
    }

    #[test]
    fn startup_errors_exit_one() {
        assert_eq!(Error::NotFound(PathBuf::from("missing")).exit_code(), 1);
        assert_eq!(Error::MalformedPath("only/two".into()).exit_code(), 1);
    }

    #[test]
    fn step_failure_message_names_step() {
        let msg = failure(Some(3)).to_string();
        assert_eq!(msg, "command 2 (plan) failed with exit code 3");
    }
}

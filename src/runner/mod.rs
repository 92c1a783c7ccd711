//! Interactive menu loop and batch dispatch.
//!
//! The loop prompts, reads one line, dispatches the selected steps in order
//! and prompts again. It ends on the exit choice, on end of input, or on the
//! first failing step. A failure is returned as [`Error::StepFailed`]; the
//! caller decides how the process exits.

/// Menu text and selection parsing.
pub mod menu;

use std::io::{BufRead, Write};

use crate::commands::{CommandTable, Step};
use crate::error::{Error, Result, StepFailure};
use crate::exec::Executor;

pub use menu::MenuChoice;

pub struct Runner<'t, E, W> {
    table: &'t CommandTable,
    executor: E,
    out: W,
}

impl<'t, E: Executor, W: Write> Runner<'t, E, W> {
    pub fn new(table: &'t CommandTable, executor: E, out: W) -> Self {
        Self {
            table,
            executor,
            out,
        }
    }

    /// Run the menu loop until the user exits or input ends.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        let mut line = String::new();
        loop {
            writeln!(self.out, "\n{}", menu::prompt())?;
            self.out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                log::info!("end of input, exiting");
                writeln!(self.out, "Exiting script.")?;
                return Ok(());
            }

            match menu::parse_choice(&line) {
                MenuChoice::Exit => {
                    log::info!("exit requested");
                    writeln!(self.out, "Exiting script.")?;
                    return Ok(());
                }
                MenuChoice::Run(ids) => self.run_batch(&ids)?,
            }
        }
    }

    /// Dispatch `ids` in order, stopping at the first failing step.
    ///
    /// Unknown ids produce a warning and are skipped.
    pub fn run_batch<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<()> {
        for id in ids {
            let id = id.as_ref();
            match Step::from_id(id) {
                Some(step) => self.run_step(step)?,
                None => {
                    log::warn!("unrecognized command id '{id}'");
                    writeln!(self.out, "Warning: Command {id} is not recognized.")?;
                }
            }
        }
        Ok(())
    }

    /// Execute a single step and report its outcome.
    pub fn run_step(&mut self, step: Step) -> Result<()> {
        let descriptor = self.table.get(step);
        writeln!(self.out, "{}", descriptor.description)?;
        self.out.flush()?;

        log::debug!("step {} ({step}): {}", step.id(), descriptor.shell_command);
        let output = self
            .executor
            .execute(&descriptor.shell_command, &descriptor.working_dir)
            .map_err(|source| Error::Launch { step, source })?;

        if !output.success() {
            writeln!(self.out, "Error while running command:")?;
            writeln!(self.out, "{}", output.stdout)?;
            writeln!(self.out, "{}", output.stderr)?;
            self.out.flush()?;
            let failure = StepFailure {
                step,
                status: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
            };
            log::error!(
                "step {} ({step}) failed with exit code {}",
                step.id(),
                failure.exit_code()
            );
            return Err(Error::StepFailed(failure));
        }

        if descriptor.echo_output {
            writeln!(self.out, "{}", output.stdout)?;
        }
        writeln!(self.out, "Command {} completed successfully.\n", step.id())?;
        log::info!("step {} ({step}) succeeded", step.id());
        Ok(())
    }
}

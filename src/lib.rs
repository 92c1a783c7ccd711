//! policy-check: interactive terraform plan + OPA policy check runner.
//!
//! A target directory ending in `<service>/<resource>/<attribute>` is resolved
//! into a [`TargetTriple`](target::TargetTriple). From it a fixed table of four
//! commands is rendered: `terraform init`, `terraform plan`, `terraform show`
//! into `plan.json`, and an `opa eval` of the matching policy query. A menu loop
//! then runs any selection of them in the target directory.
//!
//! # Architecture
//!
//! - **[`target`]**: Path resolution: triple extraction, attribute reconciliation.
//! - **[`commands`]**: The four [`Step`](commands::Step)s and their rendered shell commands.
//! - **[`runner`]**: Menu loop and in-order batch dispatch.
//! - **[`exec`]**: Subprocess execution behind the [`Executor`](exec::Executor) trait.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: Run log at `~/.local/share/policy-check/runs.log`.

/// Step definitions and command table rendering.
pub mod commands;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Crate error type and exit status mapping.
pub mod error;
/// Shell execution with captured output.
pub mod exec;
/// Global logger setup.
pub mod logging;
/// Interactive menu loop.
pub mod runner;
/// Target directory resolution.
pub mod target;

use std::io::{BufRead, Write};
use std::path::Path;

pub use error::{Error, Result};

/// Resolve the target, render the command table and run the menu loop.
///
/// `base_dir` is the directory relative targets and the policy root resolve
/// against. Console output goes to `out`; menu input is read from `input`.
pub fn run<E, R, W>(
    base_dir: &Path,
    target_dir: &str,
    attribute: &str,
    config: &config::Config,
    executor: E,
    input: R,
    mut out: W,
) -> Result<()>
where
    E: exec::Executor,
    R: BufRead,
    W: Write,
{
    let resolution = target::resolve(base_dir, target_dir, attribute)?;
    if let Some(ref mismatch) = resolution.mismatch {
        writeln!(out, "Warning: {mismatch}")?;
    }

    let triple = &resolution.triple;
    writeln!(out, "Detected service: '{}'", triple.service)?;
    writeln!(out, "Detected resource: '{}'", triple.resource)?;
    writeln!(out, "Detected attribute: '{}'", triple.attribute)?;
    writeln!(out, "Changed directory to {}", resolution.working_dir.display())?;

    let policies_root = config.policies_root(base_dir);
    let table = commands::CommandTable::build(
        triple,
        &resolution.working_dir,
        &policies_root,
        config,
    );
    log::info!("policy query: {}", table.query());

    runner::Runner::new(&table, executor, out).run(input)
}

//! The fixed command table: three terraform steps and one OPA evaluation.
//!
//! Each [`Step`] renders to exactly one shell command string. The table is
//! built once after target resolution and never mutated.

/// OPA policy query and `opa eval` rendering.
pub mod opa;
/// `terraform init` / `plan` / `show` rendering.
pub mod terraform;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::target::TargetTriple;

pub use opa::PolicyQuery;

/// One of the four runnable operations, in their canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Init,
    Plan,
    Show,
    PolicyEval,
}

impl Step {
    /// All steps in the order an empty menu selection runs them.
    pub const ALL: [Step; 4] = [Step::Init, Step::Plan, Step::Show, Step::PolicyEval];

    /// Menu id of this step.
    pub fn id(self) -> &'static str {
        match self {
            Step::Init => "1",
            Step::Plan => "2",
            Step::Show => "3",
            Step::PolicyEval => "4",
        }
    }

    /// Short name shown in the menu.
    pub fn label(self) -> &'static str {
        match self {
            Step::Init => "init",
            Step::Plan => "plan",
            Step::Show => "show",
            Step::PolicyEval => "opa",
        }
    }

    /// Look up a step by menu id. Ids are matched exactly.
    pub fn from_id(id: &str) -> Option<Step> {
        Step::ALL.into_iter().find(|s| s.id() == id)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully rendered, ready-to-run command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub step: Step,
    pub shell_command: String,
    /// Line printed before the command runs.
    pub description: String,
    pub working_dir: PathBuf,
    /// Print captured stdout when the command succeeds.
    pub echo_output: bool,
}

/// The four descriptors, indexed by [`Step`].
#[derive(Debug, Clone)]
pub struct CommandTable {
    descriptors: [CommandDescriptor; 4],
    query: PolicyQuery,
}

impl CommandTable {
    /// Render every step for `triple`.
    ///
    /// Pure construction: nothing is executed and `plan.json` is not
    /// required to exist yet.
    pub fn build(
        triple: &TargetTriple,
        working_dir: &Path,
        policies_root: &Path,
        config: &Config,
    ) -> Self {
        let query = PolicyQuery::new(&config.policy, triple);
        let plan_json = working_dir.join(&config.plan.plan_json);

        let tf = &config.tools.terraform;
        let descriptors = Step::ALL.map(|step| {
            let (shell_command, description) = match step {
                Step::Init => (terraform::init(tf), terraform::description("init")),
                Step::Plan => (
                    terraform::plan(tf, &config.plan),
                    terraform::description("plan"),
                ),
                Step::Show => (
                    terraform::show(tf, &config.plan),
                    terraform::description("show"),
                ),
                Step::PolicyEval => (
                    opa::eval_command(
                        &config.tools.opa,
                        policies_root,
                        &plan_json,
                        &config.policy.format,
                        &query,
                    ),
                    opa::description(&query),
                ),
            };
            CommandDescriptor {
                step,
                shell_command,
                description,
                working_dir: working_dir.to_path_buf(),
                echo_output: step == Step::PolicyEval,
            }
        });

        Self { descriptors, query }
    }

    pub fn get(&self, step: Step) -> &CommandDescriptor {
        &self.descriptors[step as usize]
    }

    pub fn query(&self) -> &PolicyQuery {
        &self.query
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.descriptors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple() -> TargetTriple {
        TargetTriple {
            service: "gcp_kms".into(),
            resource: "crypto_key".into(),
            attribute: "state".into(),
        }
    }

    fn table() -> CommandTable {
        CommandTable::build(
            &triple(),
            Path::new("/repo/inputs/gcp_kms/crypto_key/state"),
            Path::new("/repo/policies/gcp"),
            &Config::default_config(),
        )
    }

    #[test]
    fn step_ids_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_id(step.id()), Some(step));
        }
    }

    #[test]
    fn unknown_ids_are_none() {
        assert_eq!(Step::from_id("5"), None);
        assert_eq!(Step::from_id("9"), None);
        assert_eq!(Step::from_id(""), None);
        assert_eq!(Step::from_id(" 1"), None);
    }

    #[test]
    fn table_holds_steps_in_order() {
        let steps: Vec<Step> = table().iter().map(|d| d.step).collect();
        assert_eq!(steps, Step::ALL.to_vec());
    }

    #[test]
    fn terraform_commands() {
        let t = table();
        assert_eq!(t.get(Step::Init).shell_command, "terraform init");
        assert_eq!(t.get(Step::Plan).shell_command, "terraform plan -out=plan");
        assert_eq!(
            t.get(Step::Show).shell_command,
            "terraform show -json plan > plan.json"
        );
    }

    #[test]
    fn only_policy_eval_echoes_output() {
        let t = table();
        let echoing: Vec<Step> = t.iter().filter(|d| d.echo_output).map(|d| d.step).collect();
        assert_eq!(echoing, vec![Step::PolicyEval]);
    }

    #[cfg(unix)]
    #[test]
    fn policy_eval_command() {
        let t = table();
        assert_eq!(
            t.get(Step::PolicyEval).shell_command,
            "opa eval --data \"/repo/policies/gcp\" \
             --input \"/repo/inputs/gcp_kms/crypto_key/state/plan.json\" \
             --format pretty \
             \"data.terraform.gcp.security.gcp_kms.crypto_key.state.summary.message\""
        );
    }

    #[test]
    fn descriptions() {
        let t = table();
        assert_eq!(t.get(Step::Init).description, "▶ Running terraform init...");
        assert_eq!(t.get(Step::Plan).description, "▶ Running terraform plan...");
        assert_eq!(t.get(Step::Show).description, "▶ Running terraform show...");
        assert_eq!(
            t.get(Step::PolicyEval).description,
            "▶ Running OPA policy check for: \
             data.terraform.gcp.security.gcp_kms.crypto_key.state.summary.message..."
        );
    }

    #[test]
    fn every_step_runs_in_working_dir() {
        let t = table();
        for d in t.iter() {
            assert_eq!(d.working_dir, Path::new("/repo/inputs/gcp_kms/crypto_key/state"));
        }
    }
}

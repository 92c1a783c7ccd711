//! Terraform step rendering.
//!
//! `show` redirects into the plan JSON file relative to the working
//! directory, so the command must run through a shell.

use crate::config::PlanConfig;

pub fn init(terraform: &str) -> String {
    format!("{terraform} init")
}

pub fn plan(terraform: &str, plan: &PlanConfig) -> String {
    format!("{terraform} plan -out={}", plan.plan_file)
}

pub fn show(terraform: &str, plan: &PlanConfig) -> String {
    format!(
        "{terraform} show -json {} > {}",
        plan.plan_file, plan.plan_json
    )
}

/// Line printed before a terraform subcommand runs.
pub fn description(subcommand: &str) -> String {
    format!("▶ Running terraform {subcommand}...")
}

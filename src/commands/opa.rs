use std::fmt;
use std::path::Path;

use crate::config::PolicyConfig;
use crate::target::TargetTriple;

/// Dotted OPA data reference for a target triple.
///
/// Segments are interpolated verbatim; nothing is escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyQuery(String);

impl PolicyQuery {
    pub fn new(policy: &PolicyConfig, triple: &TargetTriple) -> Self {
        Self(format!(
            "{}.{}.{}.{}.{}",
            policy.query_prefix,
            triple.service,
            triple.resource,
            triple.attribute,
            policy.query_suffix
        ))
    }
}

impl fmt::Display for PolicyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render `opa eval` over the policy data with the plan JSON as input.
pub fn eval_command(
    opa: &str,
    policies_root: &Path,
    plan_json: &Path,
    format: &str,
    query: &PolicyQuery,
) -> String {
    format!(
        "{opa} eval --data \"{}\" --input \"{}\" --format {format} \"{query}\"",
        policies_root.display(),
        plan_json.display(),
    )
}

pub fn description(query: &PolicyQuery) -> String {
    format!("▶ Running OPA policy check for: {query}...")
}

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// External binaries invoked by the command table.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ToolsConfig {
    #[serde(default)]
    pub terraform: String,
    #[serde(default)]
    pub opa: String,
}

/// Artifact names produced inside the target directory.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlanConfig {
    #[serde(default)]
    pub plan_file: String,
    #[serde(default)]
    pub plan_json: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PolicyConfig {
    /// Policy data directory. Relative values resolve against the
    /// directory the tool was started in.
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub query_prefix: String,
    #[serde(default)]
    pub query_suffix: String,
    /// Value passed to `opa eval --format`.
    #[serde(default)]
    pub format: String,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    tools: ToolsOverlay,
    #[serde(default)]
    plan: PlanOverlay,
    #[serde(default)]
    policy: PolicyOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct ToolsOverlay {
    terraform: Option<String>,
    opa: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct PlanOverlay {
    plan_file: Option<String>,
    plan_json: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct PolicyOverlay {
    root: Option<String>,
    query_prefix: Option<String>,
    query_suffix: Option<String>,
    format: Option<String>,
}

/// Replace `slot` when the overlay carries a value.
fn override_scalar(slot: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/policy-check/config.toml (if exists)
    ///
    /// Every field is a scalar, so an overlay value simply replaces the default.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/policy-check/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = Path::new(&home).join(".config/policy-check/config.toml");
        let content = std::fs::read_to_string(&path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => {
                log::debug!("loaded config overlay from {}", path.display());
                Some(overlay)
            }
            Err(e) => {
                eprintln!("policy-check: config parse error: {e}");
                log::warn!("ignoring unparsable config {}: {e}", path.display());
                None
            }
        }
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let t = overlay.tools;
        override_scalar(&mut self.tools.terraform, t.terraform);
        override_scalar(&mut self.tools.opa, t.opa);

        let p = overlay.plan;
        override_scalar(&mut self.plan.plan_file, p.plan_file);
        override_scalar(&mut self.plan.plan_json, p.plan_json);

        let po = overlay.policy;
        override_scalar(&mut self.policy.root, po.root);
        override_scalar(&mut self.policy.query_prefix, po.query_prefix);
        override_scalar(&mut self.policy.query_suffix, po.query_suffix);
        override_scalar(&mut self.policy.format, po.format);
    }

    /// Absolute policy data directory.
    ///
    /// `~` and `$VAR` references in `policy.root` are expanded; an expansion
    /// that names an unset variable leaves the value as written.
    pub fn policies_root(&self, base_dir: &Path) -> PathBuf {
        let raw = &self.policy.root;
        let expanded = match shellexpand::full(raw) {
            Ok(s) => s.into_owned(),
            Err(e) => {
                log::warn!("could not expand policy root '{raw}': {e}");
                raw.clone()
            }
        };
        base_dir.join(expanded)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

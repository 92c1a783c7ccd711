//! Target directory resolution.
//!
//! A target directory ends in `<service>/<resource>/<attribute>`. The last
//! three segments name the policy package that the plan is checked against.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The `{service, resource, attribute}` triple encoded in a target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTriple {
    pub service: String,
    pub resource: String,
    pub attribute: String,
}

/// The caller's attribute disagreed with the one in the path. Non-fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMismatch {
    pub provided: String,
    pub derived: String,
}

impl fmt::Display for AttributeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Provided attribute '{}' does not match the directory's attribute '{}'",
            self.provided, self.derived
        )
    }
}

/// Outcome of a successful [`resolve`].
#[derive(Debug, Clone)]
pub struct Resolution {
    pub triple: TargetTriple,
    /// Absolute target directory. All commands run here.
    pub working_dir: PathBuf,
    pub mismatch: Option<AttributeMismatch>,
}

/// Strip surrounding whitespace and trailing `/` or `\` separators.
pub fn trim_target(target_dir: &str) -> &str {
    target_dir.trim().trim_end_matches(['/', '\\'])
}

/// Split a target path on `/`, treating backslashes as separators.
///
/// Every segment is kept, including empty ones and `.`.
pub fn segments(target_dir: &str) -> Vec<String> {
    target_dir
        .replace('\\', "/")
        .split('/')
        .map(String::from)
        .collect()
}

/// Resolve `target_dir` (relative to `base_dir`) into a triple and an
/// absolute working directory.
///
/// The provided attribute wins over the path-derived one; a disagreement is
/// reported through [`Resolution::mismatch`].
pub fn resolve(base_dir: &Path, target_dir: &str, provided_attribute: &str) -> Result<Resolution> {
    let trimmed = trim_target(target_dir);
    let provided = provided_attribute.trim();

    let dir = base_dir.join(trimmed);
    if trimmed.is_empty() || !dir.is_dir() {
        return Err(Error::NotFound(PathBuf::from(trimmed)));
    }

    let parts = segments(trimmed);
    let [.., service, resource, attribute] = parts.as_slice() else {
        return Err(Error::MalformedPath(trimmed.to_string()));
    };

    let mismatch = (attribute != provided).then(|| AttributeMismatch {
        provided: provided.to_string(),
        derived: attribute.clone(),
    });
    if let Some(ref m) = mismatch {
        log::warn!("{m}");
    }

    let triple = TargetTriple {
        service: service.clone(),
        resource: resource.clone(),
        attribute: provided.to_string(),
    };
    let working_dir = std::path::absolute(&dir).unwrap_or(dir);
    log::info!(
        "resolved {} -> {}/{}/{}",
        working_dir.display(),
        triple.service,
        triple.resource,
        triple.attribute
    );

    Ok(Resolution {
        triple,
        working_dir,
        mismatch,
    })
}

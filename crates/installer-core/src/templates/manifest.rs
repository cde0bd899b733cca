//! Template manifest and directory resolution

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Manifest file at the root of every template directory. Never copied into
/// the target.
pub const MANIFEST_FILE: &str = "template.yaml";

/// Environment variable overriding where the template is read from
pub const TEMPLATE_DIR_ENV: &str = "MS_TEMPLATE_DIR";

/// Default template shipped with the repository
const BUNDLED_TEMPLATE_DIR: &str = "templates/microservice";

/// Template metadata (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for installer compatibility checking
    pub version: String,
}

/// Pick the template directory: explicit flag, then environment override,
/// then the bundled default
pub fn locate_template_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    let dir = flag
        .or_else(|| std::env::var(TEMPLATE_DIR_ENV).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(BUNDLED_TEMPLATE_DIR));

    if !dir.join(MANIFEST_FILE).exists() {
        anyhow::bail!(
            "No template found at {} (missing {}). \
             Pass --template-dir or set {}.",
            dir.display(),
            MANIFEST_FILE,
            TEMPLATE_DIR_ENV
        );
    }

    Ok(dir)
}

/// Read and parse a template's manifest
pub async fn load_manifest(template_dir: &Path) -> Result<TemplateManifest> {
    let path = template_dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

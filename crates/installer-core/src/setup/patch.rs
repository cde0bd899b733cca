//! package.json fixups for the generated project

use crate::config;
use crate::resolve::ResolvedSet;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Write the resolved microservice name and description into the target's
/// package.json, leaving every other field as the template shipped it
pub async fn update_package_json(values: &ResolvedSet, target_dir: &Path) -> Result<()> {
    let path = target_dir.join("package.json");
    let raw = fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut package: serde_json::Value =
        serde_json::from_str(&raw).context("Failed to parse package.json")?;
    let object = package
        .as_object_mut()
        .context("package.json is not a JSON object")?;

    if let Some(name) = values.text(config::MS_NAME) {
        object.insert("name".to_string(), serde_json::Value::from(name));
    }
    if let Some(description) = values.text(config::MS_DESCRIPTION) {
        object.insert("description".to_string(), serde_json::Value::from(description));
    }

    let pretty = serde_json::to_string_pretty(&package).context("Failed to serialize package.json")?;
    fs::write(&path, pretty + "\n")
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ResolvedEntry;

    fn values() -> ResolvedSet {
        ResolvedSet::new(vec![
            ResolvedEntry::variable(config::MS_NAME, "orders"),
            ResolvedEntry::variable(config::MS_DESCRIPTION, "Order management service"),
        ])
    }

    #[tokio::test]
    async fn test_name_and_description_are_patched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name": "template", "description": "placeholder", "version": "1.0.0"}"#,
        )
        .unwrap();

        update_package_json(&values(), dir.path()).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        let package: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(package["name"], "orders");
        assert_eq!(package["description"], "Order management service");
        // Untouched fields survive
        assert_eq!(package["version"], "1.0.0");
    }

    #[tokio::test]
    async fn test_missing_package_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(update_package_json(&values(), dir.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_non_object_package_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "[1, 2, 3]").unwrap();
        assert!(update_package_json(&values(), dir.path()).await.is_err());
    }
}

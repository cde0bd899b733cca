//! Applies the template rewriter across the copied tree

use crate::config;
use crate::resolve::ResolvedSet;
use crate::rewrite::{self, policy};
use crate::templates::copier;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Rewrite every processable file under the target directory against the
/// resolved values. Returns the number of files that changed. Files outside
/// the extension allow-list, and anything under an ignored directory, are
/// left untouched.
pub async fn process_files(values: &ResolvedSet, target_dir: &Path) -> Result<usize> {
    let mut changed = 0;

    for path in copier::list_files(target_dir, config::IGNORE_NAMES) {
        if !policy::is_processable(&path) {
            continue;
        }

        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default();
        let delimiter = policy::delimiter_for(extension);

        let text = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let rewritten = rewrite::rewrite(&text, values, delimiter);

        if rewritten != text {
            fs::write(&path, rewritten)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            changed += 1;
        }
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ResolvedEntry;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_processable_files_are_rewritten_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            &root.join("serverless.yml"),
            "service: ### ms-name ###\n### s3-start ###\nbucket: stuff\n### s3-end ###\n",
        );
        write(
            &root.join("src/index.ts"),
            "/// s3-start ///\nimport { S3 } from 'aws';\n/// s3-end ///\nexport {};\n",
        );
        write(&root.join("README.md"), "### ms-name ### stays\n");

        let values = ResolvedSet::new(vec![
            ResolvedEntry::variable("ms-name", "orders"),
            ResolvedEntry::module("s3", false, ResolvedSet::default()),
        ]);

        let changed = process_files(&values, root).await.unwrap();
        assert_eq!(changed, 2);

        let yml = std::fs::read_to_string(root.join("serverless.yml")).unwrap();
        assert_eq!(yml, "service: orders\n");

        let ts = std::fs::read_to_string(root.join("src/index.ts")).unwrap();
        assert_eq!(ts, "export {};\n");

        // .md is not on the allow-list
        let md = std::fs::read_to_string(root.join("README.md")).unwrap();
        assert_eq!(md, "### ms-name ### stays\n");
    }

    #[tokio::test]
    async fn test_untouched_files_are_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("plain.ts"), "export {};\n");

        let values = ResolvedSet::new(vec![ResolvedEntry::variable("ms-name", "orders")]);
        let changed = process_files(&values, dir.path()).await.unwrap();
        assert_eq!(changed, 0);
    }

    #[tokio::test]
    async fn test_ignored_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("node_modules/dep/index.ts"),
            "name: ### ms-name ###\n",
        );

        let values = ResolvedSet::new(vec![ResolvedEntry::variable("ms-name", "orders")]);
        process_files(&values, dir.path()).await.unwrap();

        let untouched =
            std::fs::read_to_string(dir.path().join("node_modules/dep/index.ts")).unwrap();
        assert_eq!(untouched, "name: ### ms-name ###\n");
    }
}

//! Copy-task execution and post-copy renames
//!
//! Copy tasks are the opaque side effects attached to module-tree nodes: a
//! node that resolved truthy gets its tasks executed against the target
//! directory. A non-recursive directory task copies only the files directly
//! inside it; a recursive task copies the whole subtree. The template
//! manifest itself is never copied.

use crate::config;
use crate::modules::{CopyTask, ModuleTree};
use crate::resolve::ResolvedSet;
use crate::templates::manifest::MANIFEST_FILE;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Recursively enumerate files under `root`, skipping any entry whose file
/// name equals one of `ignore_names` exactly (not a glob)
pub fn list_files(root: &Path, ignore_names: &[&str]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .map_or(true, |name| !ignore_names.contains(&name))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

/// Execute the copy tasks of every top-level node that resolved truthy.
/// Returns the number of files copied.
pub async fn run_copy_tasks(
    tree: &ModuleTree,
    values: &ResolvedSet,
    template_dir: &Path,
    target_dir: &Path,
) -> Result<usize> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut copied = 0;
    for (name, node) in tree.iter() {
        if !values.truthy(name) {
            continue;
        }
        for task in &node.side_effects().copy_tasks {
            copied += run_task(task, template_dir, target_dir).await?;
        }
    }

    Ok(copied)
}

async fn run_task(task: &CopyTask, template_dir: &Path, target_dir: &Path) -> Result<usize> {
    let src = template_dir.join(task.src);
    let dest = target_dir.join(task.dest);

    let meta = fs::metadata(&src)
        .await
        .with_context(|| format!("Copy source missing: {}", src.display()))?;

    if meta.is_file() {
        copy_file(&src, &dest).await?;
        return Ok(1);
    }

    if task.recursive {
        copy_tree(&src, &dest).await
    } else {
        copy_direct_files(&src, &dest).await
    }
}

/// Copy only the files directly inside `src`, skipping subdirectories and
/// the template manifest
async fn copy_direct_files(src: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;
    let mut entries = fs::read_dir(src)
        .await
        .with_context(|| format!("Failed to read {}", src.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if entry.file_name() == MANIFEST_FILE {
            continue;
        }
        copy_file(&entry.path(), &dest.join(entry.file_name())).await?;
        copied += 1;
    }

    Ok(copied)
}

/// Copy a whole subtree, preserving relative paths
async fn copy_tree(src: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;
    for path in list_files(src, &[]) {
        if path.file_name().is_some_and(|name| name == MANIFEST_FILE) {
            continue;
        }
        let relative = path
            .strip_prefix(src)
            .with_context(|| format!("Path escapes copy root: {}", path.display()))?;
        copy_file(&path, &dest.join(relative)).await?;
        copied += 1;
    }
    Ok(copied)
}

async fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::copy(src, dest)
        .await
        .with_context(|| format!("Failed to copy {}", src.display()))?;
    Ok(())
}

/// Post-copy renames: dot files get their leading dot back, and the API
/// handler picks up the microservice name when the API module is enabled
pub async fn rename_files(values: &ResolvedSet, target_dir: &Path) -> Result<()> {
    for file in config::DOT_FILES {
        let from = target_dir.join(file);
        if fs::try_exists(&from).await? {
            let to = target_dir.join(format!(".{file}"));
            fs::rename(&from, &to)
                .await
                .with_context(|| format!("Failed to rename {}", from.display()))?;
        }
    }

    if values.truthy(config::API_MODULE) {
        if let Some(ms_name) = values.text(config::MS_NAME) {
            let from = target_dir.join(config::API_HANDLER);
            if fs::try_exists(&from).await? {
                let to = target_dir.join(format!("src/handlers/{ms_name}-api.ts"));
                fs::rename(&from, &to)
                    .await
                    .with_context(|| format!("Failed to rename {}", from.display()))?;
            }
        }
    }

    Ok(())
}

//! npm package installation
//!
//! Runs the base install set first, then one `npm install` per package
//! attached to a truthy node. A failing install is reported and skipped
//! rather than aborting the run; the generated project is still usable and
//! the user can re-run npm by hand.

use crate::modules::ModuleTree;
use crate::resolve::ResolvedSet;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use tokio::process::Command;

use crate::config;

/// Install the base package set plus the packages of every truthy top-level
/// node. Returns the number of npm invocations that failed.
pub async fn install_packages(
    tree: &ModuleTree,
    values: &ResolvedSet,
    target_dir: &Path,
) -> Result<usize> {
    let mut failures = 0;

    for args in config::BASE_NPM_ARGS {
        if !run_npm(args, target_dir).await? {
            failures += 1;
        }
    }

    for (name, node) in tree.iter() {
        if !values.truthy(name) {
            continue;
        }
        for package in &node.side_effects().packages {
            let save_flag = if package.dev { "--save-dev" } else { "--save" };
            if !run_npm(&["install", save_flag, package.name], target_dir).await? {
                failures += 1;
            }
        }
    }

    Ok(failures)
}

/// Run one npm invocation in the target directory; false means npm ran but
/// exited non-zero
async fn run_npm(args: &[&str], cwd: &Path) -> Result<bool> {
    let status = Command::new("npm")
        .args(args)
        .current_dir(cwd)
        .status()
        .await
        .with_context(|| format!("Failed to launch npm {}", args.join(" ")))?;

    if !status.success() {
        eprintln!(
            "{} npm {} exited with {}",
            "Warning:".yellow(),
            args.join(" "),
            status.code().unwrap_or(-1)
        );
    }

    Ok(status.success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{Module, ModuleNode, PackageSpec, SideEffects};
    use crate::resolve::ResolvedEntry;

    #[test]
    fn test_packages_of_falsy_nodes_are_not_selected() {
        // The selection logic is the part worth testing without spawning npm
        let tree = ModuleTree::new(vec![(
            "s3",
            ModuleNode::Module(Module::new("S3 (y/N)?").side_effects(SideEffects {
                copy_tasks: vec![],
                packages: vec![PackageSpec {
                    name: "@aws-sdk/client-s3",
                    dev: false,
                }],
            })),
        )])
        .unwrap();
        let values = ResolvedSet::new(vec![ResolvedEntry::module(
            "s3",
            false,
            ResolvedSet::default(),
        )]);

        let selected: Vec<&str> = tree
            .iter()
            .filter(|(name, _)| values.truthy(name))
            .flat_map(|(_, node)| node.side_effects().packages.iter())
            .map(|package| package.name)
            .collect();

        assert!(selected.is_empty());
    }
}

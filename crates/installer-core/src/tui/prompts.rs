//! The interactive install pipeline, built on cliclack

use crate::config;
use crate::resolve::{resolve, PromptKind, PromptSpec, Prompter, RawAnswer, ResolvedSet};
use crate::runtime;
use crate::setup::{packages, patch, process};
use crate::templates::{copier, manifest, version};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for an install run
#[derive(Debug, Clone, Default)]
pub struct InstallArgs {
    /// Local directory to use as the template instead of the bundled one
    pub template_dir: Option<PathBuf>,

    /// Directory to install into (prompted for when omitted)
    pub directory: Option<PathBuf>,

    /// Skip npm package installation
    pub skip_install: bool,

    /// Auto-confirm the non-empty-directory warning
    pub yes: bool,
}

/// Prompter backed by cliclack widgets: free-text questions become inputs,
/// yes-no questions become confirms
pub struct CliPrompter;

impl Prompter for CliPrompter {
    fn ask(&mut self, spec: &PromptSpec) -> Result<RawAnswer> {
        match &spec.kind {
            PromptKind::FreeText { default } => {
                let mut input = cliclack::input(&spec.text);
                if let Some(default) = default {
                    input = input.default_input(default);
                }
                let answer: String = input.interact()?;
                Ok(RawAnswer::Text(answer))
            }
            PromptKind::YesNo { default } => {
                let answer = cliclack::confirm(&spec.text)
                    .initial_value(*default)
                    .interact()?;
                Ok(RawAnswer::Flag(answer))
            }
        }
    }

    fn reject(&mut self, message: &str) -> Result<()> {
        cliclack::log::error(message)?;
        Ok(())
    }
}

/// Run the installer end to end with interactive prompts
pub async fn run(args: InstallArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("Microservice installer")?;

    // Step 1: Locate the template and check compatibility
    let template_dir = manifest::locate_template_dir(args.template_dir.clone())?;
    let template = manifest::load_manifest(&template_dir).await?;
    cliclack::log::info(format!(
        "Template: {} - {}",
        template.name, template.description
    ))?;

    if let Some(warning) = version::check_compatibility(cli_version, &template.version) {
        cliclack::log::warning(warning.lines().next().unwrap_or(&warning))?;
    }

    // Step 2: Select the target directory
    let target_dir = select_directory(&args)?;
    confirm_overwrite(&target_dir, args.yes)?;

    // Step 3: Resolve the module tree interactively
    let tree = config::module_tree()?;
    let values = resolve(&tree, &mut CliPrompter)?;

    // Step 4: Copy and rename template files
    let spinner = cliclack::spinner();
    spinner.start("Copying files...");
    let copied = copier::run_copy_tasks(&tree, &values, &template_dir, &target_dir).await?;
    copier::rename_files(&values, &target_dir).await?;
    spinner.stop(format!(
        "Copied {} files to {}",
        copied,
        target_dir.display()
    ));

    // Step 5: Customize the copied tree
    let spinner = cliclack::spinner();
    spinner.start("Customizing files...");
    patch::update_package_json(&values, &target_dir).await?;
    let changed = process::process_files(&values, &target_dir).await?;
    spinner.stop(format!("Customized {} files", changed));

    // Step 6: Install packages
    if args.skip_install {
        cliclack::log::info("Skipping package installation")?;
    } else {
        install_step(&tree, &values, &target_dir).await?;
    }

    // Step 7: Show next steps
    print_next_steps(&target_dir)?;
    cliclack::outro("Microservice setup finished!")?;

    Ok(())
}

fn select_directory(args: &InstallArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let path = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", path.display()))?;
        path
    } else {
        let input: String = cliclack::input("Install directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            let path = PathBuf::from(&input);
            if path.is_absolute() {
                path
            } else {
                current_dir.join(path)
            }
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    Ok(path)
}

/// Warn before installing into a directory that already has content
fn confirm_overwrite(target_dir: &Path, yes: bool) -> Result<()> {
    if !target_dir.is_dir() {
        return Ok(());
    }
    let count = std::fs::read_dir(target_dir)?.count();
    if count == 0 {
        return Ok(());
    }

    cliclack::log::warning(format!(
        "Directory has {} existing items; files may be overwritten",
        count
    ))?;

    let proceed = if yes {
        true
    } else {
        cliclack::confirm("Proceed anyway?")
            .initial_value(false)
            .interact()?
    };

    if !proceed {
        anyhow::bail!("Install aborted.");
    }

    Ok(())
}

async fn install_step(
    tree: &crate::modules::ModuleTree,
    values: &ResolvedSet,
    target_dir: &Path,
) -> Result<()> {
    let runtimes = runtime::check_runtimes();
    let summary: Vec<String> = runtimes
        .iter()
        .map(|runtime| {
            if runtime.available {
                format!(
                    "{} ({})",
                    runtime.name,
                    runtime.version.as_deref().unwrap_or("unknown")
                )
            } else {
                format!("{} (not installed)", runtime.name)
            }
        })
        .collect();
    cliclack::log::info(format!("Detected runtimes: {}", summary.join(", ")))?;

    if runtimes.iter().any(|runtime| !runtime.available) {
        cliclack::log::warning(
            "Node.js and npm are required to install packages; skipping installation",
        )?;
        return Ok(());
    }

    cliclack::log::info("Installing packages...")?;
    let failures = packages::install_packages(tree, values, target_dir).await?;
    if failures == 0 {
        cliclack::log::success("Packages installed")?;
    } else {
        cliclack::log::warning(format!(
            "Package installation finished with {} failed command(s)",
            failures
        ))?;
    }

    Ok(())
}

fn print_next_steps(target_dir: &Path) -> Result<()> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();

    if current.as_deref() != Some(target_dir) {
        steps.push(format!("cd {}", target_dir.display()));
    }
    steps.push("npm test".to_string());
    steps.push("Open README.md to get started".to_string());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    Ok(())
}

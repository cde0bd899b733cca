//! Installer Core - library behind the `ms-tools` microservice installer
//!
//! The installer walks an interactive question tree to pick optional feature
//! modules, then copies, renames and rewrites a template tree into a target
//! directory. This crate holds both the decision engine and the plumbing
//! around it.
//!
//! # Architecture
//!
//! The crate is organized into layers:
//!
//! - **Engine** - `modules` (the declarative tree), `resolve` (interactive
//!   resolution into a value snapshot), `rewrite` (conditional template
//!   rewriting driven by that snapshot)
//! - **Plumbing** - `templates` (manifest, copying, renames), `setup`
//!   (package.json patching, file processing, npm installs), `runtime`
//!   (Node.js/npm detection)
//! - **Interface** - `tui`, optional cliclack-based prompts and the
//!   end-to-end `run` pipeline (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use installer_core::{config, resolve::resolve, rewrite::rewrite};
//!
//! let tree = config::module_tree()?;
//! let values = resolve(&tree, &mut my_prompter)?;
//! let output = rewrite(&template_text, &values, "///");
//! ```

pub mod config;
pub mod modules;
pub mod resolve;
pub mod rewrite;
pub mod runtime;
pub mod setup;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use modules::{ModuleNode, ModuleTree, TreeError};
pub use resolve::{resolve, Prompter, ResolvedSet, ResolvedValue};
pub use rewrite::{policy, rewrite};
pub use templates::{load_manifest, locate_template_dir, TemplateManifest};

#[cfg(feature = "tui")]
pub use tui::run;

/// Installer version used for template compatibility checking when the
/// binary does not supply its own
pub const DEFAULT_CLI_VERSION: &str = "0.1.0";

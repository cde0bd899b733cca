//! Template location, manifest parsing, and copy plumbing
//!
//! This module provides:
//! - The template manifest type and directory resolution
//! - Copy-task execution and post-copy renames
//! - Recursive file enumeration with exact-name ignores
//! - Version compatibility checking

pub mod copier;
pub mod manifest;
pub mod version;

pub use copier::{list_files, rename_files, run_copy_tasks};
pub use manifest::{load_manifest, locate_template_dir, TemplateManifest};
pub use version::check_compatibility;

//! Post-copy customization of the generated project
//!
//! Runs after the template files land in the target directory:
//! - `patch` rewrites package.json with the resolved name and description
//! - `process` pushes every processable file through the template rewriter
//! - `packages` installs the npm dependency set

pub mod packages;
pub mod patch;
pub mod process;

pub use packages::install_packages;
pub use patch::update_package_json;
pub use process::process_files;

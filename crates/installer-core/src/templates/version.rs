//! Version comparison for installer and template compatibility

use semver::Version;

/// Compare the installer version against the template's declared version.
/// Returns a warning message when the installer is older than the template
/// expects; unparseable versions skip the check entirely.
pub fn check_compatibility(cli_version: &str, template_version: &str) -> Option<String> {
    let cli = Version::parse(cli_version).ok()?;
    let template = Version::parse(template_version).ok()?;

    if cli < template {
        Some(format!(
            "This template expects installer version {} or newer; you are running {}.\n\
             Consider updating: cargo install ms-tools --force",
            template_version, cli_version
        ))
    } else {
        None
    }
}

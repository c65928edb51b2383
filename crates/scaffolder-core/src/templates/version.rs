//! Version comparison between the CLI and the template it emits

use anyhow::Result;
use semver::Version;

/// Parse a version string, accepting a leading `v`
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Warn when the template expects a newer CLI than the one running
pub fn check_compatibility(cli_version: &str, template_version: &str) -> Option<String> {
    // Unparseable versions can't be compared; stay quiet
    let cli_ver = parse_version(cli_version).ok()?;
    let template_ver = parse_version(template_version).ok()?;

    if cli_ver < template_ver {
        Some(format!(
            "This template was designed for generator version {} or newer. \
             You are running version {}.",
            template_version, cli_version
        ))
    } else {
        None
    }
}

//! Product configuration trait for CLI binaries
//!
//! Package metadata and locations the generator would otherwise pick up from the
//! process environment are supplied explicitly through this trait.

use std::path::Path;

/// Configuration trait for a generator binary
///
/// The binary implements this trait to define:
/// - Product identity (display name, version)
/// - Where the bundled template lives and how to override it
/// - Where answers are persisted
/// - Welcome banner and post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Generator version, shown in the banner and checked against the template
    fn version(&self) -> &'static str;

    /// Template root used when no override is given
    fn default_template_dir(&self) -> &'static str;

    /// Environment variable name for overriding the template root
    fn template_dir_env(&self) -> &'static str;

    /// File in the project root holding the previous run's answers
    fn store_file(&self) -> &'static str {
        ".polymer-cordova.yaml"
    }

    /// Banner shown before the first-run prompts
    fn welcome_message(&self) -> String;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, platforms: &[String]) -> Vec<String>;
}

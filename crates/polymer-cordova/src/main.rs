//! polymer-cordova - Polymer starter kit generator flavored with Cordova

use clap::Parser;
use scaffolder_core::tui::GenerateArgs;
use scaffolder_core::ProductConfig;
use std::path::{Path, PathBuf};

/// CLI version - shown in the welcome banner and checked against the template
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Starter kit bundled with this repository
const BUNDLED_TEMPLATE_DIR: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/polymer-cordova-starter-kit"
);

/// polymer-cordova product configuration
#[derive(Clone)]
pub struct PolymerCordovaConfig;

impl ProductConfig for PolymerCordovaConfig {
    fn display_name(&self) -> &'static str {
        "Polymer Cordova"
    }

    fn version(&self) -> &'static str {
        CLI_VERSION
    }

    fn default_template_dir(&self) -> &'static str {
        BUNDLED_TEMPLATE_DIR
    }

    fn template_dir_env(&self) -> &'static str {
        "POLYMER_CORDOVA_TEMPLATE_DIR"
    }

    fn welcome_message(&self) -> String {
        format!(
            "Welcome to the Polymer generator flavored with Cordova! v.{}\n\
             Out of the box I include Polymer Cordova Starter Kit",
            CLI_VERSION
        )
    }

    fn next_steps(&self, dir: &Path, platforms: &[String]) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_ref() != Some(&dir.to_path_buf()) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Serve the web app
        steps.push("gulp serve".to_string());

        // Step 3: Run on each selected platform
        for platform in platforms {
            steps.push(format!("gulp && cordova run {}", platform));
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "polymer-cordova")]
#[command(about = "Scaffold a Polymer app flavored with Cordova")]
#[command(version)]
pub struct Args {
    /// Project directory (must be empty on the first run)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local template directory to use instead of the bundled starter kit (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Project name; skips the name prompt
    #[arg(long = "app-name")]
    pub app_name: Option<String>,

    /// Skip dependency installation
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Don't print the install commands
    #[arg(long = "skip-install-message")]
    pub skip_install_message: bool,

    /// Don't add the selected platforms and plugins
    #[arg(long = "skip-sdk")]
    pub skip_sdk: bool,

    /// Don't show the welcome banner
    #[arg(long = "skip-welcome-message")]
    pub skip_welcome_message: bool,
}

impl From<Args> for GenerateArgs {
    fn from(args: Args) -> Self {
        GenerateArgs {
            directory: args.directory,
            template_dir: args.template_dir,
            app_name: args.app_name,
            skip_install: args.skip_install,
            skip_install_message: args.skip_install_message,
            skip_sdk: args.skip_sdk,
            skip_welcome_message: args.skip_welcome_message,
        }
    }
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = PolymerCordovaConfig;

    let result = scaffolder_core::run(&config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    // run() reports its own failures
    if result.is_err() {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_generator_flags() {
        let args = Args::parse_from([
            "polymer-cordova",
            "--skip-install",
            "--skip-sdk",
            "--app-name=HelloApp",
        ]);
        assert!(args.skip_install);
        assert!(args.skip_sdk);
        assert!(!args.skip_install_message);
        assert_eq!(args.app_name.as_deref(), Some("HelloApp"));

        let generate: GenerateArgs = args.into();
        assert!(generate.directory.is_none());
    }

    #[test]
    fn test_next_steps_list_platforms() {
        let steps = PolymerCordovaConfig.next_steps(
            Path::new("/tmp/definitely-not-cwd"),
            &["ios".to_string(), "android".to_string()],
        );
        assert_eq!(steps[0], "cd /tmp/definitely-not-cwd");
        assert!(steps.contains(&"gulp && cordova run android".to_string()));
    }

    #[test]
    fn test_bundled_template_exists() {
        assert!(Path::new(BUNDLED_TEMPLATE_DIR).join("gulpfile.js").is_file());
    }
}

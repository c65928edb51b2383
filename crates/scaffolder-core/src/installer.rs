//! Dependency installation for the generated project

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use tokio::process::Command as TokioCommand;

/// Flags passed through from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Do not run the package managers
    pub skip_install: bool,

    /// Do not print which commands run (or need to be run)
    pub skip_message: bool,
}

/// Installs the generated project's dependencies
#[allow(async_fn_in_trait)]
pub trait DependencyInstaller {
    async fn install(&self, dir: &Path, options: InstallOptions) -> Result<()>;
}

/// Runs `npm install` followed by `bower install`
#[derive(Debug, Clone)]
pub struct NpmBowerInstaller {
    commands: Vec<&'static str>,
}

impl Default for NpmBowerInstaller {
    fn default() -> Self {
        Self {
            commands: vec!["npm", "bower"],
        }
    }
}

impl NpmBowerInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Human-readable command chain, e.g. `npm install && bower install`
    pub fn command_line(&self) -> String {
        self.commands
            .iter()
            .map(|c| format!("{} install", c))
            .collect::<Vec<_>>()
            .join(" && ")
    }

    /// What to tell the user before (or instead of) installing
    pub fn message(&self, options: InstallOptions) -> Option<String> {
        if options.skip_message {
            return None;
        }
        let cmd = self.command_line();
        Some(if options.skip_install {
            format!(
                "I'm all done. Just run {} to install the required dependencies.",
                cmd.yellow().bold()
            )
        } else {
            format!(
                "I'm all done. Running {} for you to install the required dependencies. \
                 If this fails, try running the command yourself.",
                cmd.yellow().bold()
            )
        })
    }
}

impl DependencyInstaller for NpmBowerInstaller {
    async fn install(&self, dir: &Path, options: InstallOptions) -> Result<()> {
        if let Some(message) = self.message(options) {
            println!();
            println!("{}", message);
            println!();
        }
        if options.skip_install {
            return Ok(());
        }

        for command in &self.commands {
            let status = TokioCommand::new(command)
                .arg("install")
                .current_dir(dir)
                .status()
                .await
                .with_context(|| format!("Failed to run {} install", command))?;
            if !status.success() {
                anyhow::bail!(
                    "{} install exited with code {}",
                    command,
                    status.code().unwrap_or(-1)
                );
            }
        }
        Ok(())
    }
}

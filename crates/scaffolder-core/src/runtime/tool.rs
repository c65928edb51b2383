//! Project tool: creates the Cordova project and registers platforms and plugins
//!
//! [`CordovaCli`] drives the `cordova` command line tool, streaming its output so the
//! user can follow long-running platform and plugin installs.

use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::VecDeque;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Stderr lines kept for the error of a failed invocation
const STDERR_TAIL: usize = 10;

/// Operations the generator needs from the native project tool
///
/// Each call completes (or fails) before the next one is issued.
#[allow(async_fn_in_trait)]
pub trait ProjectTool {
    /// Create a new project at `path`. The directory must be empty or missing.
    async fn create(&self, path: &Path, id: &str, name: &str) -> Result<()>;

    /// Add all `names` in one batch; `persist` records them in the project manifest
    async fn add_platforms(&self, project: &Path, names: &[String], persist: bool) -> Result<()>;

    /// Add all `names` in one batch; `persist` records them in the project manifest
    async fn add_plugins(&self, project: &Path, names: &[String], persist: bool) -> Result<()>;
}

/// Configuration for the cordova binary
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "cordova")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Command that installs the tool
    pub install_command: &'static str,
}

/// [`ProjectTool`] backed by the `cordova` CLI
pub struct CordovaCli {
    config: ToolConfig,
}

impl CordovaCli {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Run the tool with `args` in `cwd`, streaming output, and fail on a non-zero exit
    async fn run(&self, cwd: &Path, args: &[String]) -> Result<()> {
        let display = format!("{} {}", self.config.name, args.join(" "));
        println!("{} {}", "Running:".dimmed(), display.yellow());

        let mut child = TokioCommand::new(self.config.name)
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to start {}. Install it with: {}",
                    self.config.display_name, self.config.install_command
                )
            })?;

        let stdout = child.stdout.take().context("Failed to capture stdout")?;
        let stderr = child.stderr.take().context("Failed to capture stderr")?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();
        let mut stdout_open = true;
        let mut stderr_open = true;
        let mut stderr_tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL);

        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout_reader.next_line(), if stdout_open => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => stdout_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            stdout_open = false;
                        }
                    }
                }
                line = stderr_reader.next_line(), if stderr_open => {
                    match line {
                        Ok(Some(line)) => {
                            eprintln!("  {}", line.yellow());
                            if stderr_tail.len() == STDERR_TAIL {
                                stderr_tail.pop_front();
                            }
                            stderr_tail.push_back(line);
                        }
                        Ok(None) => stderr_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_open = false;
                        }
                    }
                }
            }
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for {}", display))?;
        if !status.success() {
            let mut message = format!(
                "`{}` exited with code {}",
                display,
                status.code().unwrap_or(-1)
            );
            let tail: Vec<&str> = stderr_tail
                .iter()
                .map(|l| l.trim_end())
                .filter(|l| !l.is_empty())
                .collect();
            if !tail.is_empty() {
                message.push_str(":\n");
                message.push_str(&tail.join("\n"));
            }
            anyhow::bail!(message);
        }
        Ok(())
    }
}

/// Arguments for a batched `platform add` / `plugin add`
fn add_args(kind: &str, names: &[String], persist: bool) -> Vec<String> {
    let mut args = vec![kind.to_string(), "add".to_string()];
    args.extend(names.iter().cloned());
    if persist {
        args.push("--save".to_string());
    }
    args
}

impl ProjectTool for CordovaCli {
    async fn create(&self, path: &Path, id: &str, name: &str) -> Result<()> {
        // cordova creates the leaf directory itself, so run from its parent
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let target = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string());
        let args = vec![
            "create".to_string(),
            target,
            id.to_string(),
            name.to_string(),
        ];
        self.run(parent, &args).await
    }

    async fn add_platforms(&self, project: &Path, names: &[String], persist: bool) -> Result<()> {
        self.run(project, &add_args("platform", names, persist)).await
    }

    async fn add_plugins(&self, project: &Path, names: &[String], persist: bool) -> Result<()> {
        self.run(project, &add_args("plugin", names, persist)).await
    }
}

/// Pre-configured project tool for cordova
pub fn cordova_tool() -> CordovaCli {
    CordovaCli::new(ToolConfig {
        name: "cordova",
        display_name: "Cordova",
        install_command: "npm install -g cordova",
    })
}

//! Test doubles for the generator's collaborators

use crate::catalog::Choice;
use crate::error::ValidationError;
use crate::installer::{DependencyInstaller, InstallOptions};
use crate::runtime::tool::ProjectTool;
use crate::ui::{Ui, Validator};
use anyhow::{bail, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Ui that answers prompts from queues and records everything it was asked to print
#[derive(Default)]
pub struct ScriptedUi {
    inputs: VecDeque<String>,
    confirms: VecDeque<bool>,
    selections: VecDeque<Vec<String>>,
    rejections: Vec<ValidationError>,
    prompts: usize,
    messages: RefCell<Vec<String>>,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs<const N: usize>(mut self, inputs: [&str; N]) -> Self {
        self.inputs.extend(inputs.iter().map(|s| s.to_string()));
        self
    }

    pub fn with_confirms<const N: usize>(mut self, confirms: [bool; N]) -> Self {
        self.confirms.extend(confirms);
        self
    }

    pub fn with_selections<const N: usize>(mut self, selections: [Vec<&str>; N]) -> Self {
        self.selections.extend(
            selections
                .into_iter()
                .map(|s| s.into_iter().map(String::from).collect::<Vec<_>>()),
        );
        self
    }

    pub fn rejections(&self) -> Vec<ValidationError> {
        self.rejections.clone()
    }

    /// Number of prompts that were shown (a re-prompt counts once)
    pub fn prompt_count(&self) -> usize {
        self.prompts
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|m| m.contains(needle))
    }

    fn record(&self, kind: &str, message: &str) -> Result<()> {
        self.messages
            .borrow_mut()
            .push(format!("{}: {}", kind, message));
        Ok(())
    }
}

impl Ui for ScriptedUi {
    fn intro(&self, title: &str) -> Result<()> {
        self.record("intro", title)
    }

    fn note(&self, title: &str, body: &str) -> Result<()> {
        self.record("note", &format!("{}\n{}", title, body))
    }

    fn info(&self, message: &str) -> Result<()> {
        self.record("info", message)
    }

    fn success(&self, message: &str) -> Result<()> {
        self.record("success", message)
    }

    fn warning(&self, message: &str) -> Result<()> {
        self.record("warning", message)
    }

    fn error(&self, message: &str) -> Result<()> {
        self.record("error", message)
    }

    fn outro(&self, message: &str) -> Result<()> {
        self.record("outro", message)
    }

    fn input(&mut self, prompt: &str, validate: Validator) -> Result<String> {
        self.prompts += 1;
        loop {
            let Some(answer) = self.inputs.pop_front() else {
                bail!("no scripted input left for '{}'", prompt);
            };
            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(e) => self.rejections.push(e),
            }
        }
    }

    fn confirm(&mut self, prompt: &str, default: Option<bool>) -> Result<bool> {
        self.prompts += 1;
        match self.confirms.pop_front().or(default) {
            Some(answer) => Ok(answer),
            None => bail!("no scripted confirmation left for '{}'", prompt),
        }
    }

    fn multiselect(&mut self, prompt: &str, choices: &[Choice]) -> Result<Vec<String>> {
        self.prompts += 1;
        let Some(selected) = self.selections.pop_front() else {
            bail!("no scripted selection left for '{}'", prompt);
        };
        for value in &selected {
            if !choices.iter().any(|c| &c.value == value) {
                bail!("'{}' is not a choice of '{}'", value, prompt);
            }
        }
        Ok(selected)
    }
}

/// Recorded call to the project tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    Create {
        path: PathBuf,
        id: String,
        name: String,
    },
    AddPlatforms(Vec<String>, bool),
    AddPlugins(Vec<String>, bool),
}

/// Project tool that writes a minimal config.xml and can be told to fail one operation
#[derive(Clone, Default)]
pub struct FakeTool {
    calls: Arc<Mutex<Vec<ToolCall>>>,
    fail_on: Option<&'static str>,
}

impl FakeTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the operation named `create`, `platforms` or `plugins`
    pub fn failing_on(step: &'static str) -> Self {
        Self {
            fail_on: Some(step),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, step: &str) -> Result<()> {
        if self.fail_on == Some(step) {
            bail!("simulated {} failure", step);
        }
        Ok(())
    }
}

impl ProjectTool for FakeTool {
    async fn create(&self, path: &Path, id: &str, name: &str) -> Result<()> {
        self.calls.lock().unwrap().push(ToolCall::Create {
            path: path.to_path_buf(),
            id: id.to_string(),
            name: name.to_string(),
        });
        self.check("create")?;
        tokio::fs::create_dir_all(path).await?;
        let config = format!(
            "<?xml version='1.0' encoding='utf-8'?>\n<widget id=\"{}\" version=\"0.0.1\">\n    <name>{}</name>\n</widget>\n",
            id, name
        );
        tokio::fs::write(path.join("config.xml"), config).await?;
        tokio::fs::create_dir_all(path.join("www")).await?;
        Ok(())
    }

    async fn add_platforms(&self, _project: &Path, names: &[String], persist: bool) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(ToolCall::AddPlatforms(names.to_vec(), persist));
        self.check("platforms")
    }

    async fn add_plugins(&self, _project: &Path, names: &[String], persist: bool) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(ToolCall::AddPlugins(names.to_vec(), persist));
        self.check("plugins")
    }
}

/// Installer that only remembers the options it was called with
#[derive(Clone, Default)]
pub struct RecordingInstaller {
    calls: Arc<Mutex<Vec<InstallOptions>>>,
}

impl RecordingInstaller {
    pub fn calls(&self) -> Vec<InstallOptions> {
        self.calls.lock().unwrap().clone()
    }
}

impl DependencyInstaller for RecordingInstaller {
    async fn install(&self, _dir: &Path, options: InstallOptions) -> Result<()> {
        self.calls.lock().unwrap().push(options);
        Ok(())
    }
}

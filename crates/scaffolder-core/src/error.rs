//! Error taxonomy for the scaffolding workflow

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Input rejected by a prompt validator. The prompt is shown again with this message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a name")]
    EmptyAppName,

    #[error("Please enter a valid bundle identifier! E.g. com.company.project")]
    InvalidAppId,
}

/// External tool operation that can fail during orchestration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStep {
    Create,
    AddPlatforms,
    AddPlugins,
}

impl fmt::Display for ToolStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToolStep::Create => "create project",
            ToolStep::AddPlatforms => "add platforms",
            ToolStep::AddPlugins => "add plugins",
        };
        f.write_str(name)
    }
}

/// Errors that end a generator run
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(
        "Non-empty directory. Cordova needs an empty directory to set up project \
         ({} has {entries} existing items)",
        .dir.display()
    )]
    NonEmptyDirectory { dir: PathBuf, entries: usize },

    #[error("Could not {step}: {cause:#}")]
    ExternalTool { step: ToolStep, cause: anyhow::Error },

    #[error("Template error: {0:#}")]
    Template(anyhow::Error),

    #[error("Prompt failed: {0:#}")]
    Prompt(anyhow::Error),

    #[error("Answer store error: {0:#}")]
    Store(anyhow::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScaffoldError {
    /// Whether the run should terminate the process (everything except validation)
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ScaffoldError::Validation(_))
    }
}

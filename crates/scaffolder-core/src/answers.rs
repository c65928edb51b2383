//! Answer collection and validation
//!
//! Produces the [`AnswerRecord`] a generator run works from. On an update run the
//! record persisted by the previous run is reused as-is and no prompt is shown.

use crate::catalog::Catalog;
use crate::error::{ScaffoldError, ValidationError};
use crate::ui::Ui;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Reverse-domain bundle identifier, e.g. `com.company.project`
const APP_ID_PATTERN: &str = r"(?i)^[a-z][a-z0-9_]*(\.[a-z0-9_]+)+$";

fn app_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(APP_ID_PATTERN).expect("bundle identifier pattern is valid"))
}

/// Validate a project name
pub fn validate_app_name(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        Err(ValidationError::EmptyAppName)
    } else {
        Ok(())
    }
}

/// Validate a bundle identifier
pub fn validate_app_id(input: &str) -> Result<(), ValidationError> {
    if app_id_regex().is_match(input) {
        Ok(())
    } else {
        Err(ValidationError::InvalidAppId)
    }
}

/// Whether this invocation creates a new project or refreshes an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    FirstRun,
    UpdateRun,
}

impl RunMode {
    pub fn from_prior(prior: Option<&AnswerRecord>) -> Self {
        if prior.is_some() {
            RunMode::UpdateRun
        } else {
            RunMode::FirstRun
        }
    }
}

/// Everything the user chose for this project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    /// Displayed below the app icon
    pub app_name: String,

    /// Bundle identifier
    pub app_id: String,

    /// Include web-component-tester and its test suite
    pub include_test_tooling: bool,

    /// Include the recipe docs
    #[serde(default)]
    pub include_extra_docs: bool,

    #[serde(default)]
    pub platforms: Vec<String>,

    #[serde(default)]
    pub plugins: Vec<String>,
}

impl AnswerRecord {
    /// Build a record, checking the name and bundle identifier and dropping duplicate
    /// platforms and plugins (first occurrence wins)
    pub fn new(
        app_name: impl Into<String>,
        app_id: impl Into<String>,
        include_test_tooling: bool,
        include_extra_docs: bool,
        platforms: Vec<String>,
        plugins: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let record = Self {
            app_name: app_name.into(),
            app_id: app_id.into(),
            include_test_tooling,
            include_extra_docs,
            platforms: dedup(platforms),
            plugins: dedup(plugins),
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_app_name(&self.app_name)?;
        validate_app_id(&self.app_id)
    }
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(items.len());
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// Number of entries in `dir`; a directory that does not exist yet counts as empty
pub fn count_entries(dir: &Path) -> std::io::Result<usize> {
    match std::fs::read_dir(dir) {
        Ok(entries) => Ok(entries.count()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(e),
    }
}

/// Refuse to start a first run in a directory that already has files
pub fn ensure_empty_destination(dir: &Path, mode: RunMode) -> Result<(), ScaffoldError> {
    if mode == RunMode::UpdateRun {
        return Ok(());
    }
    let entries = count_entries(dir)?;
    if entries > 0 {
        return Err(ScaffoldError::NonEmptyDirectory {
            dir: dir.to_path_buf(),
            entries,
        });
    }
    Ok(())
}

/// Ask for every answer not already known
///
/// `preset_app_name` comes from `--app-name`; when it is non-empty the name prompt is skipped.
pub fn prompt_answers<U: Ui>(
    ui: &mut U,
    catalog: &Catalog,
    preset_app_name: Option<&str>,
) -> anyhow::Result<AnswerRecord> {
    let app_name = match preset_app_name.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => ui.input(
            "State a name for your project (this name will be displayed below the app icon)",
            validate_app_name,
        )?,
    };

    let app_id = ui.input(
        "State a bundle identifier for your project (e.g. com.company.project)",
        validate_app_id,
    )?;

    let include_test_tooling = ui.confirm("Would you like to include web-component-tester?", None)?;
    let include_extra_docs = ui.confirm("Would you like to include recipe docs?", Some(false))?;

    let platforms = ui.multiselect(
        "Select all platforms you want to support",
        &catalog.platforms,
    )?;
    let plugins = ui.multiselect(
        "Select all cordova plugins you want to install",
        &catalog.plugins,
    )?;

    Ok(AnswerRecord::new(
        app_name,
        app_id,
        include_test_tooling,
        include_extra_docs,
        platforms,
        plugins,
    )?)
}

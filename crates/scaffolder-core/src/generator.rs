//! Generator lifecycle and the Cordova project orchestrator
//!
//! A run walks a fixed pipeline:
//!
//! ```text
//! Idle -> Created -> PlatformsAdded -> PluginsAdded -> FilesEmitted -> DependenciesInstalled -> Done
//! ```
//!
//! A failure of the project tool moves the generator to [`Stage::Aborted`] and ends the run.
//! Nothing the tool already wrote is rolled back.

use crate::answers::{self, AnswerRecord, RunMode};
use crate::catalog::Catalog;
use crate::error::{ScaffoldError, ToolStep};
use crate::installer::{DependencyInstaller, InstallOptions};
use crate::runtime::tool::ProjectTool;
use crate::store::AnswerStore;
use crate::templates::{self, TemplateRules};
use crate::ui::Ui;
use std::path::PathBuf;

/// Where the orchestrator is in its pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Created,
    PlatformsAdded,
    PluginsAdded,
    FilesEmitted,
    DependenciesInstalled,
    Done,
    Aborted,
}

/// Lifecycle hooks, called in declaration order by [`run_generator`]
#[allow(async_fn_in_trait)]
pub trait Generator {
    /// Decide the run mode from the persisted answers and check preconditions
    fn initialize(&mut self, prior: Option<AnswerRecord>) -> Result<(), ScaffoldError>;

    fn collect_answers(&mut self) -> Result<(), ScaffoldError>;

    /// Drive the external project tool
    async fn orchestrate(&mut self) -> Result<(), ScaffoldError>;

    async fn emit_files(&mut self) -> Result<(), ScaffoldError>;

    /// Best effort; failures are reported, not returned
    async fn install_dependencies(&mut self);

    /// Called once everything else succeeded
    fn end(&mut self);

    /// Answers of this run, once collected
    fn answers(&self) -> Option<&AnswerRecord>;
}

/// Run every lifecycle step, stopping at the first error, then persist the answers
pub async fn run_generator<G: Generator>(
    generator: &mut G,
    store: &AnswerStore,
) -> Result<(), ScaffoldError> {
    let prior = store.load().map_err(ScaffoldError::Store)?;

    generator.initialize(prior)?;
    generator.collect_answers()?;
    generator.orchestrate().await?;
    generator.emit_files().await?;
    generator.install_dependencies().await;

    if let Some(answers) = generator.answers() {
        store.save(answers).map_err(ScaffoldError::Store)?;
    }
    generator.end();
    Ok(())
}

/// Explicit inputs of a generator run
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Project directory
    pub destination: PathBuf,

    /// Template root to emit from
    pub template_dir: PathBuf,

    /// Pre-supplied project name (`--app-name`)
    pub app_name: Option<String>,

    pub skip_install: bool,
    pub skip_install_message: bool,

    /// Do not add platforms or plugins even when selected
    pub skip_sdk: bool,

    pub skip_welcome_message: bool,
    pub welcome_message: String,

    /// Generator version, compared against the template's
    pub cli_version: String,
}

/// Generator that sets up a Cordova project and lays the starter kit over it
pub struct CordovaGenerator<T, I, U> {
    options: GeneratorOptions,
    tool: T,
    installer: I,
    ui: U,
    mode: RunMode,
    catalog: Catalog,
    rules: TemplateRules,
    answers: Option<AnswerRecord>,
    stage: Stage,
    emitted: Vec<String>,
}

impl<T, I, U> CordovaGenerator<T, I, U>
where
    T: ProjectTool,
    I: DependencyInstaller,
    U: Ui,
{
    pub fn new(options: GeneratorOptions, tool: T, installer: I, ui: U) -> Self {
        Self {
            options,
            tool,
            installer,
            ui,
            mode: RunMode::FirstRun,
            catalog: Catalog::default(),
            rules: TemplateRules::default(),
            answers: None,
            stage: Stage::Idle,
            emitted: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Paths written by the emission step, relative to the destination
    pub fn emitted(&self) -> &[String] {
        &self.emitted
    }

    fn collected(&self) -> Result<AnswerRecord, ScaffoldError> {
        self.answers
            .clone()
            .ok_or_else(|| ScaffoldError::Prompt(anyhow::anyhow!("answers were not collected")))
    }

    fn abort(&mut self, step: ToolStep, cause: anyhow::Error) -> ScaffoldError {
        self.stage = Stage::Aborted;
        // the tool error takes precedence over a failing terminal
        let _ = self
            .ui
            .error(&format!("Couldn't finish generator: \n{:#}", cause));
        ScaffoldError::ExternalTool { step, cause }
    }

    fn report(&self, message: &str) -> Result<(), ScaffoldError> {
        self.ui.success(message).map_err(ScaffoldError::Prompt)
    }

    fn log(&self, message: &str) -> Result<(), ScaffoldError> {
        self.ui.info(message).map_err(ScaffoldError::Prompt)
    }
}

impl<T, I, U> Generator for CordovaGenerator<T, I, U>
where
    T: ProjectTool,
    I: DependencyInstaller,
    U: Ui,
{
    fn initialize(&mut self, prior: Option<AnswerRecord>) -> Result<(), ScaffoldError> {
        self.mode = RunMode::from_prior(prior.as_ref());
        answers::ensure_empty_destination(&self.options.destination, self.mode)?;

        let template_dir = &self.options.template_dir;
        if !template_dir.is_dir() {
            return Err(ScaffoldError::Template(anyhow::anyhow!(
                "Template directory not found: {}",
                template_dir.display()
            )));
        }
        self.rules = TemplateRules::load(template_dir).map_err(ScaffoldError::Template)?;
        self.catalog = Catalog::load(template_dir).map_err(ScaffoldError::Template)?;

        if let Some(template_version) = &self.rules.version {
            if let Some(warning) =
                templates::check_compatibility(&self.options.cli_version, template_version)
            {
                self.ui
                    .warning(&format!("Version warning: {}", warning))
                    .map_err(ScaffoldError::Prompt)?;
            }
        }

        self.answers = prior;
        Ok(())
    }

    fn collect_answers(&mut self) -> Result<(), ScaffoldError> {
        if self.mode == RunMode::UpdateRun {
            return Ok(());
        }

        if !self.options.skip_welcome_message {
            self.ui
                .note("Welcome", &self.options.welcome_message)
                .map_err(ScaffoldError::Prompt)?;
        }

        let record = answers::prompt_answers(
            &mut self.ui,
            &self.catalog,
            self.options.app_name.as_deref(),
        )
        .map_err(ScaffoldError::Prompt)?;
        self.answers = Some(record);
        Ok(())
    }

    async fn orchestrate(&mut self) -> Result<(), ScaffoldError> {
        if self.mode == RunMode::UpdateRun {
            self.stage = Stage::PluginsAdded;
            return Ok(());
        }

        let answers = self.collected()?;
        let dest = self.options.destination.clone();

        let created = self
            .tool
            .create(&dest, &answers.app_id, &answers.app_name)
            .await;
        if let Err(e) = created {
            return Err(self.abort(ToolStep::Create, e));
        }
        self.stage = Stage::Created;
        self.report("Created cordova project")?;
        self.log(&format!("Platforms: {}", answers.platforms.join(", ")))?;
        self.log(&format!("Plugins: {}", answers.plugins.join(", ")))?;

        if !self.options.skip_sdk && !answers.platforms.is_empty() {
            let added = self.tool.add_platforms(&dest, &answers.platforms, true).await;
            if let Err(e) = added {
                return Err(self.abort(ToolStep::AddPlatforms, e));
            }
        }
        self.stage = Stage::PlatformsAdded;
        self.report(&format!("Added platforms: {}", answers.platforms.join(", ")))?;

        if !self.options.skip_sdk && !answers.plugins.is_empty() {
            let added = self.tool.add_plugins(&dest, &answers.plugins, true).await;
            if let Err(e) = added {
                return Err(self.abort(ToolStep::AddPlugins, e));
            }
        }
        self.stage = Stage::PluginsAdded;
        self.report(&format!("Added plugins: {}", answers.plugins.join(", ")))?;
        self.report(&format!(
            "Cordova project was set up successfully! Project Name: {}",
            answers.app_name
        ))?;
        Ok(())
    }

    async fn emit_files(&mut self) -> Result<(), ScaffoldError> {
        let answers = self.collected()?;
        let dest = &self.options.destination;

        let emitted =
            templates::emit_template(&self.options.template_dir, dest, &self.rules, &answers)
                .await
                .map_err(ScaffoldError::Template)?;

        self.stage = Stage::FilesEmitted;
        self.emitted = emitted;
        self.report(&format!(
            "Created {} files from {} in {}",
            self.emitted.len(),
            self.rules.name,
            dest.display()
        ))?;
        Ok(())
    }

    async fn install_dependencies(&mut self) {
        let options = InstallOptions {
            skip_install: self.options.skip_install,
            skip_message: self.options.skip_install_message,
        };
        if let Err(e) = self
            .installer
            .install(&self.options.destination, options)
            .await
        {
            let _ = self
                .ui
                .warning(&format!("Dependency installation failed: {:#}", e));
        }
        self.stage = Stage::DependenciesInstalled;
    }

    fn end(&mut self) {
        self.stage = Stage::Done;
    }

    fn answers(&self) -> Option<&AnswerRecord> {
        self.answers.as_ref()
    }
}

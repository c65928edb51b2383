//! Charm-style CLI prompts using cliclack

use crate::answers::{ensure_empty_destination, RunMode};
use crate::catalog::Choice;
use crate::error::ScaffoldError;
use crate::generator::{run_generator, CordovaGenerator, Generator, GeneratorOptions};
use crate::installer::NpmBowerInstaller;
use crate::product::ProductConfig;
use crate::runtime::{check_toolchain, cordova_tool, Toolchain};
use crate::store::AnswerStore;
use crate::ui::{Ui, Validator};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for a generator run
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Project directory (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Template root overriding the bundled starter kit
    pub template_dir: Option<PathBuf>,

    /// Pre-supplied project name
    pub app_name: Option<String>,

    pub skip_install: bool,
    pub skip_install_message: bool,
    pub skip_sdk: bool,
    pub skip_welcome_message: bool,
}

/// [`Ui`] rendered with cliclack
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackUi;

impl Ui for ClackUi {
    fn intro(&self, title: &str) -> Result<()> {
        Ok(cliclack::intro(title)?)
    }

    fn note(&self, title: &str, body: &str) -> Result<()> {
        Ok(cliclack::note(title, body)?)
    }

    fn info(&self, message: &str) -> Result<()> {
        Ok(cliclack::log::info(message)?)
    }

    fn success(&self, message: &str) -> Result<()> {
        Ok(cliclack::log::success(message)?)
    }

    fn warning(&self, message: &str) -> Result<()> {
        Ok(cliclack::log::warning(message)?)
    }

    fn error(&self, message: &str) -> Result<()> {
        Ok(cliclack::log::error(message)?)
    }

    fn outro(&self, message: &str) -> Result<()> {
        Ok(cliclack::outro(message)?)
    }

    fn input(&mut self, prompt: &str, validate: Validator) -> Result<String> {
        let value: String = cliclack::input(prompt)
            .validate(move |input: &String| validate(input))
            .interact()?;
        Ok(value)
    }

    fn confirm(&mut self, prompt: &str, default: Option<bool>) -> Result<bool> {
        let mut confirm = cliclack::confirm(prompt);
        if let Some(initial) = default {
            confirm = confirm.initial_value(initial);
        }
        Ok(confirm.interact()?)
    }

    fn multiselect(&mut self, prompt: &str, choices: &[Choice]) -> Result<Vec<String>> {
        if choices.is_empty() {
            return Ok(Vec::new());
        }

        let mut multi = cliclack::multiselect(prompt);
        for choice in choices {
            multi = multi.item(choice.value.clone(), &choice.name, &choice.value);
        }
        let checked: Vec<String> = choices
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.value.clone())
            .collect();

        let selected: Vec<String> = multi.initial_values(checked).required(false).interact()?;

        // keep catalog order regardless of selection order
        Ok(choices
            .iter()
            .filter(|c| selected.contains(&c.value))
            .map(|c| c.value.clone())
            .collect())
    }
}

/// Run the generator with interactive prompts
///
/// Every failure is reported to the terminal before it is returned.
pub async fn run<C: ProductConfig>(config: &C, args: GenerateArgs) -> Result<()> {
    let ui = ClackUi;
    let result = generate(config, &args, ui).await;

    if let Err(e) = &result {
        if let Some(message) = failure_message(e) {
            if ui.error(&message).is_err() {
                eprintln!("{}", message);
            }
        }
        let _ = cliclack::outro_cancel("Setup aborted");
    }
    result
}

async fn generate<C: ProductConfig>(config: &C, args: &GenerateArgs, ui: ClackUi) -> Result<()> {
    ui.intro(config.display_name())?;

    let destination = resolve_directory(args)?;
    let template_dir = resolve_template_dir(config, args);
    let store = AnswerStore::new(&destination, config.store_file());

    // Step 1: Refuse a non-empty first-run directory before anything else
    let first_run = guard_destination(&store, &destination)?;

    // Step 2: Check toolchain before touching anything on a first run
    if first_run && !args.skip_sdk {
        check_tools(&ui)?;
    }

    // Step 3: Run the generator pipeline
    let options = GeneratorOptions {
        destination: destination.clone(),
        template_dir,
        app_name: args.app_name.clone(),
        skip_install: args.skip_install,
        skip_install_message: args.skip_install_message,
        skip_sdk: args.skip_sdk,
        skip_welcome_message: args.skip_welcome_message,
        welcome_message: config.welcome_message(),
        cli_version: config.version().to_string(),
    };
    let mut generator = CordovaGenerator::new(options, cordova_tool(), NpmBowerInstaller::new(), ui);
    run_generator(&mut generator, &store).await?;

    // Step 4: Show next steps
    let platforms = generator
        .answers()
        .map(|a| a.platforms.clone())
        .unwrap_or_default();
    print_next_steps(&ui, config, &destination, &platforms)
}

/// Message to report for a failed run, `None` when the generator already logged it
fn failure_message(e: &anyhow::Error) -> Option<String> {
    match e.downcast_ref::<ScaffoldError>() {
        Some(ScaffoldError::ExternalTool { .. }) => None,
        _ => Some(format!("{:#}", e)),
    }
}

/// Load the persisted answers and reject a non-empty directory on a first run.
/// Returns whether this is a first run.
fn guard_destination(store: &AnswerStore, destination: &Path) -> Result<bool, ScaffoldError> {
    let prior = store.load().map_err(ScaffoldError::Store)?;
    let mode = RunMode::from_prior(prior.as_ref());
    ensure_empty_destination(destination, mode)?;
    Ok(mode == RunMode::FirstRun)
}

fn resolve_directory(args: &GenerateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    cliclack::log::info(format!("Project directory: {}", path.display()))?;
    Ok(path)
}

fn resolve_template_dir<C: ProductConfig>(config: &C, args: &GenerateArgs) -> PathBuf {
    if let Some(dir) = &args.template_dir {
        return dir.clone();
    }
    std::env::var(config.template_dir_env())
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(config.default_template_dir()))
}

fn check_tools(ui: &ClackUi) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking toolchain...");

    let results = check_toolchain(&Toolchain::all());
    let (available, missing): (Vec<_>, Vec<_>) = results.iter().partition(|r| r.available);

    let summary: Vec<String> = available.iter().map(|r| r.summary()).collect();
    spinner.stop(format!("Detected tools: {}", summary.join(", ")));

    for info in missing {
        ui.warning(&info.summary())?;
    }
    Ok(())
}

fn print_next_steps<C: ProductConfig>(
    ui: &ClackUi,
    config: &C,
    project_dir: &Path,
    platforms: &[String],
) -> Result<()> {
    let steps = config.next_steps(project_dir, platforms);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    ui.outro("Happy coding!")
}

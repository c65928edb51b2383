//! Scaffolder Core - Shared library for hybrid mobile project generators
//!
//! This library sets up a Cordova project and lays a Polymer starter kit over it.
//! The binary supplies product identity through [`ProductConfig`]; everything else
//! lives here.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Answer validation, template emission, toolchain detection
//! - **Layer 2: Workflow Orchestration** - The [`Generator`] lifecycle and [`CordovaGenerator`],
//!   talking to the outside world through the [`ProjectTool`], [`DependencyInstaller`] and
//!   [`Ui`] traits
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{run_generator, AnswerStore, CordovaGenerator, GeneratorOptions};
//!
//! let store = AnswerStore::new(&options.destination, ".polymer-cordova.yaml");
//! let mut generator = CordovaGenerator::new(options, my_tool, my_installer, my_ui);
//! run_generator(&mut generator, &store).await?;
//! ```

pub mod answers;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod installer;
pub mod product;
pub mod runtime;
pub mod store;
pub mod templates;
pub mod ui;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use answers::{validate_app_id, validate_app_name, AnswerRecord, RunMode};
pub use catalog::{Catalog, Choice};
pub use error::{ScaffoldError, ToolStep, ValidationError};
pub use generator::{run_generator, CordovaGenerator, Generator, GeneratorOptions, Stage};
pub use installer::{DependencyInstaller, InstallOptions, NpmBowerInstaller};
pub use product::ProductConfig;
pub use runtime::{CordovaCli, ProjectTool};
pub use store::AnswerStore;
pub use templates::{emit_template, TemplateRules};
pub use ui::Ui;

#[cfg(feature = "tui")]
pub use tui::run;

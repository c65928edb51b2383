//! Terminal collaborator: prompts and styled progress output
//!
//! The generator talks to the user only through [`Ui`]. The `tui` feature provides the
//! cliclack-backed implementation; tests drive the generator with a scripted one.

use crate::catalog::Choice;
use crate::error::ValidationError;
use anyhow::Result;

/// Validator applied to free-text input. Rejected input is asked for again.
pub type Validator = fn(&str) -> Result<(), ValidationError>;

pub trait Ui {
    fn intro(&self, title: &str) -> Result<()>;

    /// Boxed message with a title, used for the welcome banner
    fn note(&self, title: &str, body: &str) -> Result<()>;

    fn info(&self, message: &str) -> Result<()>;

    fn success(&self, message: &str) -> Result<()>;

    fn warning(&self, message: &str) -> Result<()>;

    fn error(&self, message: &str) -> Result<()>;

    fn outro(&self, message: &str) -> Result<()>;

    /// Free-text input. Must keep asking until `validate` accepts the answer.
    fn input(&mut self, prompt: &str, validate: Validator) -> Result<String>;

    /// Yes/no question; `default` pre-selects an answer
    fn confirm(&mut self, prompt: &str, default: Option<bool>) -> Result<bool>;

    /// Pick any number of `choices`; returns the selected values in choice order
    fn multiselect(&mut self, prompt: &str, choices: &[Choice]) -> Result<Vec<String>>;
}

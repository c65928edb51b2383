//! Template rules and emission
//!
//! This module provides:
//! - Template rules (`template.yaml`) describing optional test tooling and docs
//! - Emission of the template tree with conditional paths and content rewrites
//! - Version compatibility checking

pub mod copier;
pub mod manifest;
pub mod version;

pub use copier::{comment_requires, emit_template, strip_dependencies};
pub use manifest::{PathKind, Rewrite, TemplateRules, TestTooling};
pub use version::check_compatibility;

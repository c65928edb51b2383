//! Toolchain detection and the external project tool
//!
//! This module provides:
//! - Detection of the Node.js / Bower / Cordova toolchain
//! - The [`ProjectTool`] seam and its `cordova` CLI implementation

pub mod check;
pub mod tool;

pub use check::{check_tool, check_toolchain, RuntimeInfo, Toolchain};
pub use tool::{cordova_tool, CordovaCli, ProjectTool};

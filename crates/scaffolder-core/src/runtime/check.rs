//! Toolchain detection for Node.js, npm, Bower and Cordova

use std::fmt;
use std::process::Command;

/// Command line tools a generated project relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
    Node,
    Npm,
    Bower,
    Cordova,
}

impl Toolchain {
    pub fn binary(&self) -> &'static str {
        match self {
            Toolchain::Node => "node",
            Toolchain::Npm => "npm",
            Toolchain::Bower => "bower",
            Toolchain::Cordova => "cordova",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Toolchain::Node => "Node.js",
            Toolchain::Npm => "npm",
            Toolchain::Bower => "Bower",
            Toolchain::Cordova => "Cordova",
        }
    }

    /// Where to get the tool when it is missing
    pub fn install_hint(&self) -> &'static str {
        match self {
            Toolchain::Node | Toolchain::Npm => "install from https://nodejs.org",
            Toolchain::Bower => "npm install -g bower",
            Toolchain::Cordova => "npm install -g cordova",
        }
    }

    pub fn all() -> [Toolchain; 4] {
        [
            Toolchain::Node,
            Toolchain::Npm,
            Toolchain::Bower,
            Toolchain::Cordova,
        ]
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Detection result for one tool
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub tool: Toolchain,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// One-line summary, e.g. `Node.js (v20.11.0)` or `Bower (not installed: npm install -g bower)`
    pub fn summary(&self) -> String {
        if self.available {
            format!(
                "{} ({})",
                self.tool,
                self.version.as_deref().unwrap_or("unknown")
            )
        } else {
            format!("{} (not installed: {})", self.tool, self.tool.install_hint())
        }
    }
}

/// Check whether `tool` answers `--version`
pub fn check_tool(tool: Toolchain) -> RuntimeInfo {
    check_binary(tool, tool.binary())
}

fn check_binary(tool: Toolchain, binary: &str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                tool,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            tool,
            version: None,
            available: false,
        },
    }
}

/// Detect every tool in `tools`. Missing tools are reported, never fatal.
pub fn check_toolchain(tools: &[Toolchain]) -> Vec<RuntimeInfo> {
    tools.iter().map(|t| check_tool(*t)).collect()
}

//! Template rules (template.yaml) and path classification

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the rules file at the template root
pub const RULES_FILE: &str = "template.yaml";

/// Files at the template root that configure the generator and are never emitted
const GENERATOR_FILES: &[&str] = &[RULES_FILE, "catalog.yaml"];

/// Ignore file npm may have renamed `.gitignore` to when the template was published
pub const NPM_IGNORE: &str = ".npmignore";
pub const GIT_IGNORE: &str = ".gitignore";

/// Paths and rewrites that belong to the optional test tooling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTooling {
    /// Files and directories copied only when test tooling is included
    #[serde(default)]
    pub paths: Vec<String>,

    /// Dependency names removed from the manifests when test tooling is excluded
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// JSON manifests whose `devDependencies` lose the entries above
    #[serde(default)]
    pub manifests: Vec<String>,

    /// Module whose `require(...)` lines are commented out in the build scripts
    pub require_module: String,

    /// Build scripts that get their test tooling requires commented out
    #[serde(default)]
    pub scripts: Vec<String>,
}

impl Default for TestTooling {
    fn default() -> Self {
        Self {
            paths: vec!["wct.conf.js".to_string(), "test".to_string()],
            dependencies: vec![
                "web-component-tester".to_string(),
                "test-fixture".to_string(),
            ],
            manifests: vec!["bower.json".to_string(), "package.json".to_string()],
            require_module: "web-component-tester".to_string(),
            scripts: vec!["gulpfile.js".to_string()],
        }
    }
}

/// Per-template rules (templates/<name>/template.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRules {
    /// Display name of the template
    pub name: String,

    /// Semver version for CLI compatibility checking
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub test_tooling: TestTooling,

    /// Files and directories copied only when the extra docs are included
    #[serde(default = "default_docs")]
    pub docs: Vec<String>,
}

fn default_docs() -> Vec<String> {
    vec!["docs".to_string()]
}

impl Default for TemplateRules {
    fn default() -> Self {
        Self {
            name: "Polymer Cordova Starter Kit".to_string(),
            version: None,
            test_tooling: TestTooling::default(),
            docs: default_docs(),
        }
    }
}

/// How a template path is treated during emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Always copied
    Common,
    /// Copied only with test tooling
    TestTooling,
    /// Copied only with extra docs
    Docs,
    /// Generator configuration, never copied
    Generator,
    /// Ignore file, resolved separately
    IgnoreFile,
}

/// Rewrite applied to a file's content while it is copied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    StripDependencies,
    CommentRequires,
}

/// `path` is `pattern` itself or lies below it
fn path_matches(path: &str, pattern: &str) -> bool {
    let pattern = pattern.trim_end_matches('/');
    path == pattern
        || path
            .strip_prefix(pattern)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl TemplateRules {
    /// Load rules from `template_dir`, using the built-in defaults when there is no rules file
    pub fn load(template_dir: &Path) -> Result<Self> {
        let path = template_dir.join(RULES_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Classify a `/`-separated path relative to the template root
    pub fn classify(&self, path: &str) -> PathKind {
        if GENERATOR_FILES.contains(&path) {
            return PathKind::Generator;
        }
        if path == GIT_IGNORE || path == NPM_IGNORE {
            return PathKind::IgnoreFile;
        }
        if self.test_tooling.paths.iter().any(|p| path_matches(path, p)) {
            return PathKind::TestTooling;
        }
        if self.docs.iter().any(|p| path_matches(path, p)) {
            return PathKind::Docs;
        }
        PathKind::Common
    }

    /// Rewrite to apply when test tooling is excluded, if any
    pub fn rewrite_for(&self, path: &str) -> Option<Rewrite> {
        let tooling = &self.test_tooling;
        if tooling.manifests.iter().any(|m| m == path) {
            Some(Rewrite::StripDependencies)
        } else if tooling.scripts.iter().any(|s| s == path) {
            Some(Rewrite::CommentRequires)
        } else {
            None
        }
    }
}

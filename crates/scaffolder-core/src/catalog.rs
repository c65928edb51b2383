//! Platform and plugin choices offered during answer collection

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One selectable entry in a multi-select prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Label shown to the user
    pub name: String,

    /// Value handed to the project tool
    pub value: String,

    /// Pre-selected in the prompt
    #[serde(default)]
    pub checked: bool,
}

impl Choice {
    fn new(name: &str, value: &str, checked: bool) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            checked,
        }
    }
}

/// Enumerated platform and plugin lists (catalog.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub platforms: Vec<Choice>,

    #[serde(default)]
    pub plugins: Vec<Choice>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            platforms: vec![
                Choice::new("iOS", "ios", true),
                Choice::new("Android", "android", true),
            ],
            plugins: vec![
                Choice::new("Device", "cordova-plugin-device", true),
                Choice::new("Console", "cordova-plugin-console", true),
                Choice::new("Splashscreen", "cordova-plugin-splashscreen", false),
                Choice::new("Statusbar", "cordova-plugin-statusbar", false),
                Choice::new("Whitelist", "cordova-plugin-whitelist", true),
                Choice::new("Camera", "cordova-plugin-camera", false),
                Choice::new("Geolocation", "cordova-plugin-geolocation", false),
                Choice::new("Network Information", "cordova-plugin-network-information", false),
                Choice::new("Dialogs", "cordova-plugin-dialogs", false),
                Choice::new("Vibration", "cordova-plugin-vibration", false),
                Choice::new("InAppBrowser", "cordova-plugin-inappbrowser", false),
            ],
        }
    }
}

impl Catalog {
    /// Load `catalog.yaml` from `dir`, falling back to the built-in lists when absent
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join("catalog.yaml");
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

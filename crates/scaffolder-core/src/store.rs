//! Per-project answer store
//!
//! The store is a YAML file in the project root. The previous run's answers live under the
//! `answers` key; other keys are preserved when the file is rewritten.

use crate::answers::AnswerRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    answers: Option<AnswerRecord>,

    #[serde(flatten)]
    extra: serde_yaml::Mapping,
}

/// Answers persisted between runs in one project directory
#[derive(Debug, Clone)]
pub struct AnswerStore {
    path: PathBuf,
}

impl AnswerStore {
    pub fn new(project_dir: &Path, file_name: &str) -> Self {
        Self {
            path: project_dir.join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<StoreFile>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Some(StoreFile::default()));
        }
        let file = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Some(file))
    }

    /// Answers from a previous run, if any
    pub fn load(&self) -> Result<Option<AnswerRecord>> {
        let answers = self.read()?.and_then(|file| file.answers);
        if let Some(record) = &answers {
            record
                .validate()
                .with_context(|| format!("Invalid answers in {}", self.path.display()))?;
        }
        Ok(answers)
    }

    pub fn save(&self, answers: &AnswerRecord) -> Result<()> {
        let mut file = self.read()?.unwrap_or_default();
        file.answers = Some(answers.clone());
        let content = serde_yaml::to_string(&file)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record() -> AnswerRecord {
        AnswerRecord::new(
            "test",
            "com.company.test",
            true,
            false,
            vec!["ios".into(), "android".into()],
            vec!["cordova-plugin-device".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_missing_store_has_no_answers() {
        let tmp = TempDir::new().unwrap();
        let store = AnswerStore::new(tmp.path(), ".polymer-cordova.yaml");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let store = AnswerStore::new(tmp.path(), ".polymer-cordova.yaml");
        store.save(&record()).unwrap();

        assert_eq!(store.load().unwrap(), Some(record()));
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("answers:"));
    }

    #[test]
    fn test_save_keeps_other_keys() {
        let tmp = TempDir::new().unwrap();
        let store = AnswerStore::new(tmp.path(), ".polymer-cordova.yaml");
        std::fs::write(store.path(), "serverPort: 3000\n").unwrap();
        assert!(store.load().unwrap().is_none());

        store.save(&record()).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("serverPort: 3000"));
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn test_invalid_stored_answers_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = AnswerStore::new(tmp.path(), ".polymer-cordova.yaml");
        std::fs::write(
            store.path(),
            "answers:\n  appName: x\n  appId: not valid\n  includeTestTooling: false\n",
        )
        .unwrap();
        assert!(store.load().is_err());
    }
}

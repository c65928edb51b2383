//! Template emission with conditional paths and content rewrites
//!
//! Everything under the template root is copied unless the rules gate it behind an answer.
//! Rewrites happen on the in-memory content, so the destination only ever sees the
//! final bytes.

use crate::answers::AnswerRecord;
use crate::templates::manifest::{PathKind, Rewrite, TemplateRules, GIT_IGNORE, NPM_IGNORE};
use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// A file scheduled for emission
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedFile {
    source: PathBuf,
    dest: String,
    rewrite: Option<Rewrite>,
}

/// Decide what gets written where, without touching the destination
fn plan(
    template_dir: &Path,
    rules: &TemplateRules,
    answers: &AnswerRecord,
) -> Result<(Vec<String>, Vec<PlannedFile>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(template_dir).min_depth(1).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to read template {}", template_dir.display()))?;
        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .with_context(|| format!("{} is outside the template", entry.path().display()))?;
        let rel = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let included = match rules.classify(&rel) {
            PathKind::Common => true,
            PathKind::TestTooling => answers.include_test_tooling,
            PathKind::Docs => answers.include_extra_docs,
            PathKind::Generator | PathKind::IgnoreFile => false,
        };
        if !included {
            continue;
        }

        if entry.file_type().is_dir() {
            dirs.push(rel);
        } else {
            let rewrite = if answers.include_test_tooling {
                None
            } else {
                rules.rewrite_for(&rel)
            };
            files.push(PlannedFile {
                source: entry.path().to_path_buf(),
                dest: rel,
                rewrite,
            });
        }
    }

    // npm renames .gitignore to .npmignore when publishing, so prefer that copy
    let npm_ignore = template_dir.join(NPM_IGNORE);
    let git_ignore = template_dir.join(GIT_IGNORE);
    let ignore_source = if npm_ignore.is_file() {
        Some(npm_ignore)
    } else if git_ignore.is_file() {
        Some(git_ignore)
    } else {
        None
    };
    if let Some(source) = ignore_source {
        files.push(PlannedFile {
            source,
            dest: GIT_IGNORE.to_string(),
            rewrite: None,
        });
    }

    Ok((dirs, files))
}

/// Copy the template into `target_dir` according to `answers`; returns the written paths
pub async fn emit_template(
    template_dir: &Path,
    target_dir: &Path,
    rules: &TemplateRules,
    answers: &AnswerRecord,
) -> Result<Vec<String>> {
    if !template_dir.is_dir() {
        anyhow::bail!("Template directory not found: {}", template_dir.display());
    }

    let (dirs, files) = plan(template_dir, rules, answers)?;

    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    for dir in &dirs {
        let path = target_dir.join(dir);
        fs::create_dir_all(&path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }

    let mut copied_files = Vec::with_capacity(files.len());
    for file in files {
        let target_path = target_dir.join(&file.dest);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = fs::read(&file.source)
            .await
            .with_context(|| format!("Failed to read template file: {}", file.source.display()))?;
        let content = match file.rewrite {
            Some(rewrite) => apply_rewrite(rewrite, &content, rules)
                .with_context(|| format!("Failed to rewrite {}", file.dest))?,
            None => content,
        };

        fs::write(&target_path, &content)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        copied_files.push(file.dest);
    }

    Ok(copied_files)
}

fn apply_rewrite(rewrite: Rewrite, content: &[u8], rules: &TemplateRules) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(content).context("Template file is not UTF-8")?;
    let tooling = &rules.test_tooling;
    let rewritten = match rewrite {
        Rewrite::StripDependencies => strip_dependencies(text, &tooling.dependencies)?,
        Rewrite::CommentRequires => comment_requires(text, &tooling.require_module)?,
    };
    Ok(rewritten.into_bytes())
}

/// Remove `names` from the manifest's `devDependencies`, keeping key order
pub fn strip_dependencies(manifest: &str, names: &[String]) -> Result<String> {
    let mut value: serde_json::Value =
        serde_json::from_str(manifest).context("Failed to parse manifest")?;

    if let Some(dev) = value
        .get_mut("devDependencies")
        .and_then(|deps| deps.as_object_mut())
    {
        for name in names {
            dev.shift_remove(name);
        }
    }

    let mut out = serde_json::to_string_pretty(&value)?;
    out.push('\n');
    Ok(out)
}

/// Prefix every line that requires `module` with `// `; every other byte is kept
pub fn comment_requires(script: &str, module: &str) -> Result<String> {
    let pattern = format!(
        r#"(?m)^.*require\(\s*['"]{}['"]\s*\).*$"#,
        regex::escape(module)
    );
    let re = Regex::new(&pattern)?;
    Ok(re
        .replace_all(script, |caps: &Captures| format!("// {}", &caps[0]))
        .into_owned())
}

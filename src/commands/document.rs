//! Command document loader.
//!
//! Walks a source directory tree reading every `.yaml`/`.yml` file as one
//! universal command definition. A malformed file is collected as an issue
//! and excluded; it never aborts the batch.

use crate::error::{EngineError, EngineResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One portable slash-command definition
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDocument {
    /// Stable id, used as the output filename stem
    pub name: String,
    pub description: Option<String>,
    /// Multi-line prompt body; may contain `$ARGUMENTS` markers
    pub prompt: String,
    pub argument_hint: Option<String>,
    /// Ordered capability strings; duplicates allowed
    pub tools: Vec<String>,
    pub model: Option<String>,
    /// Relative path from the source root to the parent directory,
    /// `""` for files at the root; drives per-format output layout
    pub subfolder: String,
}

/// Raw on-disk schema. Everything optional so that validation failures are
/// reported per field instead of as opaque YAML errors.
#[derive(Debug, Deserialize)]
struct RawDocument {
    name: Option<String>,
    description: Option<String>,
    prompt: Option<String>,
    arguments: Option<String>,
    #[serde(default)]
    tools: Vec<String>,
    model: Option<String>,
}

/// One file that failed to load
#[derive(Debug, Clone)]
pub struct LoadIssue {
    pub path: PathBuf,
    pub reason: String,
}

/// Loader result: valid documents plus collected per-file issues
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub documents: Vec<CommandDocument>,
    pub issues: Vec<LoadIssue>,
}

/// Load every command document under `root`.
///
/// Name collisions across subfolders are legal; callers must not depend on
/// traversal order beyond "every valid document present exactly once".
pub fn load_documents(root: &Path) -> EngineResult<LoadOutcome> {
    if !root.is_dir() {
        return Err(EngineError::NotFound(format!(
            "source directory {}",
            root.display()
        )));
    }

    let mut outcome = LoadOutcome::default();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e == "yaml" || e == "yml");
        if !is_yaml {
            continue;
        }

        match load_one(root, path) {
            Ok(doc) => outcome.documents.push(doc),
            Err(e) => outcome.issues.push(LoadIssue {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }

    Ok(outcome)
}

fn load_one(root: &Path, path: &Path) -> EngineResult<CommandDocument> {
    let content = std::fs::read_to_string(path)?;
    let raw: RawDocument = serde_yaml::from_str(&normalize_content(&content))
        .map_err(|e| EngineError::parse_failed(path, e))?;

    let name = match raw.name {
        Some(n) if !n.trim().is_empty() => n,
        _ => return Err(EngineError::parse_failed(path, "missing required field 'name'")),
    };
    let prompt = match raw.prompt {
        Some(p) if !p.trim().is_empty() => p,
        _ => return Err(EngineError::parse_failed(path, "missing required field 'prompt'")),
    };

    Ok(CommandDocument {
        name,
        description: raw.description,
        prompt,
        argument_hint: raw.arguments,
        tools: raw.tools,
        model: raw.model,
        subfolder: subfolder_of(root, path),
    })
}

/// Relative parent directory with forward slashes, `""` at the root
fn subfolder_of(root: &Path, path: &Path) -> String {
    path.parent()
        .and_then(|p| p.strip_prefix(root).ok())
        .map(|p| {
            p.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}

/// Strip BOM and normalize line endings before parsing
fn normalize_content(content: &str) -> String {
    let stripped = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    stripped.replace("\r\n", "\n").replace('\r', "\n")
}

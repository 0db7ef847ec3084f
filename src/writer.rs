//! Persistence for projected configs and rendered command files.
//!
//! JSON client configs are merged: unrelated top-level keys and unrelated
//! entries in the server subsection survive untouched. A config file that
//! exists but fails to parse is reported and skipped, never replaced — the
//! old fall-back-to-empty behavior would silently drop user configuration.

use crate::commands::Rendered;
use crate::error::{EngineError, EngineResult};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Outcome of a rendered-text write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Wrote,
    /// Destination existed and the confirm collaborator declined; the
    /// existing file is untouched and this is not an error
    Skipped,
}

/// Compute the post-merge config without writing it. Dry-run printing and
/// the actual merge share this so what is printed is exactly what lands.
///
/// Missing file starts from `{}`. Existing unrelated keys are preserved;
/// only the given entry keys in the subsection are set or overwritten.
pub fn merged_config(
    path: &Path,
    section: &str,
    entries: &[(String, Value)],
) -> EngineResult<Value> {
    let mut config = read_existing(path)?;

    if !config.is_object() {
        return Err(EngineError::parse_failed(
            path,
            "existing config is not a JSON object",
        ));
    }
    if config.get(section).and_then(Value::as_object).is_none() {
        config[section] = json!({});
    }

    for (key, fragment) in entries {
        config[section][key] = fragment.clone();
    }

    Ok(config)
}

/// Merge server entries into the named subsection of a JSON config file.
pub fn merge_json_config(
    path: &Path,
    section: &str,
    entries: &[(String, Value)],
) -> EngineResult<()> {
    let config = merged_config(path, section, entries)?;
    write_pretty(path, &config)
}

/// Author a JSON config file from scratch. Used for local-scope files this
/// tool fully owns; any previous content is replaced.
pub fn author_json_config(path: &Path, config: &Value) -> EngineResult<()> {
    write_pretty(path, config)
}

/// Write one rendered command artifact under `target_root`, asking the
/// confirm collaborator before overwriting an existing file.
pub fn write_rendered(
    target_root: &Path,
    rendered: &Rendered,
    confirm: &mut dyn FnMut(&Path) -> bool,
) -> EngineResult<(PathBuf, WriteStatus)> {
    let destination = target_root.join(&rendered.path);

    if destination.exists() && !confirm(&destination) {
        return Ok((destination, WriteStatus::Skipped));
    }

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&destination, &rendered.text)?;
    Ok((destination, WriteStatus::Wrote))
}

fn read_existing(path: &Path) -> EngineResult<Value> {
    if !path.exists() {
        return Ok(json!({}));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| EngineError::parse_failed(path, e))
}

/// Config file text form: 2-space pretty print with a trailing newline
pub fn pretty(config: &Value) -> String {
    let mut content =
        serde_json::to_string_pretty(config).unwrap_or_else(|_| config.to_string());
    content.push('\n');
    content
}

fn write_pretty(path: &Path, config: &Value) -> EngineResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, pretty(config))?;
    Ok(())
}

//! Token substitution over JSON-shaped configuration fragments.
//!
//! Placeholders use `${NAME}` syntax inside string values. Substitution works
//! on the serialized form (serialize → replace → reparse), which handles
//! arbitrarily nested structures without a tree walker. All resolved tokens
//! are replaced in a single pass via one regex alternation, so a token value
//! containing the literal text of another placeholder is never re-expanded.

use crate::error::{EngineError, EngineResult};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

/// Reserved token resolved out-of-band from the workspace path prompt,
/// never listed in a descriptor's required tokens.
pub const WORKSPACE_FOLDER: &str = "WORKSPACE_FOLDER";

/// Resolved token values, keyed by placeholder name. Built incrementally
/// from environment lookups and interactive input; never persisted.
pub type TokenSet = BTreeMap<String, String>;

/// Replace every `${NAME}` occurrence for every name present in `tokens`.
///
/// Tokens absent from the set are left untouched verbatim: an unresolved
/// placeholder signals missing required input and must stay visible rather
/// than become silently empty.
pub fn substitute(value: &Value, tokens: &TokenSet) -> EngineResult<Value> {
    if tokens.is_empty() {
        return Ok(value.clone());
    }

    let alternation = tokens
        .keys()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"\$\{{({})\}}", alternation);
    let re = Regex::new(&pattern)
        .map_err(|e| EngineError::ValidationFailed(format!("bad token name in set: {}", e)))?;

    let serialized = value.to_string();
    let replaced = re.replace_all(&serialized, |caps: &regex::Captures| {
        // Guaranteed present: the alternation only matches known names.
        let resolved = &tokens[&caps[1]];
        json_escape(resolved)
    });

    serde_json::from_str(&replaced)
        .map_err(|e| EngineError::ValidationFailed(format!("substitution produced invalid JSON: {}", e)))
}

/// Rewrite `{{NAME}}` placeholders to VS Code's `${input:NAME}` form without
/// resolving them. VS Code prompts for inputs at its own runtime, so these
/// must survive substitution untouched; the two bracket syntaxes cannot
/// collide in the same pass.
pub fn rewrite_inputs(value: &Value) -> EngineResult<Value> {
    let re = Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}")
        .map_err(|e| EngineError::ValidationFailed(e.to_string()))?;

    let serialized = value.to_string();
    let replaced = re.replace_all(&serialized, "$${input:$1}");

    serde_json::from_str(&replaced)
        .map_err(|e| EngineError::ValidationFailed(format!("input rewrite produced invalid JSON: {}", e)))
}

/// Collect all distinct `${NAME}` placeholder names in a fragment, in order
/// of first appearance. Used by the registry's startup self-check.
pub fn placeholders(value: &Value) -> Vec<String> {
    let re = Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("static pattern");
    let serialized = value.to_string();

    let mut seen = Vec::new();
    for caps in re.captures_iter(&serialized) {
        let name = caps[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

/// Collect all distinct `{{NAME}}` input placeholder names in a fragment,
/// in order of first appearance. Used to declare VS Code `inputs` entries
/// before `rewrite_inputs` converts the markers.
pub fn input_placeholders(value: &Value) -> Vec<String> {
    let re = Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("static pattern");
    let serialized = value.to_string();

    let mut seen = Vec::new();
    for caps in re.captures_iter(&serialized) {
        let name = caps[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

/// Escape a token value for splicing into serialized JSON. serde_json gives
/// the quoted string form; the surrounding quotes come from the placeholder's
/// host string, so they are stripped here.
fn json_escape(raw: &str) -> String {
    let quoted = serde_json::Value::String(raw.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

//! Format emitters: one pure renderer per target platform.
//!
//! Claude and Gemini preserve the source hierarchy as nested directories;
//! Copilot flattens the subfolder into an underscore-joined filename prefix.

use crate::commands::document::CommandDocument;
use std::path::PathBuf;

/// One rendered artifact: output path relative to the target root, plus
/// literal file text
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub path: PathBuf,
    pub text: String,
}

/// Claude Code slash command: Markdown with optional YAML frontmatter.
/// Field order: allowed-tools, argument-hint, description, model. No
/// optional field present means no frontmatter block at all.
pub fn render_claude(doc: &CommandDocument) -> Rendered {
    let mut fields = Vec::new();
    if !doc.tools.is_empty() {
        fields.push(format!("allowed-tools: {}", doc.tools.join(", ")));
    }
    if let Some(hint) = &doc.argument_hint {
        fields.push(format!("argument-hint: {}", hint));
    }
    if let Some(description) = &doc.description {
        fields.push(format!("description: {}", description));
    }
    if let Some(model) = &doc.model {
        fields.push(format!("model: {}", model));
    }

    let mut text = String::new();
    if !fields.is_empty() {
        text.push_str("---\n");
        for field in &fields {
            text.push_str(field);
            text.push('\n');
        }
        text.push_str("---\n\n");
    }
    // $ARGUMENTS is Claude's own marker; the body passes through untouched.
    text.push_str(&doc.prompt);
    if !text.ends_with('\n') {
        text.push('\n');
    }

    Rendered {
        path: nested_path(doc, "md"),
        text,
    }
}

/// Copilot prompt file: frontmatter with `mode: 'agent'` always present and
/// first, then model, tools, description. Subfolders flatten into the
/// filename with underscores.
pub fn render_copilot(doc: &CommandDocument) -> Rendered {
    let mut text = String::from("---\nmode: 'agent'\n");
    if let Some(model) = &doc.model {
        text.push_str(&format!("model: {}\n", model));
    }
    if !doc.tools.is_empty() {
        let simplified: Vec<String> = doc
            .tools
            .iter()
            .map(|t| format!("'{}'", simplify_tool(t)))
            .collect();
        text.push_str(&format!("tools: [{}]\n", simplified.join(", ")));
    }
    if let Some(description) = &doc.description {
        text.push_str(&format!("description: {}\n", description));
    }
    text.push_str("---\n\n");

    // One substitution pass over the whole body.
    text.push_str(&doc.prompt.replace("$ARGUMENTS", "${args}"));
    if !text.ends_with('\n') {
        text.push('\n');
    }

    let filename = if doc.subfolder.is_empty() {
        format!("{}.prompt.md", doc.name)
    } else {
        format!("{}_{}.prompt.md", doc.subfolder.replace('/', "_"), doc.name)
    };

    Rendered {
        path: PathBuf::from(filename),
        text,
    }
}

/// Gemini CLI command: TOML with a triple-quoted prompt block. The
/// description line is omitted entirely when absent.
pub fn render_gemini(doc: &CommandDocument) -> Rendered {
    let mut text = String::new();
    if let Some(description) = &doc.description {
        text.push_str(&format!("description = \"{}\"\n\n", toml_escape(description)));
    }

    let body = doc.prompt.replace("$ARGUMENTS", "{{args}}");
    text.push_str(&format!("prompt = \"\"\"\n{}\n\"\"\"\n", body.trim_end_matches('\n')));

    Rendered {
        path: nested_path(doc, "toml"),
        text,
    }
}

/// Map one capability string to Copilot's tool vocabulary. Substring checks
/// run in fixed order, first match wins; unrecognized tools lowercase
/// verbatim. No deduplication: repeated inputs repeat in the output.
pub fn simplify_tool(tool: &str) -> String {
    if tool.contains("Bash") {
        "terminal".to_string()
    } else if tool.contains("Edit") {
        "edit".to_string()
    } else if tool.contains("Read") {
        "read".to_string()
    } else {
        tool.to_lowercase()
    }
}

fn nested_path(doc: &CommandDocument, ext: &str) -> PathBuf {
    let filename = format!("{}.{}", doc.name, ext);
    if doc.subfolder.is_empty() {
        PathBuf::from(filename)
    } else {
        PathBuf::from(&doc.subfolder).join(filename)
    }
}

fn toml_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

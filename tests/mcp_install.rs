//! Integration tests for the MCP config installation pipeline
//!
//! Tests verify:
//! - Catalog projection × token substitution × merge writing end to end
//! - Merge preservation of unrelated user configuration
//! - The VS Code input-placeholder path

use serde_json::Value;
use tempfile::TempDir;
use toolbridge::tokens::{self, TokenSet};
use toolbridge::writer;
use toolbridge::{Client, ServerRegistry};

fn resolved_tokens(workspace: &str) -> TokenSet {
    TokenSet::from([
        ("WORKSPACE_FOLDER".to_string(), workspace.to_string()),
        (
            "GITHUB_PERSONAL_ACCESS_TOKEN".to_string(),
            "ghp_test123".to_string(),
        ),
        ("CONTEXT7_API_KEY".to_string(), "ctx-key".to_string()),
        ("BRAVE_API_KEY".to_string(), "brave-key".to_string()),
    ])
}

#[test]
fn test_install_merges_into_existing_project_config() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join(".mcp.json");
    std::fs::write(
        &config_path,
        r#"{"mcpServers": {"user-server": {"command": "theirs"}}, "other": 1}"#,
    )
    .unwrap();

    let registry = ServerRegistry::builtin().unwrap();
    let token_set = resolved_tokens("/work/proj");

    let mut entries = Vec::new();
    for key in ["filesystem", "github", "context7"] {
        let fragment = registry.get(key).unwrap().projection(Client::ClaudeCode).unwrap();
        entries.push((
            key.to_string(),
            tokens::substitute(&fragment, &token_set).unwrap(),
        ));
    }
    writer::merge_json_config(&config_path, "mcpServers", &entries).unwrap();

    let config: Value =
        serde_json::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();

    // Unrelated keys and entries survive.
    assert_eq!(config["other"], 1);
    assert_eq!(config["mcpServers"]["user-server"]["command"], "theirs");

    // Tokens resolved per transport shape.
    assert_eq!(
        config["mcpServers"]["filesystem"]["args"][2],
        "/work/proj"
    );
    assert_eq!(
        config["mcpServers"]["github"]["env"]["GITHUB_PERSONAL_ACCESS_TOKEN"],
        "ghp_test123"
    );
    assert_eq!(config["mcpServers"]["context7"]["type"], "http");
    assert_eq!(
        config["mcpServers"]["context7"]["headers"]["CONTEXT7_API_KEY"],
        "ctx-key"
    );
}

#[test]
fn test_gemini_shapes_and_skip() {
    let registry = ServerRegistry::builtin().unwrap();

    // SSE transport renames to httpUrl for Gemini.
    let linear = registry.get("linear").unwrap().projection(Client::Gemini).unwrap();
    assert_eq!(linear["httpUrl"], "https://mcp.linear.app/sse");
    assert!(linear.get("type").is_none());

    // Same descriptor keeps the sse shape for the other clients.
    let linear_cc = registry.get("linear").unwrap().projection(Client::ClaudeCode).unwrap();
    assert_eq!(linear_cc["type"], "sse");

    // Stdio server without a Gemini override is skipped, not an error.
    assert!(registry
        .get("brave-search")
        .unwrap()
        .projection(Client::Gemini)
        .is_none());
}

#[test]
fn test_vscode_fresh_config_with_input_placeholders() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join(".vscode/mcp.json");
    std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    std::fs::write(&config_path, r#"{"servers": {"stale": {}}}"#).unwrap();

    let registry = ServerRegistry::builtin().unwrap();
    let fragment = registry.get("github").unwrap().projection(Client::VsCode).unwrap();

    let inputs = tokens::input_placeholders(&fragment);
    assert_eq!(inputs, vec!["GITHUB_PERSONAL_ACCESS_TOKEN"]);

    // The input marker is rewritten, never resolved, even with the token set.
    let rewritten = tokens::rewrite_inputs(&fragment).unwrap();
    let resolved = tokens::substitute(&rewritten, &resolved_tokens("/w")).unwrap();
    assert_eq!(
        resolved["env"]["GITHUB_PERSONAL_ACCESS_TOKEN"],
        "${input:GITHUB_PERSONAL_ACCESS_TOKEN}"
    );

    // Local-scope file is authored fresh: stale entries do not survive.
    let config = serde_json::json!({
        "servers": { "github": resolved },
        "inputs": [{ "id": "GITHUB_PERSONAL_ACCESS_TOKEN", "type": "promptString", "password": true }]
    });
    writer::author_json_config(&config_path, &config).unwrap();

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();
    assert!(written["servers"].get("stale").is_none());
    assert_eq!(written["inputs"][0]["id"], "GITHUB_PERSONAL_ACCESS_TOKEN");
}

#[test]
fn test_unparsable_target_config_is_never_clobbered() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join(".gemini/settings.json");
    std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    std::fs::write(&config_path, "{ this was hand-edited badly").unwrap();

    let registry = ServerRegistry::builtin().unwrap();
    let fragment = registry.get("linear").unwrap().projection(Client::Gemini).unwrap();

    let result = writer::merge_json_config(
        &config_path,
        "mcpServers",
        &[("linear".to_string(), fragment)],
    );
    assert!(result.is_err());
    assert_eq!(
        std::fs::read_to_string(&config_path).unwrap(),
        "{ this was hand-edited badly"
    );
}

#[test]
fn test_token_validation_gates_installation() {
    let registry = ServerRegistry::builtin().unwrap();

    let empty = TokenSet::new();
    let validation = registry.validate_tokens("github", &empty).unwrap();
    assert!(!validation.valid);
    assert_eq!(validation.missing, vec!["GITHUB_PERSONAL_ACCESS_TOKEN"]);

    let validation = registry
        .validate_tokens("github", &resolved_tokens("/w"))
        .unwrap();
    assert!(validation.valid);

    // Servers without required tokens validate against an empty set.
    let validation = registry.validate_tokens("memory", &empty).unwrap();
    assert!(validation.valid);
}

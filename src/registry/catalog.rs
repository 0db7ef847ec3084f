//! Built-in server catalog.
//!
//! Declaration order here is display order everywhere the catalog is listed.
//! Stdio servers that should reach Gemini carry explicit overrides because
//! Gemini config takes no bare command transport.

use crate::projector::{Client, Transport};
use crate::registry::ServerDescriptor;
use serde_json::json;
use std::collections::BTreeMap;

fn stdio(command: &str, args: &[&str], env: &[(&str, &str)]) -> Transport {
    Transport::Stdio {
        command: command.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
        env: env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

pub fn builtin_descriptors() -> Vec<ServerDescriptor> {
    vec![
        ServerDescriptor {
            key: "filesystem".to_string(),
            display_name: "Filesystem".to_string(),
            description: "Read and write files inside the workspace".to_string(),
            required_tokens: vec![],
            transport: Some(stdio(
                "npx",
                &[
                    "-y",
                    "@modelcontextprotocol/server-filesystem",
                    "${WORKSPACE_FOLDER}",
                ],
                &[],
            )),
            overrides: BTreeMap::from([(
                Client::Gemini,
                Some(json!({
                    "command": "npx",
                    "args": [
                        "-y",
                        "@modelcontextprotocol/server-filesystem",
                        "${WORKSPACE_FOLDER}"
                    ]
                })),
            )]),
        },
        ServerDescriptor {
            key: "github".to_string(),
            display_name: "GitHub".to_string(),
            description: "Issues, pull requests, and repository browsing".to_string(),
            required_tokens: vec!["GITHUB_PERSONAL_ACCESS_TOKEN".to_string()],
            transport: Some(stdio(
                "npx",
                &["-y", "@modelcontextprotocol/server-github"],
                &[(
                    "GITHUB_PERSONAL_ACCESS_TOKEN",
                    "${GITHUB_PERSONAL_ACCESS_TOKEN}",
                )],
            )),
            overrides: BTreeMap::from([
                // VS Code defers secret collection to its own input prompts.
                (
                    Client::VsCode,
                    Some(json!({
                        "command": "npx",
                        "args": ["-y", "@modelcontextprotocol/server-github"],
                        "env": {
                            "GITHUB_PERSONAL_ACCESS_TOKEN": "{{GITHUB_PERSONAL_ACCESS_TOKEN}}"
                        }
                    })),
                ),
                (
                    Client::Gemini,
                    Some(json!({
                        "command": "npx",
                        "args": ["-y", "@modelcontextprotocol/server-github"],
                        "env": {
                            "GITHUB_PERSONAL_ACCESS_TOKEN": "${GITHUB_PERSONAL_ACCESS_TOKEN}"
                        }
                    })),
                ),
            ]),
        },
        ServerDescriptor {
            key: "memory".to_string(),
            display_name: "Memory".to_string(),
            description: "Persistent knowledge graph across sessions".to_string(),
            required_tokens: vec![],
            transport: Some(stdio(
                "npx",
                &["-y", "@modelcontextprotocol/server-memory"],
                &[],
            )),
            overrides: BTreeMap::from([(
                Client::Gemini,
                Some(json!({
                    "command": "npx",
                    "args": ["-y", "@modelcontextprotocol/server-memory"]
                })),
            )]),
        },
        ServerDescriptor {
            key: "brave-search".to_string(),
            display_name: "Brave Search".to_string(),
            description: "Web search via the Brave Search API".to_string(),
            required_tokens: vec!["BRAVE_API_KEY".to_string()],
            transport: Some(stdio(
                "npx",
                &["-y", "@modelcontextprotocol/server-brave-search"],
                &[("BRAVE_API_KEY", "${BRAVE_API_KEY}")],
            )),
            // No Gemini override: this server is deliberately skipped there.
            overrides: BTreeMap::new(),
        },
        ServerDescriptor {
            key: "linear".to_string(),
            display_name: "Linear".to_string(),
            description: "Linear issue tracking".to_string(),
            required_tokens: vec![],
            transport: Some(Transport::Sse {
                url: "https://mcp.linear.app/sse".to_string(),
            }),
            overrides: BTreeMap::new(),
        },
        ServerDescriptor {
            key: "context7".to_string(),
            display_name: "Context7".to_string(),
            description: "Up-to-date library documentation lookup".to_string(),
            required_tokens: vec!["CONTEXT7_API_KEY".to_string()],
            transport: Some(Transport::Http {
                url: "https://mcp.context7.com/mcp".to_string(),
                extra: serde_json::Map::from_iter([(
                    "headers".to_string(),
                    json!({ "CONTEXT7_API_KEY": "${CONTEXT7_API_KEY}" }),
                )]),
            }),
            overrides: BTreeMap::new(),
        },
    ]
}

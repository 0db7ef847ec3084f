//! Server catalog: named descriptors with per-client projections.
//!
//! Descriptors are static catalog entries loaded once at startup and
//! immutable thereafter; `register` may append a new key before first use
//! but never mutates an existing one. Insertion order is display order.

mod catalog;

use crate::error::{EngineError, EngineResult};
use crate::projector::{self, Client, Transport};
use crate::tokens::{self, TokenSet, WORKSPACE_FOLDER};
use serde_json::Value;
use std::collections::BTreeMap;

/// Canonical record describing one MCP server
#[derive(Debug, Clone)]
pub struct ServerDescriptor {
    /// Unique stable identifier, also the key in every client config file
    pub key: String,
    pub display_name: String,
    pub description: String,
    /// Placeholder names that must resolve before the server is usable,
    /// in declaration order
    pub required_tokens: Vec<String>,
    /// How the server is reached; `None` for fully custom descriptors
    pub transport: Option<Transport>,
    /// Per-client custom overrides. `Some(None)` marks the client as
    /// unsupported; `Some(Some(fragment))` bypasses the default derivation.
    pub overrides: BTreeMap<Client, Option<Value>>,
}

impl ServerDescriptor {
    /// Final per-client config fragment: override if declared, else the
    /// default derivation from the transport, else `None`.
    pub fn projection(&self, client: Client) -> Option<Value> {
        if let Some(custom) = self.overrides.get(&client) {
            return custom.clone();
        }
        self.transport
            .as_ref()
            .and_then(|t| projector::project(t, client))
    }
}

/// Result of checking a token set against a descriptor's requirements
#[derive(Debug, Clone, PartialEq)]
pub struct TokenValidation {
    pub valid: bool,
    /// Required tokens absent (or empty) in the set, in declaration order
    pub missing: Vec<String>,
}

/// Ordered catalog of server descriptors
#[derive(Debug, Clone, Default)]
pub struct ServerRegistry {
    descriptors: Vec<ServerDescriptor>,
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the built-in catalog, verifying the placeholder invariant for
    /// every descriptor up front so a bad catalog entry is a startup error
    /// rather than a runtime surprise.
    pub fn builtin() -> EngineResult<Self> {
        let mut registry = Self::new();
        for descriptor in catalog::builtin_descriptors() {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Server keys in insertion order
    pub fn list(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.key.as_str()).collect()
    }

    pub fn get(&self, key: &str) -> EngineResult<&ServerDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.key == key)
            .ok_or_else(|| EngineError::NotFound(format!("server '{}'", key)))
    }

    /// Append a descriptor. Projections are derived lazily per client from
    /// the transport, so a transport-only descriptor needs no precomputed
    /// fragments.
    pub fn register(&mut self, descriptor: ServerDescriptor) -> EngineResult<()> {
        if self.descriptors.iter().any(|d| d.key == descriptor.key) {
            return Err(EngineError::AlreadyExists(format!(
                "server '{}'",
                descriptor.key
            )));
        }
        check_placeholders(&descriptor)?;
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Compute which of a server's required tokens are missing from `tokens`.
    /// An empty-string value counts as missing.
    pub fn validate_tokens(&self, key: &str, tokens: &TokenSet) -> EngineResult<TokenValidation> {
        let descriptor = self.get(key)?;
        let missing: Vec<String> = descriptor
            .required_tokens
            .iter()
            .filter(|name| tokens.get(*name).map_or(true, |v| v.is_empty()))
            .cloned()
            .collect();

        Ok(TokenValidation {
            valid: missing.is_empty(),
            missing,
        })
    }
}

/// Catalog invariant: every `${NAME}` placeholder appearing in any projection
/// must be a declared required token or the reserved WORKSPACE_FOLDER.
fn check_placeholders(descriptor: &ServerDescriptor) -> EngineResult<()> {
    for client in Client::ALL {
        let Some(fragment) = descriptor.projection(client) else {
            continue;
        };
        for name in tokens::placeholders(&fragment) {
            if name != WORKSPACE_FOLDER && !descriptor.required_tokens.contains(&name) {
                return Err(EngineError::ValidationFailed(format!(
                    "server '{}': projection for {} uses unknown placeholder ${{{}}}",
                    descriptor.key, client, name
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(key: &str) -> ServerDescriptor {
        ServerDescriptor {
            key: key.to_string(),
            display_name: key.to_string(),
            description: String::new(),
            required_tokens: vec![],
            transport: Some(Transport::Sse {
                url: "https://x".to_string(),
            }),
            overrides: BTreeMap::new(),
        }
    }

    #[test]
    fn test_builtin_catalog_passes_self_check() {
        let registry = ServerRegistry::builtin().unwrap();
        assert!(!registry.list().is_empty());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut registry = ServerRegistry::new();
        registry.register(descriptor("zeta")).unwrap();
        registry.register(descriptor("alpha")).unwrap();
        assert_eq!(registry.list(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let registry = ServerRegistry::new();
        assert!(matches!(
            registry.get("nope"),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = ServerRegistry::new();
        registry.register(descriptor("dup")).unwrap();
        assert!(matches!(
            registry.register(descriptor("dup")),
            Err(EngineError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_register_rejects_unknown_placeholder() {
        let mut d = descriptor("bad");
        d.overrides.insert(
            Client::ClaudeCode,
            Some(json!({"env": {"K": "${NOT_DECLARED}"}})),
        );

        let mut registry = ServerRegistry::new();
        assert!(matches!(
            registry.register(d),
            Err(EngineError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_workspace_folder_always_allowed() {
        let mut d = descriptor("fs");
        d.transport = Some(Transport::Stdio {
            command: "npx".to_string(),
            args: vec!["${WORKSPACE_FOLDER}".to_string()],
            env: BTreeMap::new(),
        });

        let mut registry = ServerRegistry::new();
        registry.register(d).unwrap();
    }

    #[test]
    fn test_validate_tokens_preserves_declaration_order() {
        let mut d = descriptor("tok");
        d.required_tokens = vec!["A".to_string(), "B".to_string()];
        d.transport = None;

        let mut registry = ServerRegistry::new();
        registry.register(d).unwrap();

        let mut tokens = TokenSet::new();
        tokens.insert("A".to_string(), "x".to_string());

        let result = registry.validate_tokens("tok", &tokens).unwrap();
        assert!(!result.valid);
        assert_eq!(result.missing, vec!["B"]);
    }

    #[test]
    fn test_validate_tokens_empty_value_counts_as_missing() {
        let mut d = descriptor("tok");
        d.required_tokens = vec!["A".to_string()];
        d.transport = None;

        let mut registry = ServerRegistry::new();
        registry.register(d).unwrap();

        let mut tokens = TokenSet::new();
        tokens.insert("A".to_string(), String::new());

        let result = registry.validate_tokens("tok", &tokens).unwrap();
        assert_eq!(result.missing, vec!["A"]);
    }

    #[test]
    fn test_override_wins_over_derivation() {
        let mut d = descriptor("ovr");
        d.overrides
            .insert(Client::Gemini, Some(json!({"command": "special"})));

        let fragment = d.projection(Client::Gemini).unwrap();
        assert_eq!(fragment["command"], "special");

        // Other clients still use the default derivation.
        let sse = d.projection(Client::ClaudeCode).unwrap();
        assert_eq!(sse["type"], "sse");
    }

    #[test]
    fn test_null_override_marks_unsupported() {
        let mut d = descriptor("unsup");
        d.overrides.insert(Client::VsCode, None);
        assert!(d.projection(Client::VsCode).is_none());
    }
}

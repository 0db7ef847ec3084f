//! Per-client projection of server descriptors.
//!
//! Each supported client consumes a differently-shaped config fragment for
//! the same server. The rules are a fixed table over the transport variant;
//! a descriptor-level custom override (see registry) always wins over the
//! derivation here.

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Supported client targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Client {
    ClaudeCode,
    ClaudeDesktop,
    VsCode,
    Gemini,
}

impl Client {
    pub const ALL: [Client; 4] = [
        Client::ClaudeCode,
        Client::ClaudeDesktop,
        Client::VsCode,
        Client::Gemini,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClaudeCode => "claude-code",
            Self::ClaudeDesktop => "claude-desktop",
            Self::VsCode => "vscode",
            Self::Gemini => "gemini",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::ClaudeCode => "Claude Code",
            Self::ClaudeDesktop => "Claude Desktop",
            Self::VsCode => "VS Code",
            Self::Gemini => "Gemini CLI",
        }
    }

    /// Name of the server subsection in this client's JSON config file
    pub fn section_name(self) -> &'static str {
        match self {
            Self::VsCode => "servers",
            _ => "mcpServers",
        }
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Client {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "claude-code" | "claude" => Ok(Self::ClaudeCode),
            "claude-desktop" | "desktop" => Ok(Self::ClaudeDesktop),
            "vscode" | "vs-code" | "copilot" => Ok(Self::VsCode),
            "gemini" => Ok(Self::Gemini),
            other => Err(format!(
                "unsupported client: {} (claude-code|claude-desktop|vscode|gemini)",
                other
            )),
        }
    }
}

/// How a server is reached
#[derive(Debug, Clone, PartialEq)]
pub enum Transport {
    /// Local process launched by the client
    Stdio {
        command: String,
        args: Vec<String>,
        env: BTreeMap<String, String>,
    },
    /// Server-sent-events endpoint
    Sse { url: String },
    /// Streaming HTTP endpoint; `extra` carries client-agnostic additions
    /// such as request headers
    Http {
        url: String,
        extra: Map<String, Value>,
    },
}

/// Derive the default config fragment for one client from a transport.
///
/// Returns `None` when the client has no default shape for the transport
/// (Gemini cannot take a bare command transport without a custom override);
/// callers skip that client with a warning rather than fail the batch.
pub fn project(transport: &Transport, client: Client) -> Option<Value> {
    match (transport, client) {
        (Transport::Stdio { .. }, Client::Gemini) => None,
        (Transport::Stdio { command, args, env }, _) => {
            let mut fragment = json!({
                "command": command,
                "args": args,
            });
            if !env.is_empty() {
                fragment["env"] = json!(env);
            }
            Some(fragment)
        }
        (Transport::Sse { url }, Client::Gemini) => Some(json!({ "httpUrl": url })),
        (Transport::Sse { url }, _) => Some(json!({ "type": "sse", "url": url })),
        (Transport::Http { url, extra }, Client::Gemini) => {
            let mut map = Map::new();
            map.insert("httpUrl".to_string(), json!(url));
            map.extend(extra.clone());
            Some(Value::Object(map))
        }
        (Transport::Http { url, extra }, _) => {
            let mut map = Map::new();
            map.insert("type".to_string(), json!("http"));
            map.insert("url".to_string(), json!(url));
            map.extend(extra.clone());
            Some(Value::Object(map))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sse() -> Transport {
        Transport::Sse {
            url: "https://x".to_string(),
        }
    }

    #[test]
    fn test_stdio_pass_through() {
        let transport = Transport::Stdio {
            command: "npx".to_string(),
            args: vec!["-y".to_string(), "server".to_string()],
            env: BTreeMap::new(),
        };

        for client in [Client::ClaudeCode, Client::ClaudeDesktop, Client::VsCode] {
            let fragment = project(&transport, client).unwrap();
            assert_eq!(fragment["command"], "npx");
            assert_eq!(fragment["args"][1], "server");
            assert!(fragment.get("env").is_none());
        }
    }

    #[test]
    fn test_stdio_env_included_when_present() {
        let mut env = BTreeMap::new();
        env.insert("KEY".to_string(), "${KEY}".to_string());
        let transport = Transport::Stdio {
            command: "npx".to_string(),
            args: vec![],
            env,
        };

        let fragment = project(&transport, Client::ClaudeCode).unwrap();
        assert_eq!(fragment["env"]["KEY"], "${KEY}");
    }

    #[test]
    fn test_stdio_unsupported_for_gemini() {
        let transport = Transport::Stdio {
            command: "npx".to_string(),
            args: vec![],
            env: BTreeMap::new(),
        };
        assert!(project(&transport, Client::Gemini).is_none());
    }

    #[test]
    fn test_sse_shapes() {
        for client in [Client::ClaudeCode, Client::ClaudeDesktop, Client::VsCode] {
            let fragment = project(&sse(), client).unwrap();
            assert_eq!(fragment, json!({"type": "sse", "url": "https://x"}));
        }

        let gemini = project(&sse(), Client::Gemini).unwrap();
        assert_eq!(gemini, json!({"httpUrl": "https://x"}));
    }

    #[test]
    fn test_http_shapes_with_extra_fields() {
        let mut extra = Map::new();
        extra.insert("headers".to_string(), json!({"X-Key": "${API_KEY}"}));
        let transport = Transport::Http {
            url: "https://h/mcp".to_string(),
            extra,
        };

        let fragment = project(&transport, Client::ClaudeCode).unwrap();
        assert_eq!(fragment["type"], "http");
        assert_eq!(fragment["url"], "https://h/mcp");
        assert_eq!(fragment["headers"]["X-Key"], "${API_KEY}");

        let gemini = project(&transport, Client::Gemini).unwrap();
        assert_eq!(gemini["httpUrl"], "https://h/mcp");
        assert!(gemini.get("url").is_none());
        assert_eq!(gemini["headers"]["X-Key"], "${API_KEY}");
    }

    #[test]
    fn test_client_from_str() {
        assert_eq!("claude-code".parse::<Client>().unwrap(), Client::ClaudeCode);
        assert_eq!("VSCode".parse::<Client>().unwrap(), Client::VsCode);
        assert!("cursor".parse::<Client>().is_err());
    }
}

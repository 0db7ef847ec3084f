// Toolbridge - Universal MCP server and slash-command installer
// Projects one canonical catalog into per-client config artifacts

pub mod cli;
pub mod commands;
pub mod error;
pub mod fetch;
pub mod projector;
pub mod prompt;
pub mod registry;
pub mod tokens;
pub mod writer;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use error::{EngineError, EngineResult};
pub use projector::{Client, Transport};
pub use registry::{ServerDescriptor, ServerRegistry, TokenValidation};
pub use tokens::TokenSet;

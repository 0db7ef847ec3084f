//! CLI subcommand implementations.

pub mod convert;
pub mod mcp;

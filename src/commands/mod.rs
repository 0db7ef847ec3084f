//! Universal command documents and their per-client renderers.

pub mod document;
pub mod emit;

pub use document::{load_documents, CommandDocument, LoadIssue, LoadOutcome};
pub use emit::{render_claude, render_copilot, render_gemini, Rendered};

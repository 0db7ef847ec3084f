//! Interactive prompt collaborators.
//!
//! Thin wrappers over dialoguer so the pipelines depend on a small surface.
//! A failed prompt (no terminal, piped stdin) maps to ValidationFailed so
//! non-interactive runs fail loudly instead of hanging.

use crate::error::{EngineError, EngineResult};
use dialoguer::{Confirm, Input, MultiSelect, Select};

fn terminal_unavailable(e: dialoguer::Error) -> EngineError {
    EngineError::ValidationFailed(format!("terminal not available: {}", e))
}

/// Ask for a free-text answer; re-prompts until `validator` returns Ok
pub fn prompt_text(
    question: &str,
    validator: impl Fn(&str) -> Result<(), String> + 'static,
) -> EngineResult<String> {
    Input::new()
        .with_prompt(question)
        .validate_with(move |input: &String| validator(input))
        .interact_text()
        .map_err(terminal_unavailable)
}

/// Ask for a free-text answer with a prefilled default
pub fn prompt_text_with_default(question: &str, default: &str) -> EngineResult<String> {
    Input::new()
        .with_prompt(question)
        .default(default.to_string())
        .interact_text()
        .map_err(terminal_unavailable)
}

/// Single choice from a list, returns the selected index
pub fn prompt_choice(question: &str, options: &[String]) -> EngineResult<usize> {
    Select::new()
        .with_prompt(question)
        .items(options)
        .default(0)
        .interact()
        .map_err(terminal_unavailable)
}

/// Multiple choice, returns selected indices in display order
pub fn prompt_multi(question: &str, options: &[String]) -> EngineResult<Vec<usize>> {
    MultiSelect::new()
        .with_prompt(question)
        .items(options)
        .interact()
        .map_err(terminal_unavailable)
}

/// Yes/no confirmation
pub fn prompt_confirm(question: &str, default: bool) -> EngineResult<bool> {
    Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact()
        .map_err(terminal_unavailable)
}

/// Validator for prompts whose answer must be non-empty
pub fn non_empty(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err("value must not be empty".to_string())
    } else {
        Ok(())
    }
}

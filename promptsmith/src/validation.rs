//! Prompt input validation.

use crate::error::{PromptsmithError, Result};

/// Longest prompt accepted by the workbench.
pub const MAX_PROMPT_CHARS: usize = 4000;

/// Reject empty and oversized prompts.
pub fn validate_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(PromptsmithError::Validation(
            "Prompt cannot be empty".to_string(),
        ));
    }

    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(PromptsmithError::Validation(format!(
            "Prompt is too long (max {MAX_PROMPT_CHARS} characters)"
        )));
    }

    Ok(())
}

/// Trim whitespace and strip angle brackets from user input.
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect()
}

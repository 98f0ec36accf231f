use dialoguer::{Confirm, Input};

use crate::error::{MenuError, Result};

/// Prompt for the number of people to shop for.
pub fn prompt_diners(default: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("How many people are you shopping for?")
        .default(default.to_string())
        .interact_text()?;

    let diners: u32 = input
        .trim()
        .parse()
        .map_err(|_| MenuError::InvalidInput("Invalid number".to_string()))?;

    if diners == 0 {
        return Err(MenuError::InvalidInput(
            "Diners must be at least 1".to_string(),
        ));
    }

    Ok(diners)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

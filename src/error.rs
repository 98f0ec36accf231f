use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("No candidate recipes to build a menu from")]
    InsufficientCandidates,

    #[error("No slot of the week could be filled from the candidate recipes")]
    EmptyMenu,

    #[error("Invalid menu rules: {0}")]
    InvalidRules(String),

    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    #[error("Unknown category '{name}'{}", suggestion_suffix(.suggestion))]
    UnknownCategory {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Unknown meal type: {0}")]
    UnknownMealType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{}'?)", s))
        .unwrap_or_default()
}

impl MenuError {
    /// User-facing hint for the recoverable domain failures.
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            MenuError::InsufficientCandidates => {
                Some("Favourite some recipes before generating a menu.")
            }
            MenuError::EmptyMenu => Some(
                "Could not generate any menu. Check your favourites cover the meal categories.",
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message_includes_suggestion() {
        let err = MenuError::UnknownCategory {
            name: "Meats".to_string(),
            suggestion: Some("Meat".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Unknown category 'Meats' (did you mean 'Meat'?)"
        );

        let err = MenuError::UnknownCategory {
            name: "zzz".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "Unknown category 'zzz'");
    }

    #[test]
    fn test_guidance_only_for_domain_errors() {
        assert!(MenuError::InsufficientCandidates.guidance().is_some());
        assert!(MenuError::EmptyMenu.guidance().is_some());
        assert!(MenuError::InvalidRules("x".into()).guidance().is_none());
    }
}

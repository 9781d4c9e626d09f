//! Display name validation for login requests.

/// Display name validation errors with player-facing messages.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("Name must be at least {min} characters long.")]
    TooShort { min: usize },

    #[error("Name must be at most {max} characters long.")]
    TooLong { max: usize },

    #[error("Name contains invalid characters.")]
    InvalidCharacters,
}

const MIN_NAME_CHARS: usize = 2;
const MAX_NAME_CHARS: usize = 20;

/// Validate a requested display name and return the trimmed form.
///
/// Length is measured in characters, not bytes, so multibyte names get the
/// same budget as ASCII ones. Control characters are rejected outright; they
/// would corrupt both room text and log lines.
pub fn validate_display_name(raw: &str) -> Result<&str, NameError> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();
    if chars < MIN_NAME_CHARS {
        return Err(NameError::TooShort {
            min: MIN_NAME_CHARS,
        });
    }
    if chars > MAX_NAME_CHARS {
        return Err(NameError::TooLong {
            max: MAX_NAME_CHARS,
        });
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(NameError::InvalidCharacters);
    }
    Ok(trimmed)
}

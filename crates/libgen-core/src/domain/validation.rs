use crate::domain::error::DomainError;

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// A name must be non-empty after trimming, use only ASCII letters,
    /// digits, `-`, `_` or spaces, and start with a letter.
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyName);
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ')))
        {
            return Err(DomainError::InvalidName {
                name: name.to_string(),
                reason: format!("character '{bad}' is not allowed"),
            });
        }

        if !trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidName {
                name: name.to_string(),
                reason: "name must start with a letter".into(),
            });
        }

        Ok(())
    }

    /// Split a comma-separated tag list, dropping blanks.
    pub fn parse_tags(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Package scopes always carry a leading `@`.
    pub fn normalize_scope(scope: &str) -> Result<String, DomainError> {
        let trimmed = scope.trim().trim_start_matches('@');
        if trimmed.is_empty() {
            return Err(DomainError::InvalidField {
                field: "scope",
                reason: "scope cannot be empty".into(),
            });
        }
        if trimmed.contains('/') || trimmed.contains(char::is_whitespace) {
            return Err(DomainError::InvalidField {
                field: "scope",
                reason: format!("'{scope}' is not a valid package scope"),
            });
        }
        Ok(format!("@{trimmed}"))
    }
}

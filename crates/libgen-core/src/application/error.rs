//! Application layer errors.
//!
//! These errors represent failures while carrying out a request, not bad
//! input. Input problems are `DomainError` from `crate::domain`.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// An adapter operation failed. Earlier writes are not rolled back.
    #[error("Filesystem error during {operation} at {path}: {reason}")]
    FileSystem {
        operation: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// An upstream library needed by a composite could not be generated.
    #[error("Failed to resolve dependency {dependency}: {reason}")]
    Resolution { dependency: String, reason: String },

    /// The staging lock was poisoned by a panicking writer.
    #[error("Staged tree lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    pub fn filesystem(
        operation: &'static str,
        path: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        Self::FileSystem {
            operation,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileSystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions in the workspace".into(),
                "Files written before the failure were kept; re-run to regenerate them".into(),
            ],
            Self::Resolution { dependency, .. } => vec![
                format!(
                    "Generate it on its own first: libgen generate {}",
                    dependency.replacen(':', " ", 1)
                ),
                "Upstream libraries generated before the failure were kept".into(),
            ],
            Self::LockPoisoned => vec![
                "An earlier write panicked while holding the staging lock".into(),
                "Try again".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileSystem { .. } => ErrorCategory::Filesystem,
            Self::Resolution { .. } => ErrorCategory::Resolution,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}

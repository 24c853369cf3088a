//! Unified error handling for libgen core.
//!
//! Wraps domain and application errors behind one type so callers can ask
//! any failure for suggestions and a category without matching on layers.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for libgen core operations.
#[derive(Debug, Error, Clone)]
pub enum LibgenError {
    /// Caller input was rejected. Nothing was written.
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),

    /// A filesystem or dependency-resolution step failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Workspace defaults handed to the executor are unusable.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl LibgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Try: libgen config list to inspect the effective settings".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Validation,
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// True when the failure happened before anything was written.
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Filesystem,
    Resolution,
    Configuration,
    Internal,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Filesystem => "filesystem",
            Self::Resolution => "resolution",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        }
    }
}

/// Convenient result type alias.
pub type LibgenResult<T> = Result<T, LibgenError>;

// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is a caller-input problem: recoverable by fixing the input
/// and retrying, and always raised before any filesystem mutation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Name validation
    // ========================================================================
    #[error("Library name cannot be empty")]
    EmptyName,

    #[error("Invalid library name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    // ========================================================================
    // Option decoding
    // ========================================================================
    #[error("Unknown library type '{0}'")]
    UnknownLibraryType(String),

    #[error("Unknown platform '{0}'")]
    UnknownPlatform(String),

    #[error("Invalid options for {library_type}: {message}")]
    InvalidOptions {
        library_type: String,
        message: String,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyName => vec![
                "Provide a library name, e.g. 'order' or 'user-profile'".into(),
            ],
            Self::InvalidName { name, reason } => vec![
                format!("'{name}' was rejected: {reason}"),
                "Use letters, digits, hyphens, underscores or spaces".into(),
                "Start the name with a letter".into(),
                "Examples: order, user-profile, paymentMethod".into(),
            ],
            Self::UnknownLibraryType(_) => vec![
                "Supported library types:".into(),
                "  • contract     - domain entities, events and ports".into(),
                "  • data-access  - repositories over the database".into(),
                "  • feature      - services, client state and RPC".into(),
                "  • infra        - shared infrastructure services".into(),
                "  • provider     - wrappers around external SDKs".into(),
            ],
            Self::UnknownPlatform(_) => vec![
                "Supported platforms: node, browser, universal, edge".into(),
            ],
            Self::InvalidOptions { library_type, .. } => vec![
                format!("Check the options accepted by '{library_type}'"),
                "Try: libgen list to see each type's capabilities".into(),
            ],
            Self::InvalidField { field, .. } | Self::MissingRequiredField { field } => {
                vec![format!("Check the value passed for '{field}'")]
            }
        }
    }
}

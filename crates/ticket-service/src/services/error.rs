//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::fmt;

use ticket_common::AppError;
use ticket_core::{DomainError, PlatformError};

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Permission denied
    PermissionDenied { action: String },

    /// Validation error
    Validation(String),

    /// Duplicate delivery absorbed by the cooldown window
    DuplicateAction,

    /// Awaited input arrived after its deadline
    PromptExpired,

    /// Platform-side operation failed
    External(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::PermissionDenied { action } => {
                write!(f, "You are not allowed to {action}")
            }
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::DuplicateAction => write!(f, "Duplicate action dropped"),
            Self::PromptExpired => write!(f, "That prompt has expired, please start over"),
            Self::External(msg) => write!(f, "Platform operation failed: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(action: impl Into<String>) -> Self {
        Self::PermissionDenied {
            action: action.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Flatten validator output into a single validation error
    pub fn from_validation_errors(errors: &validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }

    /// Get the error code for rendered responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::PermissionDenied { .. } => "MISSING_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateAction => "DUPLICATE_ACTION",
            Self::PromptExpired => "PROMPT_EXPIRED",
            Self::External(_) => "PLATFORM_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to the end user
    ///
    /// System-side failures collapse to a generic message; the detail stays
    /// in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() || e.is_invalid_transition() || e.is_validation() || e.is_conflict()
                {
                    e.to_string()
                } else {
                    GENERIC_USER_MESSAGE.to_string()
                }
            }
            Self::App(e) => e.user_message(),
            Self::NotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::Validation(_)
            | Self::DuplicateAction
            | Self::PromptExpired => self.to_string(),
            Self::External(_) | Self::Internal(_) => GENERIC_USER_MESSAGE.to_string(),
        }
    }
}

const GENERIC_USER_MESSAGE: &str = "Something went wrong. Please try again later.";

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<PlatformError> for ServiceError {
    fn from(err: PlatformError) -> Self {
        Self::External(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::PermissionDenied { .. } => AppError::InsufficientPermissions,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::DuplicateAction => AppError::DuplicateAction,
            ServiceError::PromptExpired => AppError::Conflict("prompt expired".to_string()),
            ServiceError::External(msg) => AppError::Platform(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

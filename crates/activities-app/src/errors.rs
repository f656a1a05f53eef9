//! Categorized application errors
//!
//! Provides structured error types that enable:
//! - Categorized error handling (input vs network vs server vs page)
//! - Notice severity routing
//! - Picking the most specific user-facing message with a fallback

use std::fmt;
use thiserror::Error;

pub use crate::notifier::Severity;
use crate::surface::SurfaceError;

// ============================================================================
// Error Categories
// ============================================================================

/// High-level error categories for frontend error handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// User input validation errors (correctable by user)
    Input,
    /// The request never produced a response
    Network,
    /// The server answered with something we could not read
    Response,
    /// The server rejected the request with a structured reason
    Application,
    /// The page could not be patched to match the board
    Presentation,
}

impl ErrorCategory {
    /// Check if this error category is user-correctable.
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Input | Self::Application)
    }

    /// Check if this error category is likely transient.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Notice severity for this category.
    ///
    /// Every category currently maps to [`Severity::Error`].
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Input | Self::Network | Self::Response | Self::Application | Self::Presentation => {
                Severity::Error
            }
        }
    }

    /// Get a short label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Network => "Network",
            Self::Response => "Response",
            Self::Application => "Application",
            Self::Presentation => "Presentation",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Application Errors
// ============================================================================

/// Every failure the board can surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The request was rejected before a response arrived.
    #[error("network failure: {message}")]
    NetworkFailure {
        /// Transport-provided reason, possibly empty.
        message: String,
    },

    /// The body was not JSON or not the expected shape.
    #[error("malformed response (status {status}): {message}")]
    MalformedResponse {
        /// HTTP status of the unreadable response.
        status: u16,
        /// Decoder diagnostic.
        message: String,
    },

    /// Non-2xx status.
    #[error("request failed with status {status}: {}", .message.as_deref().unwrap_or("no detail"))]
    Application {
        /// HTTP status.
        status: u16,
        /// Server-provided `detail` or `message`, when present.
        message: Option<String>,
    },

    /// Input rejected before any request was sent.
    #[error("validation failed: {message}")]
    Validation {
        /// Text shown to the user.
        message: String,
    },

    /// The board changed but the page could not follow.
    #[error("page update failed: {0}")]
    Presentation(#[from] SurfaceError),
}

impl AppError {
    /// Create a network failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            message: message.into(),
        }
    }

    /// Create a malformed-response error.
    pub fn malformed(status: u16, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            status,
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Category for routing and logging.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NetworkFailure { .. } => ErrorCategory::Network,
            Self::MalformedResponse { .. } => ErrorCategory::Response,
            Self::Application { .. } => ErrorCategory::Application,
            Self::Validation { .. } => ErrorCategory::Input,
            Self::Presentation(_) => ErrorCategory::Presentation,
        }
    }

    /// The most specific message available, else `fallback`.
    ///
    /// Decoder diagnostics are never shown to users.
    pub fn user_message(&self, fallback: &str) -> String {
        let specific = match self {
            Self::NetworkFailure { message } | Self::Validation { message } => {
                Some(message.as_str())
            }
            Self::Application { message, .. } => message.as_deref(),
            Self::MalformedResponse { .. } | Self::Presentation(_) => None,
        };
        match specific.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Failure of a signup or unregister mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// Signup failed.
    #[error("signup failed: {0}")]
    Signup(#[source] AppError),

    /// Unregister failed.
    #[error("unregister failed: {0}")]
    Unregister(#[source] AppError),
}

impl MutationError {
    /// Underlying cause.
    pub fn cause(&self) -> &AppError {
        match self {
            Self::Signup(e) | Self::Unregister(e) => e,
        }
    }

    /// Category of the underlying cause.
    pub fn category(&self) -> ErrorCategory {
        self.cause().category()
    }
}

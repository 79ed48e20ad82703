//! # API Error Type
//!
//! Unified error type for commands, plus the startup error for the binary.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Order Desk                             │
//! │                                                                         │
//! │  Order form                   Rust                                      │
//! │  ──────────                   ────                                      │
//! │                                                                         │
//! │  run command('quick_fill')                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog miss? ─── ApiError::not_found ───────────────┐          │  │
//! │  │         │                                             │          │  │
//! │  │         ▼                                             ▼          │  │
//! │  │  Rule violated? ─── CoreError::NegativeQuantity ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR", "message": "Quantity cannot be ..." }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use orderdesk_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 4c1f..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Business logic error (422)
    BusinessLogic,

    /// Order can no longer be edited (409)
    OrderLocked,

    /// Submission blocked by missing steps
    IncompleteOrder,

    /// Sample request routing refused
    SampleRouting,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::ProductNotInOrder(_)
            | CoreError::CombinationNotFound { .. }
            | CoreError::MediaNotFound(_)
            | CoreError::NoSampleRequest => ApiError::new(ErrorCode::NotFound, message),
            CoreError::NegativeQuantity(_)
            | CoreError::QuantityTooLarge { .. }
            | CoreError::Validation(_) => ApiError::validation(message),
            CoreError::OrderNotEditable { .. } => ApiError::new(ErrorCode::OrderLocked, message),
            CoreError::IncompleteOrder { .. } => {
                ApiError::new(ErrorCode::IncompleteOrder, message)
            }
            CoreError::InvalidSampleTransition { .. } | CoreError::SampleActorNotAllowed { .. } => {
                ApiError::new(ErrorCode::SampleRouting, message)
            }
            CoreError::ProductInactive(_)
            | CoreError::ProductAlreadyInOrder(_)
            | CoreError::TooManyProducts { .. }
            | CoreError::NoCombinations(_)
            | CoreError::SampleRequestExists => ApiError::new(ErrorCode::BusinessLogic, message),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// App Error
// =============================================================================

/// Failures while starting up or running a script.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("usage: orderdesk <catalog.json> <script.json>")]
    Usage,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid catalog {entry}: {source}")]
    Catalog {
        entry: String,
        #[source]
        source: ValidationError,
    },

    #[error("script step {step} failed: {error}")]
    Step { step: usize, error: ApiError },

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::{SampleAction, SampleStatus};

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: ApiError = CoreError::NegativeQuantity(-2).into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: ApiError = CoreError::IncompleteOrder {
            problems: vec!["client is required".into()],
        }
        .into();
        assert_eq!(err.code, ErrorCode::IncompleteOrder);
        assert_eq!(err.message, "Order is incomplete: client is required");

        let err: ApiError = CoreError::InvalidSampleTransition {
            from: SampleStatus::Approved,
            action: SampleAction::Cancel,
        }
        .into();
        assert_eq!(err.code, ErrorCode::SampleRouting);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::not_found("Client", "c-1");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"Client not found: c-1"}"#);
    }
}

//! # Error Types
//!
//! Domain-specific error types for orderdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderdesk-core errors (this file)                                     │
//! │  ├── CoreError        - Order workflow rule violations                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  orderdesk errors (orchestration crate)                                │
//! │  ├── ApiError         - What the order form sees (serialized)          │
//! │  └── AppError         - Startup / file loading failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::sample::{SampleAction, SampleStatus};
use crate::types::Role;

// =============================================================================
// Core Error
// =============================================================================

/// Order workflow errors.
///
/// These represent business rule violations while building, submitting or
/// routing an order. They are translated to user-facing messages by the
/// orchestration layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product exists but has been deactivated.
    #[error("Product {0} is not active")]
    ProductInactive(String),

    /// Product was already added to this order.
    #[error("Product {0} is already in the order")]
    ProductAlreadyInOrder(String),

    /// Product id is not part of this order.
    #[error("Product {0} is not in the order")]
    ProductNotInOrder(String),

    /// Combination key does not belong to the product.
    #[error("Combination '{key}' does not exist for product {product_id}")]
    CombinationNotFound { product_id: String, key: String },

    /// The order already holds the maximum number of products.
    #[error("Order cannot have more than {max} products")]
    TooManyProducts { max: usize },

    /// Nothing to allocate into: the product has zero variant combinations.
    ///
    /// ## When This Occurs
    /// - A dimension has no values and the policy is `NoCombinations`
    /// - A quantity split is requested across zero combinations
    #[error("No variant combinations available for {0}")]
    NoCombinations(String),

    /// Quantities are never negative.
    #[error("Quantity cannot be negative: {0}")]
    NegativeQuantity(i64),

    /// Line quantity exceeds the allowed maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// The order has been submitted and can no longer be edited.
    #[error("Order {order_number} is {status}, cannot modify it")]
    OrderNotEditable {
        order_number: String,
        status: String,
    },

    /// Submission was attempted with missing pieces.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Submit Order"
    ///      │
    ///      ▼
    /// validate_for_submission()
    ///      │
    ///      ▼
    /// IncompleteOrder { problems: ["client is required", ...] }
    ///      │
    ///      ▼
    /// Form highlights every missing step at once
    /// ```
    #[error("Order is incomplete: {}", problems.join("; "))]
    IncompleteOrder { problems: Vec<String> },

    /// Media id is not attached to this order.
    #[error("Media not found: {0}")]
    MediaNotFound(String),

    /// The order has no sample request.
    #[error("Order has no sample request")]
    NoSampleRequest,

    /// A sample request is already attached.
    #[error("Order already has a sample request")]
    SampleRequestExists,

    /// Action is not allowed from the sample request's current status.
    #[error("Cannot {action} a sample request that is {from}")]
    InvalidSampleTransition {
        from: SampleStatus,
        action: SampleAction,
    },

    /// Action belongs to a different party.
    #[error("{actor} is not allowed to {action}")]
    SampleActorNotAllowed { actor: Role, action: SampleAction },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, malformed combination key).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., the same size listed twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Variant grid would exceed the allowed number of combinations.
    #[error("{field} expand to more than {max} combinations")]
    TooManyCombinations { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

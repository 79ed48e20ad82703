//! # Validation Module
//!
//! Input validation utilities for Order Desk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Order form (frontend)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commands (Rust)                                              │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: OrderDraft                                                   │
//! │  └── Workflow rules (editable, complete, combination exists)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use orderdesk_core::validation::{validate_email, validate_sku};
//!
//! validate_sku("TEE-CREW-01").unwrap();
//! validate_email("ops@harbor.test").unwrap();
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::variants::VariantDimension;
use crate::{
    COMBINATION_SEPARATOR, MAX_COMBINATIONS_PER_PRODUCT, MAX_NOTES_LEN, MAX_SAMPLE_QUANTITY,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use orderdesk_core::validation::validate_sku;
///
/// assert!(validate_sku("TEE-CREW-01").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name: required, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required_with_max(name, "name", 200)
}

/// Validates an optional notes field.
pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(())
}

/// Validates a reference media file name.
///
/// ## Rules
/// - Must not be empty, at most 255 characters
/// - Must not contain path separators
pub fn validate_file_name(file_name: &str) -> ValidationResult<()> {
    required_with_max(file_name, "file name", 255)?;

    if file_name.contains('/') || file_name.contains('\\') {
        return Err(ValidationError::InvalidFormat {
            field: "file name".to_string(),
            reason: "must not contain path separators".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address (shape only, no deliverability).
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        }),
    }
}

fn required_with_max(value: &str, field: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Variant Validators
// =============================================================================

/// Validates a product's variant dimensions.
///
/// ## Rules
/// - Dimension names are required and unique (case-insensitive)
/// - Values are non-empty, unique within their dimension
/// - Values must not contain the combination separator (`/`), otherwise
///   keys would become ambiguous
/// - The non-empty dimensions together expand to at most
///   `MAX_COMBINATIONS_PER_PRODUCT` combinations
///
/// Empty value lists are allowed here; the empty-dimension policy decides
/// what they mean.
pub fn validate_dimensions(dimensions: &[VariantDimension]) -> ValidationResult<()> {
    let mut names = HashSet::new();

    for dim in dimensions {
        required_with_max(&dim.name, "dimension name", 50)?;

        if !names.insert(dim.name.trim().to_lowercase()) {
            return Err(ValidationError::Duplicate {
                field: "dimension".to_string(),
                value: dim.name.clone(),
            });
        }

        let mut values = HashSet::new();
        for value in &dim.values {
            if value.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: format!("{} value", dim.name),
                });
            }

            if value.contains(COMBINATION_SEPARATOR) {
                return Err(ValidationError::InvalidFormat {
                    field: format!("{} value", dim.name),
                    reason: format!("must not contain '{}'", COMBINATION_SEPARATOR),
                });
            }

            if !values.insert(value.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: dim.name.clone(),
                    value: value.clone(),
                });
            }
        }
    }

    let within_limit = dimensions
        .iter()
        .filter(|d| !d.is_empty())
        .try_fold(1usize, |acc, d| acc.checked_mul(d.len()))
        .is_some_and(|count| count <= MAX_COMBINATIONS_PER_PRODUCT);

    if !within_limit {
        return Err(ValidationError::TooManyCombinations {
            field: "variant dimensions".to_string(),
            max: MAX_COMBINATIONS_PER_PRODUCT,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the number of physical samples requested (1..=MAX_SAMPLE_QUANTITY).
pub fn validate_sample_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 || qty > MAX_SAMPLE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "sample quantity".to_string(),
            min: 1,
            max: MAX_SAMPLE_QUANTITY as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use orderdesk_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # orderdesk-core: Pure Order Workflow Logic for Order Desk
//!
//! This crate is the **heart** of Order Desk. It contains the business logic
//! behind the multi-step "create order" workflow as pure functions and plain
//! data types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Desk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Order Form (web frontend)                    │   │
//! │  │  Client ──► Manufacturer ──► Products ──► Media ──► Submit      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    orderdesk (orchestration)                    │   │
//! │  │    add_product, quick_fill, submit_order, advance_sample ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ orderdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌─────────────┐ ┌──────────┐ ┌──────────────┐   │   │
//! │  │   │ variants │ │distribution │ │  order   │ │    sample    │   │   │
//! │  │   │ Cartesian│ │ even split  │ │  draft   │ │ routing FSM  │   │   │
//! │  │   └──────────┘ └─────────────┘ └──────────┘ └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO BACKEND CALLS • NO NETWORK • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`variants`] - Variant dimensions and Cartesian-product combinations
//! - [`distribution`] - Even split of a total quantity across combinations
//! - [`order`] - The editable order draft and its submission
//! - [`sample`] - Sample request routing between admin, manufacturer and client
//! - [`notification`] - Outbound notification rows
//! - [`types`] - Catalog and party types (Client, Manufacturer, Product, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use orderdesk_core::distribution::distribute_evenly;
//! use orderdesk_core::variants::{combination_keys, EmptyDimensionPolicy, VariantDimension};
//!
//! let dimensions = vec![
//!     VariantDimension::new("Color", ["Red", "Blue"]),
//!     VariantDimension::new("Size", ["S", "M", "L"]),
//! ];
//!
//! let keys = combination_keys(&dimensions, EmptyDimensionPolicy::Skip);
//! assert_eq!(keys.len(), 6);
//! assert_eq!(keys[0], "Red/S");
//!
//! let split = distribute_evenly(10, 3).unwrap();
//! assert_eq!(split, vec![4, 3, 3]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod distribution;
pub mod error;
pub mod notification;
pub mod order;
pub mod sample;
pub mod types;
pub mod validation;
pub mod variants;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use notification::{NotificationKind, OrderNotification};
pub use order::{OrderDraft, OrderLineItem, OrderProduct, OrderRecord, Submission};
pub use sample::{SampleAction, SampleRequest, SampleStatus, SampleTransition};
pub use types::*;
pub use variants::{EmptyDimensionPolicy, VariantCombination, VariantDimension};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Separator used to join dimension values into a combination key.
///
/// `Red` + `S` becomes `Red/S`. Dimension values may not contain it.
pub const COMBINATION_SEPARATOR: &str = "/";

/// Key of the single combination produced by a product without variants.
pub const STANDARD_COMBINATION: &str = "Standard";

/// Order number prefix for saved drafts.
pub const DEFAULT_DRAFT_PREFIX: &str = "DRAFT";

/// Order number prefix for submitted orders.
pub const DEFAULT_ORDER_PREFIX: &str = "ORD";

/// Maximum number of distinct products in one order.
pub const MAX_PRODUCTS_PER_ORDER: usize = 50;

/// Maximum quantity on a single variant line.
///
/// ## Business Reason
/// Catches typos such as an extra zero on a bulk run before the order
/// reaches the manufacturer.
pub const MAX_LINE_QUANTITY: i64 = 100_000;

/// Maximum number of variant combinations a single product may expand to.
///
/// A variant grid larger than this cannot be filled in on the order form and
/// is almost always a catalog data error.
pub const MAX_COMBINATIONS_PER_PRODUCT: usize = 10_000;

/// Maximum number of physical samples in one sample request.
pub const MAX_SAMPLE_QUANTITY: u32 = 50;

/// Maximum length of any free-text notes field.
pub const MAX_NOTES_LEN: usize = 2000;

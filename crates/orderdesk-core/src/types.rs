//! # Domain Types
//!
//! Catalog and party types used throughout Order Desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │  Manufacturer   │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  company_name   │   │  name           │   │  sku (business) │       │
//! │  │  contact_name   │   │  country        │   │  name           │       │
//! │  │  email          │   │  contact_email  │   │  dimensions     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Role       │   │  OrderStatus    │   │ ReferenceMedia  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Admin          │   │  Draft          │   │  file_name      │       │
//! │  │  Manufacturer   │   │  Submitted      │   │  media_kind     │       │
//! │  │  Client         │   └─────────────────┘   │  storage_path   │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Entities carry a UUID `id` for relations plus a human-readable business
//! key where one exists (sku, order number).

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validation::{
    validate_dimensions, validate_email, validate_product_name, validate_sku, ValidationResult,
};
use crate::variants::VariantDimension;

// =============================================================================
// Parties
// =============================================================================

/// The three parties that touch an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Internal staff building and routing orders.
    Admin,
    /// Factory producing the goods.
    Manufacturer,
    /// Customer the goods are made for.
    Client,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Manufacturer => "manufacturer",
            Role::Client => "client",
        };
        f.write_str(name)
    }
}

/// A client company that orders goods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Client {
    pub id: String,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub email: String,
}

impl Client {
    /// Checks the fields order notifications depend on.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "company_name".to_string(),
            });
        }
        validate_email(&self.email)
    }
}

/// A manufacturer that produces goods for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
    pub country: Option<String>,
    pub contact_email: String,
}

impl Manufacturer {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            });
        }
        validate_email(&self.contact_email)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product that can be ordered.
///
/// `dimensions` are kept in the order the catalog returned them. That
/// order decides the textual layout of every combination key, so it is
/// captured once when the product is added to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown on the order form.
    pub name: String,

    /// Optional description for product details.
    #[serde(default)]
    pub description: Option<String>,

    /// Variant axes (Color, Size, ...). Empty for single-variant products.
    #[serde(default)]
    pub dimensions: Vec<VariantDimension>,

    /// Whether product can be ordered (soft delete).
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Checks SKU, name and variant dimensions, including the grid size.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_sku(&self.sku)?;
        validate_product_name(&self.name)?;
        validate_dimensions(&self.dimensions)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Persistence state of an order.
///
/// Drafts and submissions differ only by this field and the order number
/// prefix; a submitted order is frozen for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order is being assembled (or was saved for later).
    #[default]
    Draft,
    /// Order has been sent to the manufacturer.
    Submitted,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Draft => f.write_str("draft"),
            OrderStatus::Submitted => f.write_str("submitted"),
        }
    }
}

// =============================================================================
// Order Number
// =============================================================================

/// Builds a human-readable order number.
///
/// Format: `<PREFIX>-<YYYYMMDD>-<SUFFIX>` where the suffix is the first six
/// hex digits of the order id, upper-cased. A draft and its submission share
/// the suffix, only the prefix and date change.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use orderdesk_core::types::order_number;
///
/// let id = "3f2a9c1e-0000-4000-8000-000000000000";
/// let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
/// assert_eq!(order_number("ORD", date, id), "ORD-20261016-3F2A9C");
/// ```
pub fn order_number(prefix: &str, date: NaiveDate, order_id: &str) -> String {
    let suffix: String = order_id
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .take(6)
        .collect::<String>()
        .to_ascii_uppercase();

    format!("{}-{}-{}", prefix, date.format("%Y%m%d"), suffix)
}

// =============================================================================
// Reference Media
// =============================================================================

/// Broad category of an attached reference file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Document,
    Video,
    Other,
}

impl MediaKind {
    /// Infers the kind from a file name's extension.
    pub fn from_file_name(file_name: &str) -> Self {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "heic" => MediaKind::Image,
            "pdf" | "doc" | "docx" | "xls" | "xlsx" | "csv" | "txt" | "ai" | "psd" => {
                MediaKind::Document
            }
            "mp4" | "mov" | "webm" | "avi" => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }
}

/// A reference file attached to an order, optionally scoped to one product.
///
/// `storage_path` is whatever the storage collaborator returned after the
/// upload; this crate never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReferenceMedia {
    pub id: String,
    pub file_name: String,
    pub media_kind: MediaKind,
    pub storage_path: String,
    /// Product this file illustrates, `None` for order-wide references.
    pub product_id: Option<String>,
    #[ts(as = "String")]
    pub uploaded_at: DateTime<Utc>,
}

impl ReferenceMedia {
    /// Creates a media reference with a fresh id and inferred kind.
    pub fn new(
        file_name: impl Into<String>,
        storage_path: impl Into<String>,
        product_id: Option<String>,
    ) -> Self {
        let file_name = file_name.into();
        ReferenceMedia {
            id: Uuid::new_v4().to_string(),
            media_kind: MediaKind::from_file_name(&file_name),
            file_name,
            storage_path: storage_path.into(),
            product_id,
            uploaded_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

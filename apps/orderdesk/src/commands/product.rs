//! # Product Commands
//!
//! Product picker, variant grid and quick fill.
//!
//! ## Variant Grid Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Variant Grid Flow                                    │
//! │                                                                         │
//! │  Picker: "Crew Tee"  (Color: Red, Blue × Size: S, M, L)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_product() ──► grid of 6 lines, all 0                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  preview_quick_fill(100) ──► 17 17 17 17 16 16   (nothing applied)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quick_fill(100) ──► same split written to the grid                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  update_line_item("Blue/L", 0) ──► manual override                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use orderdesk_core::distribution::{distribute_across, Allocation};
use orderdesk_core::validation::validate_dimensions;
use orderdesk_core::variants::{combination_count, combination_keys};
use orderdesk_core::{CoreError, Product, VariantCombination, VariantDimension};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::DraftResponse;
use crate::error::ApiError;
use crate::state::{CatalogState, DeskConfig, DraftState};

/// Product DTO for the picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub dimensions: Vec<VariantDimension>,
    /// Grid size under the configured empty-dimension policy. Zero means the
    /// product cannot be added.
    pub combination_count: usize,
}

impl ProductDto {
    fn new(product: &Product, config: &DeskConfig) -> Self {
        ProductDto {
            id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            dimensions: product.dimensions.clone(),
            combination_count: combination_count(&product.dimensions, config.empty_dimensions),
        }
    }
}

/// Lists active products matching `query` by SKU or name.
pub fn list_products(catalog: &CatalogState, config: &DeskConfig, query: &str) -> Vec<ProductDto> {
    debug!(query = %query, "list_products command");

    catalog
        .search_products(query)
        .into_iter()
        .map(|p| ProductDto::new(p, config))
        .collect()
}

/// Combination keys a product would get if added now.
///
/// Runs the same dimension checks as `add_product`, so a product that could
/// not be added does not preview a grid either.
pub fn preview_combinations(
    catalog: &CatalogState,
    config: &DeskConfig,
    product_id: &str,
) -> Result<Vec<String>, ApiError> {
    debug!(product_id = %product_id, "preview_combinations command");

    let product = catalog.product(product_id)?;
    validate_dimensions(&product.dimensions)?;
    Ok(combination_keys(&product.dimensions, config.empty_dimensions))
}

/// Adds a catalog product to the order with an all-zero variant grid.
pub fn add_product(
    catalog: &CatalogState,
    config: &DeskConfig,
    draft: &DraftState,
    product_id: &str,
) -> Result<DraftResponse, ApiError> {
    debug!(product_id = %product_id, "add_product command");

    let product = catalog.product(product_id)?;
    let result = draft.with_draft_mut(|d| {
        d.add_product(product, config.empty_dimensions)?;
        Ok::<_, CoreError>(DraftResponse::from(&*d))
    });

    result.map_err(|err| {
        warn!(product_id = %product_id, error = %err, "Product not added");
        ApiError::from(err)
    })
}

/// Removes a product and its product-scoped media from the order.
pub fn remove_product(draft: &DraftState, product_id: &str) -> Result<DraftResponse, ApiError> {
    debug!(product_id = %product_id, "remove_product command");

    draft.with_draft_mut(|d| {
        d.remove_product(product_id)?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

/// Sets the quantity on one grid line.
///
/// ## Arguments
/// * `product_id` - Product in the order
/// * `key` - Combination key, e.g. `"Red/M"` or `"Standard"`
/// * `quantity` - New quantity (0 allowed)
pub fn update_line_item(
    draft: &DraftState,
    product_id: &str,
    key: &str,
    quantity: i64,
) -> Result<DraftResponse, ApiError> {
    debug!(product_id = %product_id, key = %key, quantity = %quantity, "update_line_item command");

    draft.with_draft_mut(|d| {
        d.set_quantity(product_id, key, quantity)?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

pub fn set_line_notes(
    draft: &DraftState,
    product_id: &str,
    key: &str,
    notes: Option<String>,
) -> Result<DraftResponse, ApiError> {
    debug!(product_id = %product_id, key = %key, "set_line_notes command");

    draft.with_draft_mut(|d| {
        d.set_line_notes(product_id, key, notes)?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

pub fn set_product_notes(
    draft: &DraftState,
    product_id: &str,
    notes: Option<String>,
) -> Result<DraftResponse, ApiError> {
    debug!(product_id = %product_id, "set_product_notes command");

    draft.with_draft_mut(|d| {
        d.set_product_notes(product_id, notes)?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

/// Shows how `total` would be split over a product's grid without
/// touching the draft.
pub fn preview_quick_fill(
    draft: &DraftState,
    product_id: &str,
    total: i64,
) -> Result<Vec<Allocation>, ApiError> {
    debug!(product_id = %product_id, total = %total, "preview_quick_fill command");

    let combinations: Vec<VariantCombination> = draft.with_draft(|d| {
        d.product(product_id)
            .map(|p| p.line_items.iter().map(|l| l.combination.clone()).collect())
            .ok_or_else(|| CoreError::ProductNotInOrder(product_id.to_string()))
    })?;

    Ok(distribute_across(total, &combinations)?)
}

/// Spreads `total` evenly over a product's grid, overwriting quantities.
pub fn quick_fill(draft: &DraftState, product_id: &str, total: i64) -> Result<DraftResponse, ApiError> {
    debug!(product_id = %product_id, total = %total, "quick_fill command");

    draft.with_draft_mut(|d| {
        d.quick_fill(product_id, total)?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

/// Resets every line of a product to zero.
pub fn clear_quantities(draft: &DraftState, product_id: &str) -> Result<DraftResponse, ApiError> {
    debug!(product_id = %product_id, "clear_quantities command");

    draft.with_draft_mut(|d| {
        d.clear_quantities(product_id)?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

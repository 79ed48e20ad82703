//! # Catalog State
//!
//! Clients, manufacturers and products the order form picks from.
//!
//! Loaded once at startup from a JSON file and read-only afterwards, so no
//! mutex is needed. Every entry is validated before the first command runs.

use std::collections::HashSet;

use orderdesk_core::validation::ValidationResult;
use orderdesk_core::{Client, Manufacturer, Product, ValidationError};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, AppError};

/// Catalog file contents.
///
/// ```json
/// {
///   "clients": [{ "id": "...", "company_name": "...", "email": "..." }],
///   "manufacturers": [...],
///   "products": [{ "id": "...", "sku": "...", "name": "...", "dimensions": [...] }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogState {
    #[serde(default)]
    pub clients: Vec<Client>,

    #[serde(default)]
    pub manufacturers: Vec<Manufacturer>,

    #[serde(default)]
    pub products: Vec<Product>,
}

impl CatalogState {
    /// Validates every entry and rejects duplicate ids.
    ///
    /// ## Errors
    /// [`AppError::Catalog`] naming the first bad entry.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut ids = HashSet::new();
        for client in &self.clients {
            check_entry("client", &client.id, &mut ids, client.validate())?;
        }

        let mut ids = HashSet::new();
        for manufacturer in &self.manufacturers {
            check_entry("manufacturer", &manufacturer.id, &mut ids, manufacturer.validate())?;
        }

        let mut ids = HashSet::new();
        for product in &self.products {
            check_entry("product", &product.id, &mut ids, product.validate())?;
        }

        Ok(())
    }

    pub fn client(&self, id: &str) -> Result<&Client, ApiError> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::not_found("Client", id))
    }

    pub fn manufacturer(&self, id: &str) -> Result<&Manufacturer, ApiError> {
        self.manufacturers
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| ApiError::not_found("Manufacturer", id))
    }

    pub fn product(&self, id: &str) -> Result<&Product, ApiError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::not_found("Product", id))
    }

    /// Active products whose SKU or name contains `query` (case-insensitive).
    /// An empty query lists every active product.
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.is_active)
            .filter(|p| {
                needle.is_empty()
                    || p.sku.to_lowercase().contains(&needle)
                    || p.name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

fn check_entry<'a>(
    kind: &str,
    id: &'a str,
    seen: &mut HashSet<&'a str>,
    result: ValidationResult<()>,
) -> Result<(), AppError> {
    let entry = format!("{} {}", kind, id);
    if !seen.insert(id) {
        return Err(AppError::Catalog {
            entry,
            source: ValidationError::Duplicate {
                field: format!("{} id", kind),
                value: id.to_string(),
            },
        });
    }
    result.map_err(|source| AppError::Catalog { entry, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const CATALOG: &str = r#"{
        "clients": [
            { "id": "c-1", "company_name": "Harbor Goods", "contact_name": null, "email": "ops@harbor.test" }
        ],
        "products": [
            { "id": "p-1", "sku": "TEE-01", "name": "Crew Tee",
              "dimensions": [{ "name": "Size", "values": ["S", "M"] }] },
            { "id": "p-2", "sku": "CAP-01", "name": "Cap", "is_active": false }
        ]
    }"#;

    #[test]
    fn test_lookup_and_missing() {
        let catalog: CatalogState = serde_json::from_str(CATALOG).unwrap();
        assert_eq!(catalog.client("c-1").unwrap().company_name, "Harbor Goods");
        assert!(catalog.manufacturers.is_empty());

        let err = catalog.manufacturer("m-1").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_search_skips_inactive() {
        let catalog: CatalogState = serde_json::from_str(CATALOG).unwrap();
        let found = catalog.search_products("");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sku, "TEE-01");

        assert_eq!(catalog.search_products("crew").len(), 1);
        assert!(catalog.search_products("cap").is_empty());
    }

    #[test]
    fn test_validate_accepts_clean_catalog() {
        let catalog: CatalogState = serde_json::from_str(CATALOG).unwrap();
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_dimension_values() {
        let catalog: CatalogState = serde_json::from_str(
            r#"{ "products": [{ "id": "p-1", "sku": "TEE-01", "name": "Crew Tee",
                "dimensions": [{ "name": "Size", "values": ["S", "S"] }] }] }"#,
        )
        .unwrap();

        let err = catalog.validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::Catalog { source: ValidationError::Duplicate { .. }, .. }
        ));
        assert!(err.to_string().contains("product p-1"));
    }

    #[test]
    fn test_validate_rejects_bad_email_and_duplicate_ids() {
        let bad_email: CatalogState = serde_json::from_str(
            r#"{ "manufacturers": [{ "id": "m-1", "name": "Porto Textiles",
                "country": null, "contact_email": "porto" }] }"#,
        )
        .unwrap();
        assert!(matches!(
            bad_email.validate(),
            Err(AppError::Catalog { source: ValidationError::InvalidFormat { .. }, .. })
        ));

        let mut twice: CatalogState = serde_json::from_str(CATALOG).unwrap();
        let copy = twice.clients[0].clone();
        twice.clients.push(copy);
        let err = twice.validate().unwrap_err();
        assert!(err.to_string().contains("client c-1"));
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        let values: Vec<String> = (0..200).map(|i| format!("V{}", i)).collect();
        let mut catalog: CatalogState = serde_json::from_str(CATALOG).unwrap();
        catalog.products[0].dimensions = vec![
            orderdesk_core::VariantDimension::new("Color", values.clone()),
            orderdesk_core::VariantDimension::new("Size", values),
        ];
        assert!(matches!(
            catalog.validate(),
            Err(AppError::Catalog { source: ValidationError::TooManyCombinations { .. }, .. })
        ));
    }
}

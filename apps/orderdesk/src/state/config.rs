//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`ORDERDESK_*`)
//! 2. Config file (JSON, path in `ORDERDESK_CONFIG`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::Path;

use orderdesk_core::validation::validate_uuid;
use orderdesk_core::{EmptyDimensionPolicy, DEFAULT_DRAFT_PREFIX, DEFAULT_ORDER_PREFIX};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Admin id used when none is configured (local development).
pub const DEV_ADMIN_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeskConfig {
    /// Admin user that owns new drafts.
    pub admin_id: String,

    /// Order number prefix for saved drafts.
    pub draft_prefix: String,

    /// Order number prefix for submitted orders.
    pub order_prefix: String,

    /// What an empty variant dimension means when a product is added.
    pub empty_dimensions: EmptyDimensionPolicy,
}

impl Default for DeskConfig {
    fn default() -> Self {
        DeskConfig {
            admin_id: DEV_ADMIN_ID.to_string(),
            draft_prefix: DEFAULT_DRAFT_PREFIX.to_string(),
            order_prefix: DEFAULT_ORDER_PREFIX.to_string(),
            empty_dimensions: EmptyDimensionPolicy::Skip,
        }
    }
}

impl DeskConfig {
    /// Loads configuration: defaults, then the optional file named by
    /// `ORDERDESK_CONFIG`, then environment overrides.
    ///
    /// ## Environment Variables
    /// - `ORDERDESK_ADMIN_ID`: Admin user id (UUID)
    /// - `ORDERDESK_DRAFT_PREFIX`: Draft number prefix
    /// - `ORDERDESK_ORDER_PREFIX`: Submitted order number prefix
    /// - `ORDERDESK_EMPTY_DIMENSIONS`: `skip` or `none`
    pub fn load() -> Result<Self, AppError> {
        let base = match std::env::var("ORDERDESK_CONFIG") {
            Ok(path) => DeskConfig::from_file(Path::new(&path))?,
            Err(_) => DeskConfig::default(),
        };

        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        crate::read_json(path)
    }

    /// Applies `ORDERDESK_*` overrides from a lookup function.
    ///
    /// Taking the lookup as a closure keeps tests away from process-wide
    /// environment state.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(admin_id) = lookup("ORDERDESK_ADMIN_ID") {
            self.admin_id = admin_id;
        }

        if let Some(prefix) = lookup("ORDERDESK_DRAFT_PREFIX") {
            self.draft_prefix = prefix;
        }

        if let Some(prefix) = lookup("ORDERDESK_ORDER_PREFIX") {
            self.order_prefix = prefix;
        }

        if let Some(policy) = lookup("ORDERDESK_EMPTY_DIMENSIONS") {
            self.empty_dimensions = parse_policy(&policy)?;
        }

        Ok(self)
    }

    /// Checks prefixes are usable and distinct and the admin id is a UUID.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_uuid(&self.admin_id)
            .map_err(|e| AppError::Config(format!("admin id: {}", e)))?;

        for prefix in [&self.draft_prefix, &self.order_prefix] {
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(AppError::Config(format!(
                    "prefix '{}' must be non-empty and alphanumeric",
                    prefix
                )));
            }
        }

        if self.draft_prefix == self.order_prefix {
            return Err(AppError::Config(
                "draft and order prefixes must differ".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_policy(value: &str) -> Result<EmptyDimensionPolicy, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "skip" => Ok(EmptyDimensionPolicy::Skip),
        "none" | "no_combinations" => Ok(EmptyDimensionPolicy::NoCombinations),
        other => Err(AppError::Config(format!(
            "ORDERDESK_EMPTY_DIMENSIONS must be 'skip' or 'none', got '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = DeskConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.draft_prefix, "DRAFT");
        assert_eq!(config.order_prefix, "ORD");
    }

    #[test]
    fn test_env_overrides() {
        let config = DeskConfig::default()
            .with_overrides(lookup(&[
                ("ORDERDESK_ORDER_PREFIX", "PO"),
                ("ORDERDESK_EMPTY_DIMENSIONS", "none"),
            ]))
            .unwrap();

        assert_eq!(config.order_prefix, "PO");
        assert_eq!(config.empty_dimensions, EmptyDimensionPolicy::NoCombinations);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_policy_rejected() {
        let result = DeskConfig::default()
            .with_overrides(lookup(&[("ORDERDESK_EMPTY_DIMENSIONS", "maybe")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_same_prefixes() {
        let config = DeskConfig {
            order_prefix: "DRAFT".to_string(),
            ..DeskConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DeskConfig {
            admin_id: "admin".to_string(),
            ..DeskConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: DeskConfig = serde_json::from_str(r#"{ "orderPrefix": "PO" }"#).unwrap();
        assert_eq!(config.order_prefix, "PO");
        assert_eq!(config.draft_prefix, "DRAFT");
        assert_eq!(config.empty_dimensions, EmptyDimensionPolicy::Skip);
    }
}

//! # Draft State
//!
//! Holds the order currently being built.
//!
//! ## Thread Safety
//! The draft is wrapped in `Arc<Mutex<T>>`: several commands read and modify
//! it and only one may modify it at a time.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft State Operations                               │
//! │                                                                         │
//! │  Form Action              Command                 Draft Change          │
//! │  ───────────              ───────                 ────────────          │
//! │                                                                         │
//! │  Pick client ────────────► select_client() ─────► client = Some(..)    │
//! │                                                                         │
//! │  Add product ────────────► add_product() ───────► products.push(grid)  │
//! │                                                                         │
//! │  Quick fill ─────────────► quick_fill() ────────► grid quantities      │
//! │                                                                         │
//! │  Submit ─────────────────► submit_order() ──────► status = submitted   │
//! │                                                                         │
//! │  New order ──────────────► new_draft() ─────────► reset()              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use orderdesk_core::{OrderDraft, OrderStatus};
use serde::{Deserialize, Serialize};

/// Draft totals summary for command responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftTotals {
    pub product_count: usize,
    pub line_count: usize,
    pub total_units: i64,
    pub media_count: usize,
    pub has_sample_request: bool,
    pub status: OrderStatus,
    /// Steps still missing before the order can be submitted.
    pub problems: Vec<String>,
}

impl From<&OrderDraft> for DraftTotals {
    fn from(draft: &OrderDraft) -> Self {
        DraftTotals {
            product_count: draft.products().len(),
            line_count: draft.line_count(),
            total_units: draft.total_units(),
            media_count: draft.media().len(),
            has_sample_request: draft.sample_request().is_some(),
            status: draft.status(),
            problems: draft.submission_problems(),
        }
    }
}

/// Shared draft state.
#[derive(Debug)]
pub struct DraftState {
    draft: Arc<Mutex<OrderDraft>>,
}

impl DraftState {
    /// Starts an empty draft owned by `admin_id`.
    pub fn new(admin_id: &str) -> Self {
        DraftState {
            draft: Arc::new(Mutex::new(OrderDraft::new(admin_id))),
        }
    }

    /// Executes a function with read access to the draft.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = draft_state.with_draft(|d| DraftTotals::from(d));
    /// ```
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderDraft) -> R,
    {
        let draft = self.draft.lock().unwrap_or_else(PoisonError::into_inner);
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// draft_state.with_draft_mut(|d| d.quick_fill(&product_id, 120))?;
    /// ```
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderDraft) -> R,
    {
        let mut draft = self.draft.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut draft)
    }

    /// Replaces the draft with a fresh one, returning the old one.
    pub fn reset(&self, admin_id: &str) -> OrderDraft {
        self.with_draft_mut(|d| std::mem::replace(d, OrderDraft::new(admin_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::{EmptyDimensionPolicy, Product, VariantDimension};

    fn tee() -> Product {
        Product {
            id: "p-tee".to_string(),
            sku: "TEE-01".to_string(),
            name: "Crew Tee".to_string(),
            description: None,
            dimensions: vec![
                VariantDimension::new("Color", ["Red", "Blue"]),
                VariantDimension::new("Size", ["S", "M", "L"]),
            ],
            is_active: true,
        }
    }

    #[test]
    fn test_totals_follow_edits() {
        let state = DraftState::new("admin-1");
        state
            .with_draft_mut(|d| d.add_product(&tee(), EmptyDimensionPolicy::Skip).map(|_| ()))
            .unwrap();
        state.with_draft_mut(|d| d.quick_fill("p-tee", 100)).unwrap();

        let totals = state.with_draft(|d| DraftTotals::from(d));
        assert_eq!(totals.product_count, 1);
        assert_eq!(totals.line_count, 6);
        assert_eq!(totals.total_units, 100);
        assert_eq!(totals.status, OrderStatus::Draft);
        // no client or manufacturer yet
        assert!(!totals.problems.is_empty());
    }

    #[test]
    fn test_reset_starts_over() {
        let state = DraftState::new("admin-1");
        let first_id = state.with_draft(|d| d.id().to_string());
        state
            .with_draft_mut(|d| d.add_product(&tee(), EmptyDimensionPolicy::Skip).map(|_| ()))
            .unwrap();

        let old = state.reset("admin-1");
        assert_eq!(old.id(), first_id);
        assert_eq!(old.products().len(), 1);

        state.with_draft(|d| {
            assert_ne!(d.id(), first_id);
            assert!(d.products().is_empty());
        });
    }
}

//! # Commands Module
//!
//! Every action the order form can take.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports, DraftResponse)
//! ├── order.rs    ◄─── Parties, notes, save, submit
//! ├── product.rs  ◄─── Product picker, variant grid, quick fill
//! ├── media.rs    ◄─── Reference files
//! ├── sample.rs   ◄─── Sample request routing
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the draft
//! fn quick_fill(draft: &DraftState, product_id: &str, total: i64)
//!
//! // Needs catalog, config and draft
//! fn add_product(catalog: &CatalogState, config: &DeskConfig, draft: &DraftState, product_id: &str)
//! ```
//!
//! Commands that change the draft return the whole draft plus its totals
//! so the form can redraw from one response.

use orderdesk_core::OrderDraft;
use serde::Serialize;

use crate::state::DraftTotals;

pub mod config;
pub mod media;
pub mod order;
pub mod product;
pub mod sample;

/// Draft response including the draft and its totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub draft: OrderDraft,
    pub totals: DraftTotals,
}

impl From<&OrderDraft> for DraftResponse {
    fn from(draft: &OrderDraft) -> Self {
        DraftResponse {
            draft: draft.clone(),
            totals: DraftTotals::from(draft),
        }
    }
}

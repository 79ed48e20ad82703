//! # Order Commands
//!
//! Parties, order-level fields, save and submit.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ Building │────►│  Saved   │────►│Submitted │       │
//! │  │  Draft   │     │          │     │  Draft   │     │ (frozen) │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                │                 │             │
//! │                 select_client      save_draft       submit_order        │
//! │                 add_product        (DRAFT-...)      (ORD-...)           │
//! │                 quick_fill                                │             │
//! │                        │                                  ▼             │
//! │                        └──────────── new_draft ◄──────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use orderdesk_core::{OrderRecord, Submission};
use tracing::{debug, info, warn};

use super::DraftResponse;
use crate::error::ApiError;
use crate::state::{CatalogState, DeskConfig, DraftState};

/// Gets the current draft.
pub fn get_draft(draft: &DraftState) -> DraftResponse {
    debug!("get_draft command");
    draft.with_draft(|d| DraftResponse::from(d))
}

/// Picks the client the order is for.
pub fn select_client(
    catalog: &CatalogState,
    draft: &DraftState,
    client_id: &str,
) -> Result<DraftResponse, ApiError> {
    debug!(client_id = %client_id, "select_client command");

    let client = catalog.client(client_id)?;
    draft.with_draft_mut(|d| {
        d.select_client(client)?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

/// Picks the manufacturer that will produce the order.
pub fn select_manufacturer(
    catalog: &CatalogState,
    draft: &DraftState,
    manufacturer_id: &str,
) -> Result<DraftResponse, ApiError> {
    debug!(manufacturer_id = %manufacturer_id, "select_manufacturer command");

    let manufacturer = catalog.manufacturer(manufacturer_id)?;
    draft.with_draft_mut(|d| {
        d.select_manufacturer(manufacturer)?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

pub fn set_order_notes(
    draft: &DraftState,
    notes: Option<String>,
) -> Result<DraftResponse, ApiError> {
    debug!("set_order_notes command");

    draft.with_draft_mut(|d| {
        d.set_order_notes(notes)?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

pub fn set_due_date(
    draft: &DraftState,
    due_date: Option<NaiveDate>,
) -> Result<DraftResponse, ApiError> {
    debug!(due_date = ?due_date, "set_due_date command");

    draft.with_draft_mut(|d| {
        d.set_due_date(due_date)?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

/// Saves the draft for later.
///
/// Incomplete drafts can be saved. The first save assigns a
/// `DRAFT-<date>-<suffix>` number that later saves keep.
pub fn save_draft(config: &DeskConfig, draft: &DraftState) -> Result<OrderRecord, ApiError> {
    debug!("save_draft command");

    let record = draft.with_draft_mut(|d| d.save_as_draft(&config.draft_prefix))?;
    info!(
        order_number = %record.order_number,
        total_units = record.total_units,
        "Draft saved"
    );
    Ok(record)
}

/// Submits the order to the manufacturer.
///
/// ## Flow
/// ```text
/// submit_order()
///      │
///      ├── missing client/manufacturer/products/quantities?
///      │        → INCOMPLETE_ORDER listing every problem
///      │
///      ▼
/// record (ORD-<date>-<suffix>) + notification rows
/// ```
pub fn submit_order(config: &DeskConfig, draft: &DraftState) -> Result<Submission, ApiError> {
    debug!("submit_order command");

    let result = draft.with_draft_mut(|d| d.submit(&config.order_prefix));
    match result {
        Ok(submission) => {
            info!(
                order_number = %submission.record.order_number,
                total_units = submission.record.total_units,
                products = submission.record.products.len(),
                notifications = submission.notifications.len(),
                "Order submitted"
            );
            Ok(submission)
        }
        Err(err) => {
            warn!(error = %err, "Order submission rejected");
            Err(err.into())
        }
    }
}

/// Starts a new empty draft, discarding the current one.
pub fn new_draft(config: &DeskConfig, draft: &DraftState) -> DraftResponse {
    debug!("new_draft command");

    let previous = draft.reset(&config.admin_id);
    info!(previous_id = %previous.id(), "Started new draft");
    draft.with_draft(|d| DraftResponse::from(d))
}

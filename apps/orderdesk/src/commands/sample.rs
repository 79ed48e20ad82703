//! # Sample Commands
//!
//! Attaching a sample request and routing it between the parties.
//!
//! ## Routing
//! ```text
//! requested ─► with manufacturer ─► in production ─► shipped to admin
//!                     ▲                                    │
//!                     │                                    ▼
//!            revision requested ◄── with client ◄── received by admin
//!                                        │
//!                                        ▼
//!                                    approved
//! ```
//! An admin may cancel from any status that is not final.

use chrono::NaiveDate;
use orderdesk_core::sample::available_actions;
use orderdesk_core::{OrderNotification, Role, SampleAction, SampleRequest};
use tracing::{debug, info, warn};

use super::DraftResponse;
use crate::error::ApiError;
use crate::state::DraftState;

/// Attaches a sample request to the draft.
///
/// ## Arguments
/// * `quantity` - Sample units (1 to 50)
/// * `combinations` - Combination keys to sample; empty means any
pub fn request_sample(
    draft: &DraftState,
    quantity: u32,
    instructions: Option<String>,
    due_date: Option<NaiveDate>,
    combinations: Vec<String>,
) -> Result<DraftResponse, ApiError> {
    debug!(quantity = %quantity, "request_sample command");

    let mut sample = SampleRequest::new(quantity, instructions)?.with_combinations(combinations);
    if let Some(date) = due_date {
        sample = sample.with_due_date(date);
    }

    draft.with_draft_mut(|d| {
        d.attach_sample_request(sample)?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

/// Drops the sample request from a draft that is still editable.
pub fn cancel_sample_request(draft: &DraftState) -> Result<DraftResponse, ApiError> {
    debug!("cancel_sample_request command");

    draft.with_draft_mut(|d| {
        d.remove_sample_request()?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

/// Moves the sample request one step and returns the notification for the
/// party that now holds it.
pub fn advance_sample(
    draft: &DraftState,
    actor: Role,
    action: SampleAction,
    note: Option<String>,
) -> Result<OrderNotification, ApiError> {
    debug!(actor = %actor, action = %action, "advance_sample command");

    match draft.with_draft_mut(|d| d.advance_sample(actor, action, note)) {
        Ok(notification) => {
            info!(
                actor = %actor,
                action = %action,
                recipient = %notification.recipient_role,
                "Sample request advanced"
            );
            Ok(notification)
        }
        Err(err) => {
            warn!(actor = %actor, action = %action, error = %err, "Sample move rejected");
            Err(err.into())
        }
    }
}

/// Actions `actor` may take on the current sample request.
pub fn available_sample_actions(draft: &DraftState, actor: Role) -> Vec<SampleAction> {
    debug!(actor = %actor, "available_sample_actions command");

    draft.with_draft(|d| {
        d.sample_request()
            .map(|s| available_actions(s.status(), actor))
            .unwrap_or_default()
    })
}

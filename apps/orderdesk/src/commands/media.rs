//! # Media Commands
//!
//! Reference files (tech packs, photos, artwork) attached to the order.
//! Upload happens elsewhere; these commands only record where the file
//! was stored.

use orderdesk_core::ReferenceMedia;
use tracing::{debug, info};

use super::DraftResponse;
use crate::error::ApiError;
use crate::state::DraftState;

/// Records an uploaded file on the draft.
///
/// ## Arguments
/// * `file_name` - Original file name; the media kind is derived from it
/// * `storage_path` - Where the upload landed
/// * `product_id` - Scope the file to one product in the order, or `None`
///   for the whole order
pub fn attach_media(
    draft: &DraftState,
    file_name: &str,
    storage_path: &str,
    product_id: Option<String>,
) -> Result<DraftResponse, ApiError> {
    debug!(file_name = %file_name, product_id = ?product_id, "attach_media command");

    draft.with_draft_mut(|d| {
        d.attach_media(ReferenceMedia::new(file_name, storage_path, product_id))?;
        Ok::<_, ApiError>(DraftResponse::from(&*d))
    })
}

/// Removes a file from the draft and returns it so the stored object can
/// be deleted.
pub fn detach_media(draft: &DraftState, media_id: &str) -> Result<ReferenceMedia, ApiError> {
    debug!(media_id = %media_id, "detach_media command");

    let removed = draft.with_draft_mut(|d| d.detach_media(media_id))?;
    info!(media_id = %media_id, storage_path = %removed.storage_path, "Media detached");
    Ok(removed)
}

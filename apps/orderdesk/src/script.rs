//! # Script Runner
//!
//! Drives the commands from a JSON list of steps, the way the order form
//! would, and collects what the backend would be handed.
//!
//! ```json
//! [
//!   { "op": "select_client", "client_id": "c-1" },
//!   { "op": "add_product", "product_id": "p-tee" },
//!   { "op": "quick_fill", "product_id": "p-tee", "total": 120 },
//!   { "op": "submit" },
//!   { "op": "advance_sample", "actor": "admin", "action": "forward_to_manufacturer" }
//! ]
//! ```
//!
//! The first failing step stops the run.

use chrono::NaiveDate;
use orderdesk_core::{OrderNotification, OrderRecord, Role, SampleAction};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::{media, order, product, sample, DraftResponse};
use crate::error::{ApiError, AppError};
use crate::state::{CatalogState, DeskConfig, DraftState};

/// One form action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    SelectClient {
        client_id: String,
    },
    SelectManufacturer {
        manufacturer_id: String,
    },
    AddProduct {
        product_id: String,
    },
    RemoveProduct {
        product_id: String,
    },
    SetQuantity {
        product_id: String,
        key: String,
        quantity: i64,
    },
    SetLineNotes {
        product_id: String,
        key: String,
        #[serde(default)]
        notes: Option<String>,
    },
    SetProductNotes {
        product_id: String,
        #[serde(default)]
        notes: Option<String>,
    },
    QuickFill {
        product_id: String,
        total: i64,
    },
    ClearQuantities {
        product_id: String,
    },
    SetOrderNotes {
        #[serde(default)]
        notes: Option<String>,
    },
    SetDueDate {
        #[serde(default)]
        due_date: Option<NaiveDate>,
    },
    AttachMedia {
        file_name: String,
        storage_path: String,
        #[serde(default)]
        product_id: Option<String>,
    },
    /// Media ids are generated on attach, so scripts name the file instead.
    DetachMedia {
        file_name: String,
    },
    RequestSample {
        quantity: u32,
        #[serde(default)]
        instructions: Option<String>,
        #[serde(default)]
        due_date: Option<NaiveDate>,
        #[serde(default)]
        combinations: Vec<String>,
    },
    CancelSampleRequest,
    AdvanceSample {
        actor: Role,
        action: SampleAction,
        #[serde(default)]
        note: Option<String>,
    },
    SaveDraft,
    Submit,
    NewDraft,
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptReport {
    /// Saved drafts and submitted orders, in the order they happened.
    pub records: Vec<OrderRecord>,
    pub notifications: Vec<OrderNotification>,
    /// Draft as it stands after the last step.
    pub draft: DraftResponse,
}

/// The three state types, wired together for one run.
#[derive(Debug)]
pub struct Desk {
    catalog: CatalogState,
    config: DeskConfig,
    draft: DraftState,
}

impl Desk {
    pub fn new(catalog: CatalogState, config: DeskConfig) -> Self {
        let draft = DraftState::new(&config.admin_id);
        Desk {
            catalog,
            config,
            draft,
        }
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    /// Runs every step, stopping at the first failure.
    pub fn run(&self, steps: Vec<ScriptStep>) -> Result<ScriptReport, AppError> {
        info!(steps = steps.len(), "Running order script");

        let mut records = Vec::new();
        let mut notifications = Vec::new();

        for (idx, step) in steps.into_iter().enumerate() {
            let step_no = idx + 1;
            debug!(step = step_no, ?step, "Script step");
            self.apply(step, &mut records, &mut notifications)
                .map_err(|error| AppError::Step {
                    step: step_no,
                    error,
                })?;
        }

        Ok(ScriptReport {
            records,
            notifications,
            draft: order::get_draft(&self.draft),
        })
    }

    fn apply(
        &self,
        step: ScriptStep,
        records: &mut Vec<OrderRecord>,
        notifications: &mut Vec<OrderNotification>,
    ) -> Result<(), ApiError> {
        let (catalog, config, draft) = (&self.catalog, &self.config, &self.draft);

        match step {
            ScriptStep::SelectClient { client_id } => {
                order::select_client(catalog, draft, &client_id)?;
            }
            ScriptStep::SelectManufacturer { manufacturer_id } => {
                order::select_manufacturer(catalog, draft, &manufacturer_id)?;
            }
            ScriptStep::AddProduct { product_id } => {
                product::add_product(catalog, config, draft, &product_id)?;
            }
            ScriptStep::RemoveProduct { product_id } => {
                product::remove_product(draft, &product_id)?;
            }
            ScriptStep::SetQuantity {
                product_id,
                key,
                quantity,
            } => {
                product::update_line_item(draft, &product_id, &key, quantity)?;
            }
            ScriptStep::SetLineNotes {
                product_id,
                key,
                notes,
            } => {
                product::set_line_notes(draft, &product_id, &key, notes)?;
            }
            ScriptStep::SetProductNotes { product_id, notes } => {
                product::set_product_notes(draft, &product_id, notes)?;
            }
            ScriptStep::QuickFill { product_id, total } => {
                product::quick_fill(draft, &product_id, total)?;
            }
            ScriptStep::ClearQuantities { product_id } => {
                product::clear_quantities(draft, &product_id)?;
            }
            ScriptStep::SetOrderNotes { notes } => {
                order::set_order_notes(draft, notes)?;
            }
            ScriptStep::SetDueDate { due_date } => {
                order::set_due_date(draft, due_date)?;
            }
            ScriptStep::AttachMedia {
                file_name,
                storage_path,
                product_id,
            } => {
                media::attach_media(draft, &file_name, &storage_path, product_id)?;
            }
            ScriptStep::DetachMedia { file_name } => {
                let media_id = draft
                    .with_draft(|d| {
                        d.media()
                            .iter()
                            .find(|m| m.file_name == file_name)
                            .map(|m| m.id.clone())
                    })
                    .ok_or_else(|| ApiError::not_found("Media", &file_name))?;
                media::detach_media(draft, &media_id)?;
            }
            ScriptStep::RequestSample {
                quantity,
                instructions,
                due_date,
                combinations,
            } => {
                sample::request_sample(draft, quantity, instructions, due_date, combinations)?;
            }
            ScriptStep::CancelSampleRequest => {
                sample::cancel_sample_request(draft)?;
            }
            ScriptStep::AdvanceSample {
                actor,
                action,
                note,
            } => {
                notifications.push(sample::advance_sample(draft, actor, action, note)?);
            }
            ScriptStep::SaveDraft => {
                records.push(order::save_draft(config, draft)?);
            }
            ScriptStep::Submit => {
                let submission = order::submit_order(config, draft)?;
                records.push(submission.record);
                notifications.extend(submission.notifications);
            }
            ScriptStep::NewDraft => {
                order::new_draft(config, draft);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use orderdesk_core::{NotificationKind, OrderStatus};

    const CATALOG: &str = r#"{
        "clients": [
            { "id": "c-1", "company_name": "Harbor Goods", "contact_name": "Ana", "email": "ops@harbor.test" }
        ],
        "manufacturers": [
            { "id": "m-1", "name": "Porto Textiles", "country": "PT", "contact_email": "sales@porto.test" }
        ],
        "products": [
            { "id": "p-tee", "sku": "TEE-01", "name": "Crew Tee",
              "dimensions": [
                { "name": "Color", "values": ["Red", "Blue"] },
                { "name": "Size", "values": ["S", "M", "L"] }
              ] }
        ]
    }"#;

    fn desk() -> Desk {
        let catalog: CatalogState = serde_json::from_str(CATALOG).unwrap();
        Desk::new(catalog, DeskConfig::default())
    }

    fn steps(json: &str) -> Vec<ScriptStep> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parses_tagged_steps() {
        let parsed = steps(
            r#"[
                { "op": "quick_fill", "product_id": "p-tee", "total": 5 },
                { "op": "advance_sample", "actor": "client", "action": "request_revision" },
                { "op": "set_due_date", "due_date": "2026-11-30" },
                { "op": "submit" }
            ]"#,
        );

        assert_eq!(
            parsed[0],
            ScriptStep::QuickFill {
                product_id: "p-tee".to_string(),
                total: 5
            }
        );
        assert_eq!(
            parsed[1],
            ScriptStep::AdvanceSample {
                actor: Role::Client,
                action: SampleAction::RequestRevision,
                note: None
            }
        );
        assert_eq!(
            parsed[2],
            ScriptStep::SetDueDate {
                due_date: NaiveDate::from_ymd_opt(2026, 11, 30)
            }
        );
        assert_eq!(parsed[3], ScriptStep::Submit);
    }

    #[test]
    fn test_full_run_collects_records_and_notifications() {
        let report = desk()
            .run(steps(
                r#"[
                    { "op": "select_client", "client_id": "c-1" },
                    { "op": "select_manufacturer", "manufacturer_id": "m-1" },
                    { "op": "add_product", "product_id": "p-tee" },
                    { "op": "quick_fill", "product_id": "p-tee", "total": 100 },
                    { "op": "set_quantity", "product_id": "p-tee", "key": "Blue/L", "quantity": 0 },
                    { "op": "attach_media", "file_name": "spec.pdf", "storage_path": "m/spec.pdf" },
                    { "op": "attach_media", "file_name": "old.png", "storage_path": "m/old.png" },
                    { "op": "detach_media", "file_name": "old.png" },
                    { "op": "request_sample", "quantity": 2, "combinations": ["Red/M"] },
                    { "op": "save_draft" },
                    { "op": "submit" },
                    { "op": "advance_sample", "actor": "admin", "action": "forward_to_manufacturer" }
                ]"#,
            ))
            .unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].status, OrderStatus::Draft);
        assert_eq!(report.records[1].status, OrderStatus::Submitted);
        assert_eq!(report.records[1].total_units, 84);
        assert_eq!(report.records[1].media.len(), 1);

        let kinds: Vec<NotificationKind> = report.notifications.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationKind::OrderSubmitted,
                NotificationKind::OrderPlaced,
                NotificationKind::SampleUpdated,
            ]
        );
        assert_eq!(report.draft.totals.status, OrderStatus::Submitted);
    }

    #[test]
    fn test_failing_step_is_reported_with_index() {
        let err = desk()
            .run(steps(
                r#"[
                    { "op": "add_product", "product_id": "p-tee" },
                    { "op": "set_quantity", "product_id": "p-tee", "key": "Red/S", "quantity": -4 }
                ]"#,
            ))
            .unwrap_err();

        match err {
            AppError::Step { step, error } => {
                assert_eq!(step, 2);
                assert_eq!(error.code, ErrorCode::ValidationError);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

//! # Notifications
//!
//! Outbound notification rows. The backend stores and delivers them; this
//! crate only decides who gets told what.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Role;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A new order was submitted to the manufacturer.
    OrderSubmitted,
    /// Confirmation to the client that their order was placed.
    OrderPlaced,
    /// A sample request moved to a new status.
    SampleUpdated,
}

/// A single notification row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderNotification {
    pub recipient_role: Role,
    /// Party id when known (client or manufacturer id). Admin rows are
    /// addressed to the admin queue and carry the acting admin, if any.
    pub recipient_id: Option<String>,
    pub kind: NotificationKind,
    pub order_number: Option<String>,
    pub message: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderNotification {
    pub fn new(
        recipient_role: Role,
        recipient_id: Option<String>,
        kind: NotificationKind,
        order_number: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        OrderNotification {
            recipient_role,
            recipient_id,
            kind,
            order_number,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

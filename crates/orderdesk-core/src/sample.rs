//! # Sample Request Routing
//!
//! A sample request travels between the three parties before bulk
//! production starts. Every move goes through one transition table; a move
//! that is not in the table is rejected no matter who asks.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Requested ──(admin: forward)──► WithManufacturer ◄──────────────┐     │
//! │                                        │                         │     │
//! │                          (manufacturer: start production)        │     │
//! │                                        ▼                         │     │
//! │                                   InProduction                   │     │
//! │                                        │                         │     │
//! │                          (manufacturer: ship to admin)           │     │
//! │                                        ▼                         │     │
//! │                                  ShippedToAdmin                  │     │
//! │                                        │                         │     │
//! │                               (admin: receive)                   │     │
//! │                                        ▼                         │     │
//! │                                 ReceivedByAdmin                  │     │
//! │                                        │                         │     │
//! │                          (admin: forward to client)              │     │
//! │                                        ▼                         │     │
//! │                                    WithClient                    │     │
//! │                                   │          │                   │     │
//! │                (client: approve)  │          │ (client: revise)  │     │
//! │                                   ▼          ▼                   │     │
//! │                              Approved   RevisionRequested ───────┘     │
//! │                                          (admin: forward, revision+1)  │
//! │                                                                         │
//! │   Any non-terminal state ──(admin: cancel)──► Cancelled                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::Role;
use crate::validation::{validate_notes, validate_sample_quantity};

// =============================================================================
// Status & Action
// =============================================================================

/// Where a sample request currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SampleStatus {
    #[default]
    Requested,
    WithManufacturer,
    InProduction,
    ShippedToAdmin,
    ReceivedByAdmin,
    WithClient,
    RevisionRequested,
    Approved,
    Cancelled,
}

impl SampleStatus {
    /// Approved and cancelled requests never move again.
    pub const fn is_terminal(self) -> bool {
        matches!(self, SampleStatus::Approved | SampleStatus::Cancelled)
    }

    /// Party that is told when a request enters this status.
    pub const fn notify_role(self) -> Role {
        match self {
            SampleStatus::WithManufacturer
            | SampleStatus::Approved
            | SampleStatus::Cancelled => Role::Manufacturer,
            SampleStatus::WithClient => Role::Client,
            SampleStatus::Requested
            | SampleStatus::InProduction
            | SampleStatus::ShippedToAdmin
            | SampleStatus::ReceivedByAdmin
            | SampleStatus::RevisionRequested => Role::Admin,
        }
    }
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleStatus::Requested => "requested",
            SampleStatus::WithManufacturer => "with manufacturer",
            SampleStatus::InProduction => "in production",
            SampleStatus::ShippedToAdmin => "shipped to admin",
            SampleStatus::ReceivedByAdmin => "received by admin",
            SampleStatus::WithClient => "with client",
            SampleStatus::RevisionRequested => "revision requested",
            SampleStatus::Approved => "approved",
            SampleStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A move a party can make on a sample request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SampleAction {
    ForwardToManufacturer,
    StartProduction,
    ShipToAdmin,
    ReceiveAtAdmin,
    ForwardToClient,
    Approve,
    RequestRevision,
    Cancel,
}

impl SampleAction {
    /// The only party allowed to perform this action.
    pub const fn actor(self) -> Role {
        match self {
            SampleAction::StartProduction | SampleAction::ShipToAdmin => Role::Manufacturer,
            SampleAction::Approve | SampleAction::RequestRevision => Role::Client,
            SampleAction::ForwardToManufacturer
            | SampleAction::ReceiveAtAdmin
            | SampleAction::ForwardToClient
            | SampleAction::Cancel => Role::Admin,
        }
    }
}

impl fmt::Display for SampleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleAction::ForwardToManufacturer => "forward to manufacturer",
            SampleAction::StartProduction => "start production",
            SampleAction::ShipToAdmin => "ship to admin",
            SampleAction::ReceiveAtAdmin => "receive at admin",
            SampleAction::ForwardToClient => "forward to client",
            SampleAction::Approve => "approve",
            SampleAction::RequestRevision => "request revision",
            SampleAction::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Transition Table
// =============================================================================

/// `(from, action, to)`. Cancel is handled separately: it applies to every
/// non-terminal status.
const TRANSITIONS: &[(SampleStatus, SampleAction, SampleStatus)] = &[
    (
        SampleStatus::Requested,
        SampleAction::ForwardToManufacturer,
        SampleStatus::WithManufacturer,
    ),
    (
        SampleStatus::WithManufacturer,
        SampleAction::StartProduction,
        SampleStatus::InProduction,
    ),
    (
        SampleStatus::InProduction,
        SampleAction::ShipToAdmin,
        SampleStatus::ShippedToAdmin,
    ),
    (
        SampleStatus::ShippedToAdmin,
        SampleAction::ReceiveAtAdmin,
        SampleStatus::ReceivedByAdmin,
    ),
    (
        SampleStatus::ReceivedByAdmin,
        SampleAction::ForwardToClient,
        SampleStatus::WithClient,
    ),
    (
        SampleStatus::WithClient,
        SampleAction::Approve,
        SampleStatus::Approved,
    ),
    (
        SampleStatus::WithClient,
        SampleAction::RequestRevision,
        SampleStatus::RevisionRequested,
    ),
    (
        SampleStatus::RevisionRequested,
        SampleAction::ForwardToManufacturer,
        SampleStatus::WithManufacturer,
    ),
];

/// Looks up the status an action leads to, ignoring who performs it.
pub fn next_status(from: SampleStatus, action: SampleAction) -> Option<SampleStatus> {
    if action == SampleAction::Cancel {
        return (!from.is_terminal()).then_some(SampleStatus::Cancelled);
    }

    TRANSITIONS
        .iter()
        .find(|(f, a, _)| *f == from && *a == action)
        .map(|(_, _, to)| *to)
}

/// Actions `actor` may take from `from`, in table order.
pub fn available_actions(from: SampleStatus, actor: Role) -> Vec<SampleAction> {
    let mut actions: Vec<SampleAction> = TRANSITIONS
        .iter()
        .filter(|(f, a, _)| *f == from && a.actor() == actor)
        .map(|(_, a, _)| *a)
        .collect();

    if actor == Role::Admin && !from.is_terminal() {
        actions.push(SampleAction::Cancel);
    }

    actions
}

// =============================================================================
// Sample Request
// =============================================================================

/// One applied move, kept for the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SampleTransition {
    pub from: SampleStatus,
    pub to: SampleStatus,
    pub action: SampleAction,
    pub actor: Role,
    pub note: Option<String>,
    #[ts(as = "String")]
    pub at: DateTime<Utc>,
}

/// Request for physical samples attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SampleRequest {
    pub id: String,
    /// Number of physical samples.
    pub quantity: u32,
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    pub instructions: Option<String>,
    /// Variant combinations the samples must cover. Empty means "any".
    pub combination_keys: Vec<String>,
    status: SampleStatus,
    /// Bumped every time a revision goes back to the manufacturer.
    revision: u32,
    history: Vec<SampleTransition>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl SampleRequest {
    /// Creates a request in the `Requested` status.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::sample::{SampleAction, SampleRequest, SampleStatus};
    /// use orderdesk_core::types::Role;
    ///
    /// let mut sample = SampleRequest::new(2, Some("Gold zipper pulls".into())).unwrap();
    /// sample.apply(Role::Admin, SampleAction::ForwardToManufacturer, None).unwrap();
    /// assert_eq!(sample.status(), SampleStatus::WithManufacturer);
    ///
    /// // a client cannot start production
    /// assert!(sample.apply(Role::Client, SampleAction::StartProduction, None).is_err());
    /// ```
    pub fn new(quantity: u32, instructions: Option<String>) -> CoreResult<Self> {
        validate_sample_quantity(quantity)?;
        if let Some(text) = &instructions {
            validate_notes(text)?;
        }

        Ok(SampleRequest {
            id: Uuid::new_v4().to_string(),
            quantity,
            due_date: None,
            instructions,
            combination_keys: Vec::new(),
            status: SampleStatus::Requested,
            revision: 0,
            history: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Sets the date the samples are needed by.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Restricts the samples to specific combinations.
    pub fn with_combinations<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.combination_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn status(&self) -> SampleStatus {
        self.status
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn history(&self) -> &[SampleTransition] {
        &self.history
    }

    /// Applies an action on behalf of `actor`.
    ///
    /// The actor check runs first, so a wrong party gets
    /// [`CoreError::SampleActorNotAllowed`] even when the status would also
    /// reject the move.
    pub fn apply(
        &mut self,
        actor: Role,
        action: SampleAction,
        note: Option<String>,
    ) -> CoreResult<SampleTransition> {
        if action.actor() != actor {
            return Err(CoreError::SampleActorNotAllowed { actor, action });
        }

        let from = self.status;
        let to = next_status(from, action)
            .ok_or(CoreError::InvalidSampleTransition { from, action })?;

        if let Some(text) = &note {
            validate_notes(text)?;
        }

        if from == SampleStatus::RevisionRequested && to == SampleStatus::WithManufacturer {
            self.revision += 1;
        }

        let transition = SampleTransition {
            from,
            to,
            action,
            actor,
            note,
            at: Utc::now(),
        };

        self.status = to;
        self.history.push(transition.clone());
        Ok(transition)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

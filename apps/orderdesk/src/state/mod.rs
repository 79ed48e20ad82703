//! # State Module
//!
//! Application state for the order desk.
//!
//! Separate state types rather than one `AppState` struct: each command
//! declares exactly the state it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CatalogState │  │  DraftState  │  │   DeskConfig     │              │
//! │  │              │  │              │  │                  │              │
//! │  │  clients     │  │  Arc<Mutex<  │  │  admin_id        │              │
//! │  │  makers      │  │  OrderDraft  │  │  prefixes        │              │
//! │  │  products    │  │  >>          │  │  empty dims      │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: Read-only after load                                  │
//! │  • DraftState: Protected by Arc<Mutex<T>> for exclusive access         │
//! │  • DeskConfig: Read-only after initialization                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod draft;

pub use catalog::CatalogState;
pub use config::{DeskConfig, DEV_ADMIN_ID};
pub use draft::{DraftState, DraftTotals};

//! The filtered record list shared by every admin page.
//!
//! ```text
//!   Repository (memory | sqlite)
//!          │  list()
//!          ▼
//!     RecordStore ──── add / update_by_id / remove_by_id / set_status
//!          │               (whole-sequence replacement)
//!          ▼
//!   Query (search AND facet filters) ──► DerivedView (order-stable, optional sort)
//!          ▲
//!          │
//!      ListPage ── create / update / confirm-delete / set-status ──► Outbox
//! ```

mod deferred;
mod dyn_page;
mod notify;
mod page;
mod patch;
mod query;
mod store;
mod view;

pub use deferred::*;
pub use dyn_page::*;
pub use notify::*;
pub use page::*;
pub use patch::*;
pub use query::*;
pub use store::*;
pub use view::*;

use thiserror::Error;

use crate::db::DbError;
use crate::models::EntityKind;
use crate::time::TimeError;

/// Errors raised by list pages and their repositories.
#[derive(Error, Debug)]
pub enum ListError {
    #[error("{kind} {id} no longer exists")]
    StaleReference { kind: EntityKind, id: String },

    #[error("{kind} is missing required fields: {}", .fields.join(", "))]
    MissingFields {
        kind: EntityKind,
        fields: Vec<&'static str>,
    },

    #[error("Duplicate identifier: {0}")]
    DuplicateId(String),

    #[error("Unknown facet '{facet}' for {kind}")]
    UnknownFacet { kind: EntityKind, facet: String },

    #[error("Unknown status '{value}' for {kind}")]
    UnknownStatus { kind: EntityKind, value: String },

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("No delete awaiting confirmation for {kind} {id}")]
    NoPendingDelete { kind: EntityKind, id: String },

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for ListError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ListError::LockPoisoned(e.to_string())
    }
}

pub type ListResult<T> = Result<T, ListError>;

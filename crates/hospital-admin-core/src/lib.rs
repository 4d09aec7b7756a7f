//! Hospital Admin Core Library
//!
//! Record lists behind a hospital administration front end: appointments,
//! patients, doctors, pharmacy stock, beds, medical records, reports, staff
//! schedules and invoices.
//!
//! # Architecture
//!
//! ```text
//!   Host UI (native / CLI)
//!          │  FfiEntityKind + JSON records
//!          ▼
//!   HospitalAdmin ──► AdminSession ──► DynPage (one per kind)
//!                                          │
//!                                     ListPage<T>
//!                          ┌───────────────┼────────────────┐
//!                          ▼               ▼                ▼
//!                    Query + Sort     Repository<T>       Outbox
//!                          │          memory | sqlite   notifications
//!                          ▼
//!                     DerivedView
//! ```
//!
//! # Core Principle
//!
//! **Every mutation replaces the record list wholesale.** Readers holding an
//! earlier list never observe a partial change.
//!
//! # Modules
//!
//! - [`models`]: Entity types and their status enums
//! - [`list`]: Record store, query composition, derived view and list pages
//! - [`repo`]: Storage backends for list pages
//! - [`db`]: SQLite layer for persistent sessions
//! - [`time`]: 24-hour / 12-hour clock conversion

pub mod config;
pub mod db;
pub mod ids;
pub mod list;
pub mod models;
pub mod repo;
pub mod seed;
pub mod session;
pub mod time;

// Re-export commonly used types
pub use config::{ConfigError, CoreConfig, Storage};
pub use db::Database;
pub use ids::IdScheme;
pub use list::{
    DeferredAction, DeleteRequest, DerivedView, DynPage, Level, ListError, ListPage, ListResult,
    Notification, Patch, Query, RecordStore, Selection, SortOrder, SortSpec,
};
pub use models::{
    Appointment, AppointmentStatus, Bed, BedStatus, Doctor, DoctorStatus, Entity, EntityKind,
    Invoice, InvoiceStatus, MedicalRecord, Medication, Patient, PatientStatus, RecordStatus,
    Report, ReportStatus, ScheduleEntry, ShiftStatus, StatusValue, StockStatus,
};
pub use session::AdminSession;
pub use time::{to_12h, to_24h, ClockTime, TimeError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HospitalAdminError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ListError> for HospitalAdminError {
    fn from(e: ListError) -> Self {
        match e {
            ListError::StaleReference { .. } | ListError::NoPendingDelete { .. } => {
                HospitalAdminError::NotFound(e.to_string())
            }
            ListError::Database(_) | ListError::LockPoisoned(_) => {
                HospitalAdminError::DatabaseError(e.to_string())
            }
            ListError::Json(_) => HospitalAdminError::SerializationError(e.to_string()),
            ListError::MissingFields { .. }
            | ListError::DuplicateId(_)
            | ListError::UnknownFacet { .. }
            | ListError::UnknownStatus { .. }
            | ListError::InvalidPatch(_)
            | ListError::Time(_) => HospitalAdminError::InvalidInput(e.to_string()),
        }
    }
}

impl From<TimeError> for HospitalAdminError {
    fn from(e: TimeError) -> Self {
        HospitalAdminError::InvalidInput(e.to_string())
    }
}

impl From<ConfigError> for HospitalAdminError {
    fn from(e: ConfigError) -> Self {
        HospitalAdminError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for HospitalAdminError {
    fn from(e: serde_json::Error) -> Self {
        HospitalAdminError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for HospitalAdminError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HospitalAdminError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a session whose records persist in the SQLite file at `path`.
#[uniffi::export]
pub fn open_session(path: String, seed_mock_data: bool) -> Result<Arc<HospitalAdmin>, HospitalAdminError> {
    let config = CoreConfig::default()
        .with_storage(Storage::Sqlite(path.into()))
        .with_seed(seed_mock_data);
    HospitalAdmin::from_config(&config)
}

/// Open a session-local session starting from mock records.
#[uniffi::export]
pub fn open_session_in_memory() -> Result<Arc<HospitalAdmin>, HospitalAdminError> {
    HospitalAdmin::from_config(&CoreConfig::default())
}

/// Open a session configured from `HOSPITAL_ADMIN_*` environment variables.
#[uniffi::export]
pub fn open_session_from_env() -> Result<Arc<HospitalAdmin>, HospitalAdminError> {
    HospitalAdmin::from_config(&CoreConfig::from_env()?)
}

/// Convert `HH:MM` to `hh:MM AM|PM`.
#[uniffi::export]
pub fn convert_time_to_12h(time_24h: String) -> Result<String, HospitalAdminError> {
    Ok(to_12h(&time_24h)?)
}

/// Convert `hh:MM AM|PM` to `HH:MM`.
#[uniffi::export]
pub fn convert_time_to_24h(time_12h: String) -> Result<String, HospitalAdminError> {
    Ok(to_24h(&time_12h)?)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI. Records cross the boundary as JSON
/// object strings.
#[derive(uniffi::Object)]
pub struct HospitalAdmin {
    session: Mutex<AdminSession>,
}

impl HospitalAdmin {
    pub fn from_config(config: &CoreConfig) -> Result<Arc<Self>, HospitalAdminError> {
        let session = AdminSession::open(config)?;
        Ok(Arc::new(Self {
            session: Mutex::new(session),
        }))
    }

    fn with_page<R>(
        &self,
        kind: FfiEntityKind,
        f: impl FnOnce(&mut dyn DynPage) -> ListResult<R>,
    ) -> Result<R, HospitalAdminError> {
        let kind = EntityKind::from(kind);
        let mut session = self.session.lock()?;
        let page = session
            .page_mut(kind)
            .ok_or_else(|| HospitalAdminError::NotFound(format!("no {kind} page")))?;
        Ok(f(page)?)
    }
}

#[uniffi::export]
impl HospitalAdmin {
    // =========================================================================
    // Page Metadata
    // =========================================================================

    /// Facets the page can filter and sort on.
    pub fn facets(&self, kind: FfiEntityKind) -> Result<Vec<String>, HospitalAdminError> {
        self.with_page(kind, |page| {
            Ok(page.facets().iter().map(|f| f.to_string()).collect())
        })
    }

    /// Status values in display order.
    pub fn statuses(&self, kind: FfiEntityKind) -> Result<Vec<String>, HospitalAdminError> {
        self.with_page(kind, |page| {
            Ok(page.statuses().into_iter().map(String::from).collect())
        })
    }

    // =========================================================================
    // Query Operations
    // =========================================================================

    pub fn set_search(&self, kind: FfiEntityKind, term: String) -> Result<(), HospitalAdminError> {
        self.with_page(kind, |page| {
            page.set_search(&term);
            Ok(())
        })
    }

    /// Select a facet value; `"all"` clears it.
    pub fn set_filter(
        &self,
        kind: FfiEntityKind,
        facet: String,
        value: String,
    ) -> Result<(), HospitalAdminError> {
        self.with_page(kind, |page| page.set_filter(&facet, &value))
    }

    pub fn clear_filters(&self, kind: FfiEntityKind) -> Result<(), HospitalAdminError> {
        self.with_page(kind, |page| {
            page.clear_filters();
            Ok(())
        })
    }

    /// Sort the view by a facet, or restore source order with `None`.
    pub fn set_sort(
        &self,
        kind: FfiEntityKind,
        facet: Option<String>,
        descending: bool,
    ) -> Result<(), HospitalAdminError> {
        let sort = facet.map(|facet| {
            if descending {
                SortSpec::descending(&facet)
            } else {
                SortSpec::ascending(&facet)
            }
        });
        self.with_page(kind, |page| page.set_sort(sort))
    }

    /// Visible records as JSON objects.
    pub fn list(&self, kind: FfiEntityKind) -> Result<Vec<String>, HospitalAdminError> {
        self.with_page(kind, |page| {
            page.visible()?
                .iter()
                .map(|record| serde_json::to_string(record).map_err(ListError::from))
                .collect()
        })
    }

    pub fn total(&self, kind: FfiEntityKind) -> Result<u32, HospitalAdminError> {
        self.with_page(kind, |page| Ok(page.total()? as u32))
    }

    pub fn get(&self, kind: FfiEntityKind, id: String) -> Result<Option<String>, HospitalAdminError> {
        self.with_page(kind, |page| {
            page.get_json(&id)?
                .map(|record| serde_json::to_string(&record).map_err(ListError::from))
                .transpose()
        })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a record from a JSON object. Returns the assigned identifier.
    pub fn create(&self, kind: FfiEntityKind, record_json: String) -> Result<String, HospitalAdminError> {
        let record = serde_json::from_str(&record_json)?;
        self.with_page(kind, |page| page.create_json(record))
    }

    /// Current values of a record for its edit form.
    pub fn open_editor(&self, kind: FfiEntityKind, id: String) -> Result<String, HospitalAdminError> {
        self.with_page(kind, |page| {
            let record = page.open_editor_json(&id)?;
            Ok(serde_json::to_string(&record)?)
        })
    }

    /// Merge a JSON object of changed fields into a record.
    pub fn update(
        &self,
        kind: FfiEntityKind,
        id: String,
        patch_json: String,
    ) -> Result<String, HospitalAdminError> {
        let patch = Patch::from_json(&patch_json)?;
        self.with_page(kind, |page| {
            let updated = page.update_json(&id, patch)?;
            Ok(serde_json::to_string(&updated)?)
        })
    }

    /// Change status immediately.
    pub fn set_status(
        &self,
        kind: FfiEntityKind,
        id: String,
        status: String,
    ) -> Result<(), HospitalAdminError> {
        self.with_page(kind, |page| page.set_status_str(&id, &status))
    }

    /// Ask to delete a record. Returns the confirmation prompt.
    pub fn request_delete(&self, kind: FfiEntityKind, id: String) -> Result<String, HospitalAdminError> {
        self.with_page(kind, |page| page.request_delete(&id))
    }

    pub fn confirm_delete(&self, kind: FfiEntityKind, id: String) -> Result<(), HospitalAdminError> {
        self.with_page(kind, |page| page.confirm_delete(&id))
    }

    pub fn cancel_delete(&self, kind: FfiEntityKind, id: String) -> Result<(), HospitalAdminError> {
        self.with_page(kind, |page| {
            page.cancel_delete(&id);
            Ok(())
        })
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Take the notifications queued by one page.
    pub fn drain_notifications(
        &self,
        kind: FfiEntityKind,
    ) -> Result<Vec<FfiNotification>, HospitalAdminError> {
        self.with_page(kind, |page| {
            Ok(page.drain_notifications().into_iter().map(Into::into).collect())
        })
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiEntityKind {
    Appointment,
    Patient,
    Doctor,
    Medication,
    Bed,
    MedicalRecord,
    Report,
    Schedule,
    Invoice,
}

impl From<FfiEntityKind> for EntityKind {
    fn from(kind: FfiEntityKind) -> Self {
        match kind {
            FfiEntityKind::Appointment => EntityKind::Appointment,
            FfiEntityKind::Patient => EntityKind::Patient,
            FfiEntityKind::Doctor => EntityKind::Doctor,
            FfiEntityKind::Medication => EntityKind::Medication,
            FfiEntityKind::Bed => EntityKind::Bed,
            FfiEntityKind::MedicalRecord => EntityKind::MedicalRecord,
            FfiEntityKind::Report => EntityKind::Report,
            FfiEntityKind::Schedule => EntityKind::Schedule,
            FfiEntityKind::Invoice => EntityKind::Invoice,
        }
    }
}

impl From<EntityKind> for FfiEntityKind {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Appointment => FfiEntityKind::Appointment,
            EntityKind::Patient => FfiEntityKind::Patient,
            EntityKind::Doctor => FfiEntityKind::Doctor,
            EntityKind::Medication => FfiEntityKind::Medication,
            EntityKind::Bed => FfiEntityKind::Bed,
            EntityKind::MedicalRecord => FfiEntityKind::MedicalRecord,
            EntityKind::Report => FfiEntityKind::Report,
            EntityKind::Schedule => FfiEntityKind::Schedule,
            EntityKind::Invoice => FfiEntityKind::Invoice,
        }
    }
}

/// FFI-safe notification.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNotification {
    /// `success`, `info` or `error`.
    pub level: String,
    pub title: String,
    pub description: String,
}

impl From<Notification> for FfiNotification {
    fn from(n: Notification) -> Self {
        let level = match n.level {
            Level::Success => "success",
            Level::Info => "info",
            Level::Error => "error",
        };
        Self {
            level: level.to_string(),
            title: n.title,
            description: n.description,
        }
    }
}

//! Domain models for the hospital admin record lists.
//!
//! Every list page holds records of one [`Entity`] type. An entity knows its
//! identifier, its status, which fields free-text search looks at, and which
//! categorical facets a page may filter on.

mod appointment;
mod bed;
mod doctor;
mod invoice;
mod medical_record;
mod medication;
mod patient;
mod report;
mod schedule;

pub use appointment::*;
pub use bed::*;
pub use doctor::*;
pub use invoice::*;
pub use medical_record::*;
pub use medication::*;
pub use patient::*;
pub use report::*;
pub use schedule::*;

use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::time::TimeResult;

/// A per-entity status value.
///
/// Transitions are unrestricted: any value may replace any other.
pub trait StatusValue:
    Copy + Eq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Every value, in display order.
    const ALL: &'static [Self];

    /// Wire/display name (kebab-case).
    fn as_str(&self) -> &'static str;

    /// Parse a wire name, ignoring case and surrounding whitespace.
    fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
    }
}

/// A record held by a list page.
pub trait Entity:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Status: StatusValue;

    const KIND: EntityKind;

    /// Facet names accepted by categorical filters and sorting.
    const FACETS: &'static [&'static str];

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);

    /// Values matched by free-text search.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of a named facet, `None` if the facet is unknown or unset.
    fn facet(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Names of required fields that are currently blank.
    fn missing_required(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Bring input values into their stored form, rejecting ones that have none.
    fn normalize(&mut self) -> TimeResult<()> {
        Ok(())
    }
}

/// Names of the given fields whose value is empty or whitespace.
pub(crate) fn blank_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

/// The kinds of record list an admin session holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
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

impl EntityKind {
    pub const ALL: &'static [EntityKind] = &[
        EntityKind::Appointment,
        EntityKind::Patient,
        EntityKind::Doctor,
        EntityKind::Medication,
        EntityKind::Bed,
        EntityKind::MedicalRecord,
        EntityKind::Report,
        EntityKind::Schedule,
        EntityKind::Invoice,
    ];

    /// Stable name, also used as the storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Appointment => "appointments",
            EntityKind::Patient => "patients",
            EntityKind::Doctor => "doctors",
            EntityKind::Medication => "medications",
            EntityKind::Bed => "beds",
            EntityKind::MedicalRecord => "records",
            EntityKind::Report => "reports",
            EntityKind::Schedule => "schedule",
            EntityKind::Invoice => "invoices",
        }
    }

    /// Prefix for sequential identifiers.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            EntityKind::Appointment => "APT",
            EntityKind::Patient => "P",
            EntityKind::Doctor => "D",
            EntityKind::Medication => "MED",
            EntityKind::Bed => "B",
            EntityKind::MedicalRecord => "MR",
            EntityKind::Report => "R",
            EntityKind::Schedule => "S",
            EntityKind::Invoice => "INV",
        }
    }

    /// Singular label used in notifications.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Appointment => "Appointment",
            EntityKind::Patient => "Patient",
            EntityKind::Doctor => "Doctor",
            EntityKind::Medication => "Medication",
            EntityKind::Bed => "Bed",
            EntityKind::MedicalRecord => "Medical record",
            EntityKind::Report => "Report",
            EntityKind::Schedule => "Schedule entry",
            EntityKind::Invoice => "Invoice",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted || kind.label().to_lowercase() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
                format!(
                    "Invalid kind: '{}'. Must be one of: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}

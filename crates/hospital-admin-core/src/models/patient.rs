//! Patient models.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{blank_fields, Entity, EntityKind, StatusValue};

/// Patient status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    Admitted,
    Outpatient,
    Critical,
    Discharged,
}

impl StatusValue for PatientStatus {
    const ALL: &'static [Self] = &[
        PatientStatus::Admitted,
        PatientStatus::Outpatient,
        PatientStatus::Critical,
        PatientStatus::Discharged,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Admitted => "admitted",
            PatientStatus::Outpatient => "outpatient",
            PatientStatus::Critical => "critical",
            PatientStatus::Discharged => "discharged",
        }
    }
}

/// One entry in a patient's medical history (append-only).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub diagnosis: String,
    pub treatment: String,
    pub doctor_name: String,
}

/// A patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    /// Gender as entered (male, female, other)
    pub gender: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    /// ABO/Rh blood type, e.g. "O+"
    pub blood_type: Option<String>,
    /// Primary condition / reason for care
    pub condition: String,
    /// Attending doctor name (free text)
    pub doctor_name: String,
    pub admission_date: Option<NaiveDate>,
    pub status: PatientStatus,
    #[serde(default)]
    pub medical_history: Vec<HistoryEntry>,
}

impl Patient {
    /// Create a new outpatient with required fields.
    pub fn new(name: String, age: u32, gender: String, phone: String) -> Self {
        Self {
            id: String::new(),
            name,
            age,
            gender,
            phone,
            email: None,
            address: None,
            blood_type: None,
            condition: String::new(),
            doctor_name: String::new(),
            admission_date: None,
            status: PatientStatus::Outpatient,
            medical_history: Vec::new(),
        }
    }

    /// Most recent history entry by date.
    pub fn latest_history(&self) -> Option<&HistoryEntry> {
        self.medical_history.iter().max_by_key(|entry| entry.date)
    }
}

impl Entity for Patient {
    type Status = PatientStatus;

    const KIND: EntityKind = EntityKind::Patient;
    const FACETS: &'static [&'static str] = &["status", "gender", "blood_type", "doctor"];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status(&self) -> PatientStatus {
        self.status
    }

    fn set_status(&mut self, status: PatientStatus) {
        self.status = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.id.as_str(),
            self.condition.as_str(),
            self.doctor_name.as_str(),
        ]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "gender" => Some(Cow::Borrowed(self.gender.as_str())),
            "blood_type" => self.blood_type.as_deref().map(Cow::Borrowed),
            "doctor" => Some(Cow::Borrowed(self.doctor_name.as_str())),
            _ => None,
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("name", self.name.as_str()),
            ("gender", self.gender.as_str()),
            ("phone", self.phone.as_str()),
        ])
    }
}

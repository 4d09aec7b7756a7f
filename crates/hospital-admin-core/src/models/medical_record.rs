//! Medical record models.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{blank_fields, Entity, EntityKind, StatusValue};

/// Review state of a medical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    Pending,
    Reviewed,
    Final,
}

impl StatusValue for RecordStatus {
    const ALL: &'static [Self] = &[
        RecordStatus::Pending,
        RecordStatus::Reviewed,
        RecordStatus::Final,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Reviewed => "reviewed",
            RecordStatus::Final => "final",
        }
    }
}

/// Metadata for a file attached to a record. File contents are not stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    /// MIME type as reported by the uploader
    pub content_type: String,
    pub size_bytes: u64,
    pub uploaded_on: NaiveDate,
}

/// A clinical record entry (lab result, imaging, prescription, diagnosis).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecord {
    pub id: String,
    pub patient_name: String,
    pub patient_id: Option<String>,
    #[serde(rename = "type")]
    pub record_type: String,
    pub date: NaiveDate,
    pub doctor_name: String,
    pub department: String,
    pub diagnosis: String,
    pub notes: Option<String>,
    pub status: RecordStatus,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl MedicalRecord {
    pub fn new(
        patient_name: String,
        record_type: String,
        date: NaiveDate,
        doctor_name: String,
        diagnosis: String,
    ) -> Self {
        Self {
            id: String::new(),
            patient_name,
            patient_id: None,
            record_type,
            date,
            doctor_name,
            department: String::new(),
            diagnosis,
            notes: None,
            status: RecordStatus::Pending,
            attachments: Vec::new(),
        }
    }

    /// Total size of all attachments.
    pub fn attachment_bytes(&self) -> u64 {
        self.attachments.iter().map(|a| a.size_bytes).sum()
    }
}

impl Entity for MedicalRecord {
    type Status = RecordStatus;

    const KIND: EntityKind = EntityKind::MedicalRecord;
    const FACETS: &'static [&'static str] = &["status", "type", "department"];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status(&self) -> RecordStatus {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.patient_name.as_str(),
            self.id.as_str(),
            self.doctor_name.as_str(),
            self.diagnosis.as_str(),
        ]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "type" => Some(Cow::Borrowed(self.record_type.as_str())),
            "department" => Some(Cow::Borrowed(self.department.as_str())),
            _ => None,
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("patient_name", self.patient_name.as_str()),
            ("type", self.record_type.as_str()),
            ("doctor_name", self.doctor_name.as_str()),
        ])
    }
}

//! Doctor models.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::{blank_fields, Entity, EntityKind, StatusValue};

/// Doctor availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoctorStatus {
    Available,
    Busy,
    OnLeave,
}

impl StatusValue for DoctorStatus {
    const ALL: &'static [Self] = &[
        DoctorStatus::Available,
        DoctorStatus::Busy,
        DoctorStatus::OnLeave,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            DoctorStatus::Available => "available",
            DoctorStatus::Busy => "busy",
            DoctorStatus::OnLeave => "on-leave",
        }
    }
}

/// A member of medical staff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub department: String,
    pub phone: String,
    pub email: String,
    pub experience_years: u32,
    /// Number of patients currently assigned
    #[serde(default)]
    pub patient_count: u32,
    pub status: DoctorStatus,
}

impl Doctor {
    pub fn new(name: String, specialization: String, department: String) -> Self {
        Self {
            id: String::new(),
            name,
            specialization,
            department,
            phone: String::new(),
            email: String::new(),
            experience_years: 0,
            patient_count: 0,
            status: DoctorStatus::Available,
        }
    }
}

impl Entity for Doctor {
    type Status = DoctorStatus;

    const KIND: EntityKind = EntityKind::Doctor;
    const FACETS: &'static [&'static str] = &["status", "department", "specialization"];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status(&self) -> DoctorStatus {
        self.status
    }

    fn set_status(&mut self, status: DoctorStatus) {
        self.status = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.id.as_str(),
            self.specialization.as_str(),
            self.department.as_str(),
        ]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "department" => Some(Cow::Borrowed(self.department.as_str())),
            "specialization" => Some(Cow::Borrowed(self.specialization.as_str())),
            _ => None,
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("name", self.name.as_str()),
            ("specialization", self.specialization.as_str()),
            ("department", self.department.as_str()),
            ("email", self.email.as_str()),
        ])
    }
}

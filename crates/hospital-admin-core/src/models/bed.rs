//! Bed management models.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{blank_fields, Entity, EntityKind, StatusValue};

/// Bed occupancy status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BedStatus {
    Available,
    Occupied,
    Maintenance,
    Reserved,
}

impl StatusValue for BedStatus {
    const ALL: &'static [Self] = &[
        BedStatus::Available,
        BedStatus::Occupied,
        BedStatus::Maintenance,
        BedStatus::Reserved,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            BedStatus::Available => "available",
            BedStatus::Occupied => "occupied",
            BedStatus::Maintenance => "maintenance",
            BedStatus::Reserved => "reserved",
        }
    }
}

/// A hospital bed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bed {
    pub id: String,
    pub ward: String,
    pub room: String,
    /// general, icu, private, semi-private
    #[serde(rename = "type")]
    pub bed_type: String,
    pub status: BedStatus,
    pub patient_name: Option<String>,
    pub admitted_on: Option<NaiveDate>,
}

impl Bed {
    pub fn new(ward: String, room: String, bed_type: String) -> Self {
        Self {
            id: String::new(),
            ward,
            room,
            bed_type,
            status: BedStatus::Available,
            patient_name: None,
            admitted_on: None,
        }
    }

    /// Assign a patient and mark the bed occupied.
    pub fn occupy(&mut self, patient_name: String, on: NaiveDate) {
        self.patient_name = Some(patient_name);
        self.admitted_on = Some(on);
        self.status = BedStatus::Occupied;
    }

    /// Clear the occupant and mark the bed available.
    pub fn release(&mut self) {
        self.patient_name = None;
        self.admitted_on = None;
        self.status = BedStatus::Available;
    }
}

impl Entity for Bed {
    type Status = BedStatus;

    const KIND: EntityKind = EntityKind::Bed;
    const FACETS: &'static [&'static str] = &["status", "ward", "type"];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status(&self) -> BedStatus {
        self.status
    }

    fn set_status(&mut self, status: BedStatus) {
        self.status = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str(), self.ward.as_str(), self.room.as_str()];
        if let Some(patient) = &self.patient_name {
            fields.push(patient.as_str());
        }
        fields
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "ward" => Some(Cow::Borrowed(self.ward.as_str())),
            "type" => Some(Cow::Borrowed(self.bed_type.as_str())),
            _ => None,
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("ward", self.ward.as_str()),
            ("room", self.room.as_str()),
            ("type", self.bed_type.as_str()),
        ])
    }
}

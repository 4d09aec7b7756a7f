//! Appointment models.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{blank_fields, Entity, EntityKind, StatusValue};
use crate::time::{self, ClockTime, TimeResult};

/// Appointment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl StatusValue for AppointmentStatus {
    const ALL: &'static [Self] = &[
        AppointmentStatus::Scheduled,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::InProgress => "in-progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

/// A booked appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    /// Free-text patient reference; not checked against the patient list
    pub patient_id: Option<String>,
    pub doctor_name: String,
    pub department: String,
    pub date: NaiveDate,
    /// 12-hour display string, e.g. "09:30 AM"
    pub time: String,
    /// Visit type (consultation, follow-up, emergency, check-up)
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

impl Appointment {
    /// Create a scheduled appointment from form values.
    ///
    /// `time_24h` is the native `HH:MM` input value; it is stored in 12-hour
    /// display form.
    pub fn new(
        patient_name: String,
        doctor_name: String,
        department: String,
        date: NaiveDate,
        time_24h: &str,
    ) -> TimeResult<Self> {
        Ok(Self {
            id: String::new(),
            patient_name,
            patient_id: None,
            doctor_name,
            department,
            date,
            time: time::to_12h(time_24h)?,
            appointment_type: "consultation".into(),
            status: AppointmentStatus::Scheduled,
            notes: None,
        })
    }
}

impl Entity for Appointment {
    type Status = AppointmentStatus;

    const KIND: EntityKind = EntityKind::Appointment;
    const FACETS: &'static [&'static str] = &["status", "type", "department", "date", "doctor"];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status(&self) -> AppointmentStatus {
        self.status
    }

    fn set_status(&mut self, status: AppointmentStatus) {
        self.status = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.patient_name.as_str(),
            self.id.as_str(),
            self.doctor_name.as_str(),
            self.department.as_str(),
        ];
        if let Some(patient_id) = &self.patient_id {
            fields.push(patient_id);
        }
        fields
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "type" => Some(Cow::Borrowed(self.appointment_type.as_str())),
            "department" => Some(Cow::Borrowed(self.department.as_str())),
            "date" => Some(Cow::Owned(self.date.format("%Y-%m-%d").to_string())),
            "doctor" => Some(Cow::Borrowed(self.doctor_name.as_str())),
            _ => None,
        }
    }

    /// Accepts `hh:MM AM|PM` or native `HH:MM`; stores the 12-hour form.
    fn normalize(&mut self) -> TimeResult<()> {
        self.time = match ClockTime::parse_12h(&self.time) {
            Ok(parsed) => parsed.to_12h(),
            Err(_) => time::to_12h(&self.time)?,
        };
        Ok(())
    }

    fn missing_required(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("patient_name", self.patient_name.as_str()),
            ("doctor_name", self.doctor_name.as_str()),
            ("department", self.department.as_str()),
            ("time", self.time.as_str()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_appointment_converts_time() {
        let appt = Appointment::new(
            "John Smith".into(),
            "Dr. Sarah Johnson".into(),
            "Cardiology".into(),
            date("2024-01-15"),
            "13:15",
        )
        .unwrap();

        assert_eq!(appt.time, "01:15 PM");
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert!(appt.id.is_empty());
    }

    #[test]
    fn test_new_appointment_rejects_bad_time() {
        let result = Appointment::new(
            "John Smith".into(),
            "Dr. Sarah Johnson".into(),
            "Cardiology".into(),
            date("2024-01-15"),
            "25:00",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_shape() {
        let mut appt = Appointment::new(
            "John Smith".into(),
            "Dr. Sarah Johnson".into(),
            "Cardiology".into(),
            date("2024-01-15"),
            "09:30",
        )
        .unwrap();
        appt.status = AppointmentStatus::InProgress;

        let json = serde_json::to_value(&appt).unwrap();
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["type"], "consultation");
        assert_eq!(json["date"], "2024-01-15");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            AppointmentStatus::parse(" In-Progress "),
            Some(AppointmentStatus::InProgress)
        );
        assert_eq!(AppointmentStatus::parse("pending"), None);
    }
}

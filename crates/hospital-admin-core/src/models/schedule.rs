//! Staff schedule models.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{blank_fields, Entity, EntityKind, StatusValue};
use crate::time::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl StatusValue for ShiftStatus {
    const ALL: &'static [Self] = &[
        ShiftStatus::Scheduled,
        ShiftStatus::Completed,
        ShiftStatus::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Scheduled => "scheduled",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Cancelled => "cancelled",
        }
    }
}

/// One block on a doctor's schedule.
///
/// Start and end times serialize as zero-padded `HH:MM`; the day view sorts
/// on the `start_time` facet lexicographically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleEntry {
    pub id: String,
    pub doctor_name: String,
    pub department: String,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    /// morning, afternoon, night, on-call
    pub shift: String,
    pub room: String,
    pub status: ShiftStatus,
}

impl ScheduleEntry {
    pub fn new(
        doctor_name: String,
        department: String,
        date: NaiveDate,
        start_time: ClockTime,
        end_time: ClockTime,
    ) -> Self {
        Self {
            id: String::new(),
            doctor_name,
            department,
            date,
            start_time,
            end_time,
            shift: shift_for(start_time).into(),
            room: String::new(),
            status: ShiftStatus::Scheduled,
        }
    }
}

/// Shift label implied by a start time.
pub fn shift_for(start: ClockTime) -> &'static str {
    match start.hour() {
        6..=11 => "morning",
        12..=17 => "afternoon",
        _ => "night",
    }
}

impl Entity for ScheduleEntry {
    type Status = ShiftStatus;

    const KIND: EntityKind = EntityKind::Schedule;
    const FACETS: &'static [&'static str] =
        &["status", "department", "shift", "date", "start_time", "doctor"];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status(&self) -> ShiftStatus {
        self.status
    }

    fn set_status(&mut self, status: ShiftStatus) {
        self.status = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.doctor_name.as_str(),
            self.id.as_str(),
            self.department.as_str(),
            self.room.as_str(),
        ]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "department" => Some(Cow::Borrowed(self.department.as_str())),
            "shift" => Some(Cow::Borrowed(self.shift.as_str())),
            "date" => Some(Cow::Owned(self.date.format("%Y-%m-%d").to_string())),
            "start_time" => Some(Cow::Owned(self.start_time.to_24h())),
            "doctor" => Some(Cow::Borrowed(self.doctor_name.as_str())),
            _ => None,
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("doctor_name", self.doctor_name.as_str()),
            ("department", self.department.as_str()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: &str, end: &str) -> ScheduleEntry {
        ScheduleEntry::new(
            "Dr. Sarah Johnson".into(),
            "Cardiology".into(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            start.parse().unwrap(),
            end.parse().unwrap(),
        )
    }

    #[test]
    fn test_shift_label() {
        assert_eq!(entry("08:00", "12:00").shift, "morning");
        assert_eq!(entry("13:00", "17:00").shift, "afternoon");
        assert_eq!(entry("22:00", "23:30").shift, "night");
    }

    #[test]
    fn test_start_time_facet_is_padded() {
        assert_eq!(entry("9:05", "10:00").facet("start_time").as_deref(), Some("09:05"));
    }
}

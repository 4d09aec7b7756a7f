//! Report models.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{blank_fields, Entity, EntityKind, StatusValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Draft,
    Generated,
    Archived,
}

impl StatusValue for ReportStatus {
    const ALL: &'static [Self] = &[
        ReportStatus::Draft,
        ReportStatus::Generated,
        ReportStatus::Archived,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Generated => "generated",
            ReportStatus::Archived => "archived",
        }
    }
}

/// An administrative report (financial, clinical, operational).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub category: String,
    pub author: String,
    pub date: NaiveDate,
    /// Output format label, e.g. "PDF"
    pub format: String,
    pub status: ReportStatus,
}

impl Report {
    pub fn new(title: String, category: String, author: String, date: NaiveDate) -> Self {
        Self {
            id: String::new(),
            title,
            category,
            author,
            date,
            format: "PDF".into(),
            status: ReportStatus::Draft,
        }
    }
}

impl Entity for Report {
    type Status = ReportStatus;

    const KIND: EntityKind = EntityKind::Report;
    const FACETS: &'static [&'static str] = &["status", "category", "format"];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status(&self) -> ReportStatus {
        self.status
    }

    fn set_status(&mut self, status: ReportStatus) {
        self.status = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.id.as_str(), self.author.as_str()]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "category" => Some(Cow::Borrowed(self.category.as_str())),
            "format" => Some(Cow::Borrowed(self.format.as_str())),
            _ => None,
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("title", self.title.as_str()),
            ("category", self.category.as_str()),
        ])
    }
}

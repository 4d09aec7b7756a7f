//! Billing models.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{blank_fields, Entity, EntityKind, StatusValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl StatusValue for InvoiceStatus {
    const ALL: &'static [Self] = &[
        InvoiceStatus::Pending,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

/// A billed service or item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price_cents: u64,
}

impl InvoiceItem {
    /// Line total, `None` if it does not fit in a `u64`.
    pub fn total_cents(&self) -> Option<u64> {
        self.unit_price_cents.checked_mul(u64::from(self.quantity))
    }
}

/// A patient invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub patient_name: String,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    pub status: InvoiceStatus,
}

impl Invoice {
    pub fn new(patient_name: String, issued_on: NaiveDate, due_on: NaiveDate) -> Self {
        Self {
            id: String::new(),
            patient_name,
            issued_on,
            due_on,
            items: Vec::new(),
            status: InvoiceStatus::Pending,
        }
    }

    /// Sum of all line items, `None` on overflow.
    pub fn total_cents(&self) -> Option<u64> {
        self.items
            .iter()
            .try_fold(0u64, |sum, item| sum.checked_add(item.total_cents()?))
    }
}

impl Entity for Invoice {
    type Status = InvoiceStatus;

    const KIND: EntityKind = EntityKind::Invoice;
    const FACETS: &'static [&'static str] = &["status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status(&self) -> InvoiceStatus {
        self.status
    }

    fn set_status(&mut self, status: InvoiceStatus) {
        self.status = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.patient_name.as_str(), self.id.as_str()]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        blank_fields(&[("patient_name", self.patient_name.as_str())])
    }
}

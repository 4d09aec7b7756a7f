//! Pharmacy inventory models.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{blank_fields, Entity, EntityKind, StatusValue};

/// Stock level below which an item counts as low.
pub const LOW_STOCK_THRESHOLD: u32 = 50;

/// Stock status of a medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StatusValue for StockStatus {
    const ALL: &'static [Self] = &[
        StockStatus::InStock,
        StockStatus::LowStock,
        StockStatus::OutOfStock,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

impl StockStatus {
    /// Status implied by a stock count.
    pub fn for_stock(stock: u32) -> Self {
        match stock {
            0 => StockStatus::OutOfStock,
            n if n < LOW_STOCK_THRESHOLD => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }
}

/// A medication held by the pharmacy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub id: String,
    pub name: String,
    /// Therapeutic category (antibiotic, analgesic, ...)
    pub category: String,
    /// Strength per unit, e.g. "500mg"
    pub dosage: String,
    pub stock: u32,
    /// Unit price in cents
    pub unit_price_cents: u64,
    pub manufacturer: String,
    pub expiry_date: NaiveDate,
    pub status: StockStatus,
}

impl Medication {
    /// Create a medication whose status follows its stock count.
    pub fn new(name: String, category: String, dosage: String, stock: u32, expiry_date: NaiveDate) -> Self {
        Self {
            id: String::new(),
            name,
            category,
            dosage,
            stock,
            unit_price_cents: 0,
            manufacturer: String::new(),
            expiry_date,
            status: StockStatus::for_stock(stock),
        }
    }
}

impl Entity for Medication {
    type Status = StockStatus;

    const KIND: EntityKind = EntityKind::Medication;
    const FACETS: &'static [&'static str] = &["status", "category"];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status(&self) -> StockStatus {
        self.status
    }

    fn set_status(&mut self, status: StockStatus) {
        self.status = status;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.id.as_str(),
            self.category.as_str(),
            self.manufacturer.as_str(),
        ]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "category" => Some(Cow::Borrowed(self.category.as_str())),
            _ => None,
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("name", self.name.as_str()),
            ("category", self.category.as_str()),
            ("dosage", self.dosage.as_str()),
        ])
    }
}

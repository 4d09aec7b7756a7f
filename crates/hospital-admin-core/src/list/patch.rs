//! Partial record updates.
//!
//! A patch is a flat JSON object of field name to new value. Applying it is a
//! shallow merge over the record's serialized form: listed fields are
//! replaced, everything else is kept. The identifier is never overwritten.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ListError, ListResult};
use crate::models::Entity;

const ID_FIELD: &str = "id";

/// Field values to merge into an existing record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a patch from a JSON object string.
    pub fn from_json(json: &str) -> ListResult<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ListError::InvalidPatch(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    /// Builder-style field assignment.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Produce the merge of `record` and this patch.
    pub fn apply<T: Entity>(&self, record: &T) -> ListResult<T> {
        let mut merged = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            _ => {
                return Err(ListError::InvalidPatch(
                    "record does not serialize to an object".into(),
                ))
            }
        };

        for (field, value) in &self.0 {
            if field == ID_FIELD {
                continue;
            }
            if !merged.contains_key(field) {
                return Err(ListError::InvalidPatch(format!(
                    "unknown field '{}' for {}",
                    field,
                    T::KIND
                )));
            }
            merged.insert(field.clone(), value.clone());
        }

        serde_json::from_value(Value::Object(merged))
            .map_err(|e| ListError::InvalidPatch(e.to_string()))
    }
}

impl From<Map<String, Value>> for Patch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Medication, StockStatus};
    use chrono::NaiveDate;

    fn medication() -> Medication {
        let mut med = Medication::new(
            "Amoxicillin".into(),
            "Antibiotic".into(),
            "500mg".into(),
            120,
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        );
        med.id = "MED001".into();
        med
    }

    #[test]
    fn test_merge_keeps_other_fields() {
        let patch = Patch::new().set("stock", 10).set("status", "low-stock");
        let merged = patch.apply(&medication()).unwrap();

        assert_eq!(merged.stock, 10);
        assert_eq!(merged.status, StockStatus::LowStock);
        assert_eq!(merged.name, "Amoxicillin");
        assert_eq!(merged.dosage, "500mg");
    }

    #[test]
    fn test_id_is_never_overwritten() {
        let patch = Patch::new().set("id", "MED999").set("dosage", "250mg");
        let merged = patch.apply(&medication()).unwrap();
        assert_eq!(merged.id, "MED001");
        assert_eq!(merged.dosage, "250mg");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let patch = Patch::new().set("colour", "blue");
        assert!(matches!(
            patch.apply(&medication()),
            Err(ListError::InvalidPatch(_))
        ));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let patch = Patch::new().set("stock", "lots");
        assert!(matches!(
            patch.apply(&medication()),
            Err(ListError::InvalidPatch(_))
        ));
    }

    #[test]
    fn test_from_json_requires_object() {
        assert!(Patch::from_json(r#"{"stock": 5}"#).is_ok());
        assert!(matches!(
            Patch::from_json("[1, 2]"),
            Err(ListError::InvalidPatch(_))
        ));
        assert!(matches!(Patch::from_json("{"), Err(ListError::Json(_))));
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let med = medication();
        assert_eq!(Patch::new().apply(&med).unwrap(), med);
    }
}

//! Search and categorical filter composition.
//!
//! A record is visible when it matches the search term AND every facet
//! filter. Search is a case-insensitive substring test ORed over the entity's
//! search fields; an empty term matches everything. A facet filter set to
//! [`ALL`] matches everything, otherwise it requires exact equality.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ListError, ListResult};
use crate::models::Entity;

/// Sentinel filter value that disables a facet filter.
pub const ALL: &str = "all";

/// Selection for one facet filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Interpret a raw filter value, mapping the `all` sentinel.
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::parse(value)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(value) => f.write_str(value),
        }
    }
}

/// Substring match of an already lowercased `needle` against any of `fields`.
fn fields_contain(fields: &[&str], needle: &str) -> bool {
    needle.is_empty()
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Current search text and facet filters of a list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    search: String,
    filters: BTreeMap<String, Selection>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_filter(mut self, facet: &str, selection: impl Into<Selection>) -> Self {
        self.filters.insert(facet.to_string(), selection.into());
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn filters(&self) -> &BTreeMap<String, Selection> {
        &self.filters
    }

    /// Selection for a facet; unset facets read as [`Selection::All`].
    pub fn filter(&self, facet: &str) -> Selection {
        self.filters.get(facet).cloned().unwrap_or_default()
    }

    pub fn set_filter(&mut self, facet: &str, selection: impl Into<Selection>) {
        self.filters.insert(facet.to_string(), selection.into());
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// True when nothing narrows the list.
    pub fn is_unrestricted(&self) -> bool {
        self.search.is_empty() && self.filters.values().all(|s| *s == Selection::All)
    }

    /// Check every filtered facet exists on `T`.
    pub fn validate<T: Entity>(&self) -> ListResult<()> {
        match self.filters.keys().find(|facet| !T::FACETS.contains(&facet.as_str())) {
            Some(facet) => Err(ListError::UnknownFacet {
                kind: T::KIND,
                facet: facet.clone(),
            }),
            None => Ok(()),
        }
    }

    /// The combined predicate. The search term is lowercased once up front.
    pub fn predicate<T: Entity>(&self) -> impl Fn(&T) -> bool + '_ {
        let needle = self.search.to_lowercase();
        move |record: &T| {
            fields_contain(&record.search_fields(), &needle)
                && self
                    .filters
                    .iter()
                    .all(|(facet, selection)| selection.matches(record.facet(facet).as_deref()))
        }
    }

    pub fn matches<T: Entity>(&self, record: &T) -> bool {
        self.predicate::<T>()(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, AppointmentStatus};
    use chrono::NaiveDate;

    fn appointment(patient: &str, doctor: &str, department: &str) -> Appointment {
        Appointment::new(
            patient.into(),
            doctor.into(),
            department.into(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "09:00",
        )
        .unwrap()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let a = appointment("John Smith", "Dr. Chen", "Cardiology");
        assert!(Query::new().with_search("SMITH").matches(&a));
        assert!(Query::new().with_search("cHeN").matches(&a));
        assert!(!Query::new().with_search("jones").matches(&a));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let a = appointment("John Smith", "Dr. Chen", "Cardiology");
        assert!(Query::new().matches(&a));
        assert!(fields_contain(&[], ""));
        assert!(!fields_contain(&[], "smith"));
    }

    #[test]
    fn test_filters_and_search_compose_with_and() {
        let mut a = appointment("John Smith", "Dr. Chen", "Cardiology");
        a.status = AppointmentStatus::Completed;

        let q = Query::new()
            .with_search("smith")
            .with_filter("status", "completed")
            .with_filter("department", "Cardiology");
        assert!(q.matches(&a));

        let q = q.with_filter("department", "Neurology");
        assert!(!q.matches(&a));
    }

    #[test]
    fn test_all_sentinel() {
        let a = appointment("John Smith", "Dr. Chen", "Cardiology");
        let q = Query::new().with_filter("status", ALL).with_filter("type", "all");
        assert!(q.matches(&a));
        assert!(q.is_unrestricted());
        assert_eq!(q.filter("department"), Selection::All);
    }

    #[test]
    fn test_filter_is_exact_equality() {
        let a = appointment("John Smith", "Dr. Chen", "Cardiology");
        assert!(!Query::new().with_filter("department", "cardiology").matches(&a));
        assert!(!Query::new().with_filter("department", "Cardio").matches(&a));
    }

    #[test]
    fn test_validate_unknown_facet() {
        let q = Query::new().with_filter("ward", "A");
        assert!(matches!(
            q.validate::<Appointment>(),
            Err(ListError::UnknownFacet { .. })
        ));
        assert!(Query::new().with_filter("type", "all").validate::<Appointment>().is_ok());
    }
}

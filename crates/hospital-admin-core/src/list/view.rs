//! The visible subsequence of a page's records.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ListError, ListResult, Query};
use crate::models::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort the view on a facet's string value.
///
/// Comparison is lexicographic, so facets must be fixed-width where order
/// matters (dates as `yyyy-mm-dd`, times as `HH:MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub facet: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn ascending(facet: &str) -> Self {
        Self {
            facet: facet.to_string(),
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(facet: &str) -> Self {
        Self {
            facet: facet.to_string(),
            order: SortOrder::Descending,
        }
    }

    pub fn validate<T: Entity>(&self) -> ListResult<()> {
        if T::FACETS.contains(&self.facet.as_str()) {
            Ok(())
        } else {
            Err(ListError::UnknownFacet {
                kind: T::KIND,
                facet: self.facet.clone(),
            })
        }
    }

    fn compare<T: Entity>(&self, a: &T, b: &T) -> Ordering {
        let ordering = a.facet(&self.facet).cmp(&b.facet(&self.facet));
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Records matching a query, in source order unless a sort is given.
///
/// Recomputed from scratch on every call; nothing is cached.
#[derive(Debug)]
pub struct DerivedView<T> {
    records: Vec<Arc<T>>,
    total: usize,
}

impl<T> Clone for DerivedView<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            total: self.total,
        }
    }
}

impl<T: Entity> DerivedView<T> {
    pub fn compute(source: &[Arc<T>], query: &Query, sort: Option<&SortSpec>) -> Self {
        let predicate = query.predicate::<T>();
        let mut records: Vec<Arc<T>> = source
            .iter()
            .filter(|r| predicate(r.as_ref()))
            .cloned()
            .collect();

        if let Some(sort) = sort {
            // stable: equal keys keep source order
            records.sort_by(|a, b| sort.compare(a.as_ref(), b.as_ref()));
        }

        Self {
            records,
            total: source.len(),
        }
    }

    pub fn records(&self) -> &[Arc<T>] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Arc<T>> {
        self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.records.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Nothing matched. Pages show their "No records found" state.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Size of the unfiltered source.
    pub fn total(&self) -> usize {
        self.total
    }
}

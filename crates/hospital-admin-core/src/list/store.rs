//! In-memory record sequence with whole-list replacement.
//!
//! Every mutation returns a new store; the receiver is left untouched.
//! Elements that a mutation does not touch are shared (same `Arc`) between
//! the old and new sequence.

use std::sync::Arc;

use super::{ListResult, Patch};
use crate::models::Entity;

/// Ordered sequence of records owned by one page.
#[derive(Debug)]
pub struct RecordStore<T> {
    records: Vec<Arc<T>>,
}

impl<T> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Entity> RecordStore<T> {
    pub fn new(records: impl IntoIterator<Item = T>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_shared(records: Vec<Arc<T>>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Arc<T>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id())
    }

    /// First record with the given identifier.
    pub fn get(&self, id: &str) -> Option<&Arc<T>> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Append a record. Identifier uniqueness is the caller's concern.
    pub fn add(&self, record: T) -> Self {
        let mut records = Vec::with_capacity(self.records.len() + 1);
        records.extend(self.records.iter().cloned());
        records.push(Arc::new(record));
        Self { records }
    }

    /// Replace every record with identifier `id` by `f(old)`.
    ///
    /// No match leaves the sequence as it was.
    pub fn replace_by_id(&self, id: &str, f: impl Fn(&T) -> T) -> Self {
        let records = self
            .records
            .iter()
            .map(|r| {
                if r.id() == id {
                    Arc::new(f(r.as_ref()))
                } else {
                    Arc::clone(r)
                }
            })
            .collect();
        Self { records }
    }

    /// Merge `patch` into the record with identifier `id`.
    ///
    /// No match leaves the sequence as it was.
    pub fn update_by_id(&self, id: &str, patch: &Patch) -> ListResult<Self> {
        let records = self
            .records
            .iter()
            .map(|r| {
                if r.id() == id {
                    patch.apply(r.as_ref()).map(Arc::new)
                } else {
                    Ok(Arc::clone(r))
                }
            })
            .collect::<ListResult<Vec<_>>>()?;
        Ok(Self { records })
    }

    /// Drop the record with identifier `id`; no-op if absent.
    pub fn remove_by_id(&self, id: &str) -> Self {
        let records = self
            .records
            .iter()
            .filter(|r| r.id() != id)
            .cloned()
            .collect();
        Self { records }
    }

    /// Set the status of the record with identifier `id`. Any value is
    /// accepted regardless of the current status.
    pub fn set_status(&self, id: &str, status: T::Status) -> Self {
        self.replace_by_id(id, |r| {
            let mut next = r.clone();
            next.set_status(status);
            next
        })
    }
}

//! Session-local repository over a [`RecordStore`].

use std::sync::Arc;

use super::Repository;
use crate::ids::{IdAllocator, IdScheme};
use crate::list::{ListResult, RecordStore};
use crate::models::Entity;

/// Records held in process memory, gone when the session ends.
#[derive(Debug, Clone)]
pub struct MemoryRepository<T> {
    store: RecordStore<T>,
    ids: IdAllocator,
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new(scheme: IdScheme) -> Self {
        Self::seeded(scheme, Vec::new())
    }

    /// Start from mock records; new identifiers continue after theirs.
    pub fn seeded(scheme: IdScheme, records: Vec<T>) -> Self {
        let store = RecordStore::new(records);
        let ids = IdAllocator::seeded(scheme, T::KIND.id_prefix(), store.ids());
        Self { store, ids }
    }

    pub fn store(&self) -> &RecordStore<T> {
        &self.store
    }
}

impl<T: Entity> Repository<T> for MemoryRepository<T> {
    fn list(&self) -> ListResult<Vec<Arc<T>>> {
        Ok(self.store.records().to_vec())
    }

    fn get(&self, id: &str) -> ListResult<Option<Arc<T>>> {
        Ok(self.store.get(id).cloned())
    }

    fn create(&mut self, record: T) -> ListResult<()> {
        self.store = self.store.add(record);
        Ok(())
    }

    fn update(&mut self, record: T) -> ListResult<bool> {
        if !self.store.contains(record.id()) {
            return Ok(false);
        }
        let id = record.id().to_string();
        self.store = self.store.replace_by_id(&id, |_| record.clone());
        Ok(true)
    }

    fn delete(&mut self, id: &str) -> ListResult<bool> {
        if !self.store.contains(id) {
            return Ok(false);
        }
        self.store = self.store.remove_by_id(id);
        Ok(true)
    }

    fn next_id(&mut self) -> ListResult<String> {
        Ok(self.ids.next_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bed, BedStatus};

    fn bed(id: &str, ward: &str) -> Bed {
        let mut b = Bed::new(ward.into(), "101".into(), "general".into());
        b.id = id.into();
        b
    }

    #[test]
    fn test_ids_continue_after_seed() {
        let mut repo = MemoryRepository::seeded(IdScheme::Sequential, vec![bed("B001", "A"), bed("B002", "B")]);
        assert_eq!(repo.next_id().unwrap(), "B003");
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut repo = MemoryRepository::<Bed>::new(IdScheme::Sequential);
        let first = repo.next_id().unwrap();
        repo.create(bed(&first, "A")).unwrap();
        assert!(repo.delete(&first).unwrap());

        let second = repo.next_id().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_update_and_delete_report_missing() {
        let mut repo = MemoryRepository::seeded(IdScheme::Sequential, vec![bed("B001", "A")]);

        let mut changed = bed("B001", "A");
        changed.status = BedStatus::Maintenance;
        assert!(repo.update(changed).unwrap());
        assert_eq!(repo.get("B001").unwrap().unwrap().status, BedStatus::Maintenance);

        assert!(!repo.update(bed("B404", "A")).unwrap());
        assert!(!repo.delete("B404").unwrap());
        assert_eq!(repo.list().unwrap().len(), 1);
    }
}

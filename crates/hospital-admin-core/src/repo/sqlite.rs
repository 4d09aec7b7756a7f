//! SQLite-backed repository.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use super::Repository;
use crate::db::Database;
use crate::ids::{format_sequential, sequence_number, IdScheme};
use crate::list::ListResult;
use crate::models::Entity;

/// Records of one kind stored as JSON rows in a shared [`Database`].
pub struct SqliteRepository<T> {
    db: Arc<Mutex<Database>>,
    scheme: IdScheme,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> SqliteRepository<T> {
    pub fn new(db: Arc<Mutex<Database>>, scheme: IdScheme) -> Self {
        Self {
            db,
            scheme,
            _entity: PhantomData,
        }
    }

    /// Write `records` if this kind has no rows yet. Returns how many were
    /// written. The id counter is moved past the seeded identifiers.
    pub fn seed_if_empty(&self, records: &[T]) -> ListResult<usize> {
        let kind = T::KIND.as_str();
        let mut db = self.db.lock()?;
        if db.count_records(kind)? > 0 {
            return Ok(0);
        }

        let rows = records
            .iter()
            .map(|r| -> ListResult<(String, String)> {
                Ok((r.id().to_string(), serde_json::to_string(r)?))
            })
            .collect::<ListResult<Vec<_>>>()?;
        let written = db.insert_records(kind, &rows)?;

        let highest = records
            .iter()
            .filter_map(|r| sequence_number(T::KIND.id_prefix(), r.id()))
            .max()
            .unwrap_or(0);
        db.ensure_sequence_at_least(kind, highest + 1)?;

        tracing::debug!(kind, written, "seeded records");
        Ok(written)
    }

    fn decode(body: &str) -> ListResult<Arc<T>> {
        Ok(Arc::new(serde_json::from_str(body)?))
    }
}

impl<T: Entity> Repository<T> for SqliteRepository<T> {
    fn list(&self) -> ListResult<Vec<Arc<T>>> {
        let db = self.db.lock()?;
        db.list_records(T::KIND.as_str())?
            .iter()
            .map(|body| Self::decode(body))
            .collect()
    }

    fn get(&self, id: &str) -> ListResult<Option<Arc<T>>> {
        let db = self.db.lock()?;
        db.get_record(T::KIND.as_str(), id)?
            .map(|body| Self::decode(&body))
            .transpose()
    }

    fn create(&mut self, record: T) -> ListResult<()> {
        let body = serde_json::to_string(&record)?;
        let db = self.db.lock()?;
        db.insert_record(T::KIND.as_str(), record.id(), &body)?;
        Ok(())
    }

    fn update(&mut self, record: T) -> ListResult<bool> {
        let body = serde_json::to_string(&record)?;
        let db = self.db.lock()?;
        Ok(db.update_record(T::KIND.as_str(), record.id(), &body)?)
    }

    fn delete(&mut self, id: &str) -> ListResult<bool> {
        let db = self.db.lock()?;
        Ok(db.delete_record(T::KIND.as_str(), id)?)
    }

    fn next_id(&mut self) -> ListResult<String> {
        match self.scheme {
            IdScheme::Sequential => {
                let db = self.db.lock()?;
                let n = db.next_sequence(T::KIND.as_str())?;
                Ok(format_sequential(T::KIND.id_prefix(), n))
            }
            IdScheme::Uuid => Ok(uuid::Uuid::new_v4().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Report, ReportStatus};
    use chrono::NaiveDate;

    fn shared_db() -> Arc<Mutex<Database>> {
        Arc::new(Mutex::new(Database::open_in_memory().unwrap()))
    }

    fn report(id: &str, title: &str) -> Report {
        let mut r = Report::new(
            title.into(),
            "Financial".into(),
            "Admin".into(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        r.id = id.into();
        r
    }

    #[test]
    fn test_round_trip_through_rows() {
        let mut repo = SqliteRepository::<Report>::new(shared_db(), IdScheme::Sequential);

        let id = repo.next_id().unwrap();
        assert_eq!(id, "R001");
        repo.create(report(&id, "Monthly revenue")).unwrap();

        let stored = repo.get(&id).unwrap().unwrap();
        assert_eq!(stored.title, "Monthly revenue");
        assert_eq!(stored.status, ReportStatus::Draft);
    }

    #[test]
    fn test_seed_moves_counter() {
        let mut repo = SqliteRepository::<Report>::new(shared_db(), IdScheme::Sequential);

        let written = repo
            .seed_if_empty(&[report("R001", "A"), report("R005", "B")])
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(repo.next_id().unwrap(), "R006");

        // Second seed is skipped
        assert_eq!(repo.seed_if_empty(&[report("R010", "C")]).unwrap(), 0);
        assert_eq!(repo.list().unwrap().len(), 2);
    }

    #[test]
    fn test_update_and_delete() {
        let mut repo = SqliteRepository::<Report>::new(shared_db(), IdScheme::Sequential);
        repo.create(report("R001", "A")).unwrap();

        let mut changed = report("R001", "A (final)");
        changed.status = ReportStatus::Generated;
        assert!(repo.update(changed).unwrap());
        assert_eq!(repo.get("R001").unwrap().unwrap().title, "A (final)");

        assert!(repo.delete("R001").unwrap());
        assert!(!repo.delete("R001").unwrap());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_kinds_share_a_database() {
        let db = shared_db();
        let mut reports = SqliteRepository::<Report>::new(Arc::clone(&db), IdScheme::Sequential);
        let beds = SqliteRepository::<crate::models::Bed>::new(db, IdScheme::Sequential);

        reports.create(report("R001", "A")).unwrap();
        assert!(beds.list().unwrap().is_empty());
    }
}

//! An admin session: one list page per record kind.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::config::{CoreConfig, Storage};
use crate::db::Database;
use crate::list::{DynPage, ListPage, ListResult, PageHandle};
use crate::models::*;
use crate::repo::{MemoryRepository, Repository, SqliteRepository};
use crate::seed::mock_records;

/// Every list page of the admin UI, sharing one storage backend.
pub struct AdminSession {
    pages: BTreeMap<EntityKind, Box<dyn DynPage>>,
    db: Option<Arc<Mutex<Database>>>,
}

impl AdminSession {
    /// Build all pages from `config`.
    ///
    /// With SQLite storage, mock records are only written into kinds that
    /// have no rows yet.
    pub fn open(config: &CoreConfig) -> ListResult<Self> {
        let db = match config.storage() {
            Storage::Memory => None,
            Storage::Sqlite(path) => {
                tracing::info!(path = %path.display(), "opening record database");
                Some(Arc::new(Mutex::new(Database::open(path)?)))
            }
        };

        let mut pages: BTreeMap<EntityKind, Box<dyn DynPage>> = BTreeMap::new();
        for kind in EntityKind::ALL {
            let page = match kind {
                EntityKind::Appointment => build_page::<Appointment>(config, db.as_ref())?,
                EntityKind::Patient => build_page::<Patient>(config, db.as_ref())?,
                EntityKind::Doctor => build_page::<Doctor>(config, db.as_ref())?,
                EntityKind::Medication => build_page::<Medication>(config, db.as_ref())?,
                EntityKind::Bed => build_page::<Bed>(config, db.as_ref())?,
                EntityKind::MedicalRecord => build_page::<MedicalRecord>(config, db.as_ref())?,
                EntityKind::Report => build_page::<Report>(config, db.as_ref())?,
                EntityKind::Schedule => build_page::<ScheduleEntry>(config, db.as_ref())?,
                EntityKind::Invoice => build_page::<Invoice>(config, db.as_ref())?,
            };
            pages.insert(*kind, page);
        }

        let storage = if db.is_some() { "sqlite" } else { "memory" };
        tracing::info!(
            storage,
            id_scheme = %config.id_scheme(),
            seeded = config.seed_mock_data(),
            "admin session opened"
        );
        Ok(Self { pages, db })
    }

    /// Session-local records starting from the mock data.
    pub fn in_memory() -> ListResult<Self> {
        Self::open(&CoreConfig::default())
    }

    pub fn is_persistent(&self) -> bool {
        self.db.is_some()
    }

    pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.pages.keys().copied()
    }

    pub fn page(&self, kind: EntityKind) -> Option<&(dyn DynPage + 'static)> {
        self.pages.get(&kind).map(|page| &**page)
    }

    pub fn page_mut(&mut self, kind: EntityKind) -> Option<&mut (dyn DynPage + 'static)> {
        self.pages.get_mut(&kind).map(|page| &mut **page)
    }
}

fn build_page<T: Entity>(
    config: &CoreConfig,
    db: Option<&Arc<Mutex<Database>>>,
) -> ListResult<Box<dyn DynPage>> {
    let seed = if config.seed_mock_data() {
        mock_records::<T>()?
    } else {
        Vec::new()
    };

    let repo: Box<dyn Repository<T>> = match db {
        Some(db) => {
            let repo = SqliteRepository::<T>::new(Arc::clone(db), config.id_scheme());
            repo.seed_if_empty(&seed)?;
            Box::new(repo)
        }
        None => Box::new(MemoryRepository::seeded(config.id_scheme(), seed)),
    };

    Ok(Box::new(PageHandle::new(ListPage::new(repo))))
}

/// Write mock records into every empty kind of the database at `config`'s
/// path. Returns the number of records written per kind.
pub fn seed_database(config: &CoreConfig) -> ListResult<BTreeMap<EntityKind, usize>> {
    let Storage::Sqlite(path) = config.storage() else {
        return Ok(BTreeMap::new());
    };
    let db = Arc::new(Mutex::new(Database::open(path)?));
    let scheme = config.id_scheme();

    let mut written = BTreeMap::new();
    for kind in EntityKind::ALL {
        let count = match kind {
            EntityKind::Appointment => seed_kind::<Appointment>(&db, scheme)?,
            EntityKind::Patient => seed_kind::<Patient>(&db, scheme)?,
            EntityKind::Doctor => seed_kind::<Doctor>(&db, scheme)?,
            EntityKind::Medication => seed_kind::<Medication>(&db, scheme)?,
            EntityKind::Bed => seed_kind::<Bed>(&db, scheme)?,
            EntityKind::MedicalRecord => seed_kind::<MedicalRecord>(&db, scheme)?,
            EntityKind::Report => seed_kind::<Report>(&db, scheme)?,
            EntityKind::Schedule => seed_kind::<ScheduleEntry>(&db, scheme)?,
            EntityKind::Invoice => seed_kind::<Invoice>(&db, scheme)?,
        };
        written.insert(*kind, count);
    }
    Ok(written)
}

fn seed_kind<T: Entity>(
    db: &Arc<Mutex<Database>>,
    scheme: crate::ids::IdScheme,
) -> ListResult<usize> {
    SqliteRepository::<T>::new(Arc::clone(db), scheme).seed_if_empty(&mock_records::<T>()?)
}

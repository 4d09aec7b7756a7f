//! Storage behind a list page.
//!
//! Pages talk to a [`Repository`]; the in-memory variant wraps a
//! [`RecordStore`](crate::list::RecordStore) and the SQLite variant keeps the
//! same records as JSON rows. Query and view code never sees the difference.

mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

use std::sync::Arc;

use crate::list::ListResult;
use crate::models::Entity;

/// list / create / update / delete over one entity type.
pub trait Repository<T: Entity>: Send {
    /// All records in insertion order.
    fn list(&self) -> ListResult<Vec<Arc<T>>>;

    fn get(&self, id: &str) -> ListResult<Option<Arc<T>>>;

    /// Append a record whose identifier is already assigned.
    fn create(&mut self, record: T) -> ListResult<()>;

    /// Replace the record with the same identifier. `false` if none exists.
    fn update(&mut self, record: T) -> ListResult<bool>;

    /// Remove by identifier. `false` if none exists.
    fn delete(&mut self, id: &str) -> ListResult<bool>;

    /// Allocate a fresh identifier. Identifiers are never handed out twice.
    fn next_id(&mut self) -> ListResult<String>;
}

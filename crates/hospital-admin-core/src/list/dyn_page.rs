//! Kind-erased access to list pages.
//!
//! [`DynPage`] lets a session hold every page behind one trait object and
//! exchange records as JSON with the CLI and the FFI layer.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{
    DeleteRequest, ListError, ListPage, ListResult, Notification, Patch, Selection, SortSpec,
};
use crate::models::{Entity, EntityKind, StatusValue};

/// Object-safe JSON facade over a [`ListPage`].
pub trait DynPage: Send {
    fn kind(&self) -> EntityKind;

    fn facets(&self) -> &'static [&'static str];

    /// Status wire names in display order.
    fn statuses(&self) -> Vec<&'static str>;

    fn set_search(&mut self, term: &str);

    fn set_filter(&mut self, facet: &str, value: &str) -> ListResult<()>;

    fn clear_filters(&mut self);

    fn set_sort(&mut self, sort: Option<SortSpec>) -> ListResult<()>;

    /// Visible records, one JSON object each.
    fn visible(&self) -> ListResult<Vec<Value>>;

    /// Number of records before filtering.
    fn total(&self) -> ListResult<usize>;

    fn get_json(&self, id: &str) -> ListResult<Option<Value>>;

    /// Create from a JSON object. Any `id` given is replaced.
    fn create_json(&mut self, record: Value) -> ListResult<String>;

    fn open_editor_json(&mut self, id: &str) -> ListResult<Value>;

    fn update_json(&mut self, id: &str, patch: Patch) -> ListResult<Value>;

    fn set_status_str(&mut self, id: &str, status: &str) -> ListResult<()>;

    /// Returns the confirmation prompt.
    fn request_delete(&mut self, id: &str) -> ListResult<String>;

    fn confirm_delete(&mut self, id: &str) -> ListResult<()>;

    fn cancel_delete(&mut self, id: &str);

    fn drain_notifications(&mut self) -> Vec<Notification>;
}

/// A page plus the deletions it has asked the user to confirm.
pub struct PageHandle<T: Entity> {
    page: ListPage<T>,
    pending: BTreeMap<String, DeleteRequest<T>>,
}

impl<T: Entity> PageHandle<T> {
    pub fn new(page: ListPage<T>) -> Self {
        Self {
            page,
            pending: BTreeMap::new(),
        }
    }

    pub fn page(&self) -> &ListPage<T> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut ListPage<T> {
        &mut self.page
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }
}

impl<T: Entity> DynPage for PageHandle<T> {
    fn kind(&self) -> EntityKind {
        T::KIND
    }

    fn facets(&self) -> &'static [&'static str] {
        T::FACETS
    }

    fn statuses(&self) -> Vec<&'static str> {
        T::Status::ALL.iter().map(|s| s.as_str()).collect()
    }

    fn set_search(&mut self, term: &str) {
        self.page.set_search(term);
    }

    fn set_filter(&mut self, facet: &str, value: &str) -> ListResult<()> {
        self.page.set_filter(facet, Selection::parse(value))
    }

    fn clear_filters(&mut self) {
        self.page.clear_filters();
    }

    fn set_sort(&mut self, sort: Option<SortSpec>) -> ListResult<()> {
        self.page.set_sort(sort)
    }

    fn visible(&self) -> ListResult<Vec<Value>> {
        self.page
            .view()?
            .iter()
            .map(|r| serde_json::to_value(r.as_ref()).map_err(ListError::from))
            .collect()
    }

    fn total(&self) -> ListResult<usize> {
        Ok(self.page.records()?.len())
    }

    fn get_json(&self, id: &str) -> ListResult<Option<Value>> {
        self.page
            .get(id)?
            .map(|r| serde_json::to_value(r.as_ref()).map_err(ListError::from))
            .transpose()
    }

    fn create_json(&mut self, mut record: Value) -> ListResult<String> {
        let Value::Object(fields) = &mut record else {
            return Err(ListError::InvalidPatch(format!(
                "expected a JSON object for a new {}",
                T::KIND.label().to_lowercase()
            )));
        };
        fields.insert("id".to_string(), Value::String(String::new()));

        let record: T = serde_json::from_value(record)?;
        self.page.create(record)
    }

    fn open_editor_json(&mut self, id: &str) -> ListResult<Value> {
        let record = self.page.open_editor(id)?;
        Ok(serde_json::to_value(record)?)
    }

    fn update_json(&mut self, id: &str, patch: Patch) -> ListResult<Value> {
        let updated = self.page.update(id, &patch)?;
        Ok(serde_json::to_value(updated)?)
    }

    fn set_status_str(&mut self, id: &str, status: &str) -> ListResult<()> {
        self.page.set_status_str(id, status)
    }

    fn request_delete(&mut self, id: &str) -> ListResult<String> {
        let request = self.page.request_delete(id)?;
        let prompt = request.prompt();
        self.pending.insert(id.to_string(), request);
        Ok(prompt)
    }

    fn confirm_delete(&mut self, id: &str) -> ListResult<()> {
        let request = self.pending.remove(id).ok_or_else(|| ListError::NoPendingDelete {
            kind: T::KIND,
            id: id.to_string(),
        })?;
        self.page.confirm_delete(request)
    }

    fn cancel_delete(&mut self, id: &str) {
        if let Some(request) = self.pending.remove(id) {
            self.page.cancel_delete(request);
        }
    }

    fn drain_notifications(&mut self) -> Vec<Notification> {
        self.page.drain_notifications()
    }
}

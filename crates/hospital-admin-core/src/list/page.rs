//! List page view model: query state, derived view and mutations.
//!
//! Each mutation follows the same contract as the admin forms: validate,
//! write through the repository, then queue a notification for the host UI.
//! Deletion is two-step. [`ListPage::request_delete`] hands out a
//! [`DeleteRequest`], and only [`ListPage::confirm_delete`] consumes it to
//! remove the record. Status changes apply immediately.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::NaiveDate;

use super::{
    DerivedView, ListError, ListResult, Notification, Outbox, Patch, Query, Selection, SortSpec,
};
use crate::ids::IdScheme;
use crate::models::{
    Attachment, Bed, Entity, HistoryEntry, Invoice, InvoiceItem, MedicalRecord, Patient,
    StatusValue,
};
use crate::repo::{MemoryRepository, Repository};

/// A pending deletion awaiting confirmation.
///
/// Only a [`ListPage`] can create one, and it is consumed by either
/// [`ListPage::confirm_delete`] or [`ListPage::cancel_delete`].
#[derive(Debug)]
#[must_use = "a delete request does nothing until it is confirmed"]
pub struct DeleteRequest<T> {
    id: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> DeleteRequest<T> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Confirmation prompt for the dialog.
    pub fn prompt(&self) -> String {
        format!(
            "Delete {} {}? This action cannot be undone.",
            T::KIND.label().to_lowercase(),
            self.id
        )
    }
}

/// View model behind one admin list page.
pub struct ListPage<T: Entity> {
    repo: Box<dyn Repository<T>>,
    query: Query,
    sort: Option<SortSpec>,
    outbox: Outbox,
}

impl<T: Entity> ListPage<T> {
    pub fn new(repo: Box<dyn Repository<T>>) -> Self {
        Self {
            repo,
            query: Query::new(),
            sort: None,
            outbox: Outbox::default(),
        }
    }

    /// Page over session-local records.
    pub fn in_memory(scheme: IdScheme, records: Vec<T>) -> Self {
        Self::new(Box::new(MemoryRepository::seeded(scheme, records)))
    }

    // =========================================================================
    // Query state
    // =========================================================================

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.set_search(term);
    }

    /// Select a facet value; `"all"` clears that facet.
    pub fn set_filter(&mut self, facet: &str, selection: impl Into<Selection>) -> ListResult<()> {
        if !T::FACETS.contains(&facet) {
            return Err(ListError::UnknownFacet {
                kind: T::KIND,
                facet: facet.to_string(),
            });
        }
        self.query.set_filter(facet, selection);
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.query.clear_filters();
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> ListResult<()> {
        if let Some(spec) = &sort {
            spec.validate::<T>()?;
        }
        self.sort = sort;
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All records, unfiltered.
    pub fn records(&self) -> ListResult<Vec<Arc<T>>> {
        self.repo.list()
    }

    /// Records matching the current search, filters and sort.
    pub fn view(&self) -> ListResult<DerivedView<T>> {
        let source = self.repo.list()?;
        let view = DerivedView::compute(&source, &self.query, self.sort.as_ref());
        tracing::debug!(
            kind = %T::KIND,
            visible = view.len(),
            total = view.total(),
            "recomputed view"
        );
        Ok(view)
    }

    pub fn get(&self, id: &str) -> ListResult<Option<Arc<T>>> {
        self.repo.get(id)
    }

    /// Current values of a record, for pre-filling its edit form.
    pub fn open_editor(&mut self, id: &str) -> ListResult<T> {
        match self.repo.get(id)? {
            Some(record) => Ok(record.as_ref().clone()),
            None => Err(self.stale(id)),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Validate, assign an identifier and append. Returns the new identifier.
    pub fn create(&mut self, mut record: T) -> ListResult<String> {
        self.validate(&mut record)?;

        let id = self.repo.next_id()?;
        if self.repo.get(&id)?.is_some() {
            self.outbox.push(Notification::error(
                format!("Could not add {}", T::KIND.label().to_lowercase()),
                format!("Identifier {id} is already in use."),
            ));
            return Err(ListError::DuplicateId(id));
        }

        record.set_id(id.clone());
        self.repo.create(record)?;

        tracing::info!(kind = %T::KIND, id = %id, "record created");
        self.outbox.push(Notification::success(
            format!("{} added", T::KIND.label()),
            format!("{id} has been created."),
        ));
        Ok(id)
    }

    /// Merge form values into an existing record.
    pub fn update(&mut self, id: &str, patch: &Patch) -> ListResult<T> {
        let Some(current) = self.repo.get(id)? else {
            return Err(self.stale(id));
        };

        let mut updated = match patch.apply(current.as_ref()) {
            Ok(updated) => updated,
            Err(e) => {
                self.outbox.push(Notification::error(
                    format!("Could not update {id}"),
                    e.to_string(),
                ));
                return Err(e);
            }
        };
        self.validate(&mut updated)?;

        self.write(updated.clone())?;

        tracing::info!(kind = %T::KIND, id, fields = ?patch.fields().collect::<Vec<_>>(), "record updated");
        self.outbox.push(Notification::success(
            format!("{} updated", T::KIND.label()),
            format!("{id} has been saved."),
        ));
        Ok(updated)
    }

    /// Change status immediately, without confirmation.
    pub fn set_status(&mut self, id: &str, status: T::Status) -> ListResult<()> {
        let Some(current) = self.repo.get(id)? else {
            return Err(self.stale(id));
        };

        let mut updated = current.as_ref().clone();
        updated.set_status(status);
        self.write(updated)?;

        tracing::info!(kind = %T::KIND, id, status = status.as_str(), "status changed");
        self.outbox.push(Notification::success(
            "Status updated",
            format!("{id} is now {}.", status.as_str()),
        ));
        Ok(())
    }

    /// [`ListPage::set_status`] from a wire name.
    pub fn set_status_str(&mut self, id: &str, status: &str) -> ListResult<()> {
        let parsed = T::Status::parse(status).ok_or_else(|| ListError::UnknownStatus {
            kind: T::KIND,
            value: status.to_string(),
        })?;
        self.set_status(id, parsed)
    }

    /// First step of deletion: check the record exists and ask for
    /// confirmation.
    pub fn request_delete(&mut self, id: &str) -> ListResult<DeleteRequest<T>> {
        if self.repo.get(id)?.is_none() {
            return Err(self.stale(id));
        }
        Ok(DeleteRequest {
            id: id.to_string(),
            _entity: PhantomData,
        })
    }

    /// Second step of deletion: the user accepted.
    pub fn confirm_delete(&mut self, request: DeleteRequest<T>) -> ListResult<()> {
        let id = request.id;
        if !self.repo.delete(&id)? {
            return Err(self.stale(&id));
        }

        tracing::info!(kind = %T::KIND, id = %id, "record deleted");
        self.outbox.push(Notification::success(
            format!("{} deleted", T::KIND.label()),
            format!("{id} has been removed."),
        ));
        Ok(())
    }

    /// The user dismissed the confirmation; nothing changes.
    pub fn cancel_delete(&mut self, request: DeleteRequest<T>) {
        tracing::debug!(kind = %T::KIND, id = %request.id, "delete cancelled");
    }

    /// Whole-record edit through a closure, for nested collection appends.
    pub fn modify(&mut self, id: &str, edit: impl FnOnce(&mut T)) -> ListResult<T> {
        self.try_modify(id, |record| {
            edit(record);
            Ok(())
        })
    }

    /// Like [`ListPage::modify`], but nothing is written if `edit` fails.
    pub fn try_modify(&mut self, id: &str, edit: impl FnOnce(&mut T) -> ListResult<()>) -> ListResult<T> {
        let Some(current) = self.repo.get(id)? else {
            return Err(self.stale(id));
        };

        let mut updated = current.as_ref().clone();
        if let Err(e) = edit(&mut updated) {
            self.outbox.push(Notification::error(
                format!("Could not update {id}"),
                e.to_string(),
            ));
            return Err(e);
        }
        self.write(updated.clone())?;
        Ok(updated)
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    pub fn notifications(&self) -> &[Notification] {
        self.outbox.pending()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.outbox.drain()
    }

    pub fn notify(&mut self, notification: Notification) {
        self.outbox.push(notification);
    }

    /// Required fields present, input values in stored form.
    fn validate(&mut self, record: &mut T) -> ListResult<()> {
        let missing = record.missing_required();
        if !missing.is_empty() {
            self.outbox.push(Notification::error(
                "Missing information",
                format!("Please fill in: {}", missing.join(", ")),
            ));
            return Err(ListError::MissingFields {
                kind: T::KIND,
                fields: missing,
            });
        }

        if let Err(e) = record.normalize() {
            self.outbox.push(Notification::error("Invalid value", e.to_string()));
            return Err(e.into());
        }
        Ok(())
    }

    fn write(&mut self, record: T) -> ListResult<()> {
        let id = record.id().to_string();
        if self.repo.update(record)? {
            Ok(())
        } else {
            Err(self.stale(&id))
        }
    }

    /// Report an identifier that no longer resolves. The list is unchanged.
    fn stale(&mut self, id: &str) -> ListError {
        tracing::warn!(kind = %T::KIND, id, "stale reference");
        self.outbox.push(Notification::error(
            format!("{} not found", T::KIND.label()),
            format!("{id} no longer exists. The list has been refreshed."),
        ));
        ListError::StaleReference {
            kind: T::KIND,
            id: id.to_string(),
        }
    }
}

// =============================================================================
// Nested collections
// =============================================================================

impl ListPage<Patient> {
    /// Append a medical history entry.
    pub fn append_history(&mut self, patient_id: &str, entry: HistoryEntry) -> ListResult<Patient> {
        let diagnosis = entry.diagnosis.clone();
        let patient = self.modify(patient_id, |p| p.medical_history.push(entry))?;
        let latest = patient
            .latest_history()
            .map(|e| e.diagnosis.as_str())
            .unwrap_or_default();
        self.notify(Notification::success(
            "Medical history updated",
            format!("{diagnosis} added to {}. Latest diagnosis: {latest}.", patient.name),
        ));
        Ok(patient)
    }
}

impl ListPage<MedicalRecord> {
    /// Attach file metadata to a record.
    pub fn attach_file(&mut self, record_id: &str, attachment: Attachment) -> ListResult<MedicalRecord> {
        let file_name = attachment.file_name.clone();
        let record = self.modify(record_id, |r| r.attachments.push(attachment))?;
        self.notify(Notification::success(
            "File attached",
            format!("{file_name} attached to {record_id}."),
        ));
        Ok(record)
    }
}

impl ListPage<Invoice> {
    /// Add a billed item to an invoice.
    pub fn add_item(&mut self, invoice_id: &str, item: InvoiceItem) -> ListResult<Invoice> {
        let mut total = 0u64;
        let invoice = self.try_modify(invoice_id, |i| {
            i.items.push(item);
            total = i
                .total_cents()
                .ok_or_else(|| ListError::InvalidPatch("invoice total is out of range".into()))?;
            Ok(())
        })?;
        self.notify(Notification::success(
            "Invoice updated",
            format!("{invoice_id} total is now {:.2}.", total as f64 / 100.0),
        ));
        Ok(invoice)
    }
}

impl ListPage<Bed> {
    /// Assign a patient to a bed.
    pub fn assign_bed(&mut self, bed_id: &str, patient_name: String, on: NaiveDate) -> ListResult<Bed> {
        let bed = self.modify(bed_id, |b| b.occupy(patient_name, on))?;
        self.notify(Notification::success(
            "Bed booked",
            format!(
                "{} assigned to bed {bed_id}.",
                bed.patient_name.as_deref().unwrap_or_default()
            ),
        ));
        Ok(bed)
    }

    /// Free a bed.
    pub fn release_bed(&mut self, bed_id: &str) -> ListResult<Bed> {
        let bed = self.modify(bed_id, Bed::release)?;
        self.notify(Notification::success(
            "Bed released",
            format!("Bed {bed_id} is available."),
        ));
        Ok(bed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::Level;
    use crate::models::{Appointment, AppointmentStatus, Doctor};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn appointment(id: &str, patient: &str, status: AppointmentStatus) -> Appointment {
        let mut a = Appointment::new(
            patient.into(),
            "Dr. Sarah Johnson".into(),
            "Cardiology".into(),
            date("2024-01-15"),
            "10:00",
        )
        .unwrap();
        a.id = id.into();
        a.status = status;
        a
    }

    fn page() -> ListPage<Appointment> {
        ListPage::in_memory(
            IdScheme::Sequential,
            vec![
                appointment("APT001", "John Smith", AppointmentStatus::Scheduled),
                appointment("APT002", "Mary Jones", AppointmentStatus::Completed),
            ],
        )
    }

    #[test]
    fn test_create_assigns_id_and_notifies() {
        let mut page = page();
        let new = appointment("", "Ann Lee", AppointmentStatus::Scheduled);

        let id = page.create(new).unwrap();
        assert_eq!(id, "APT003");

        let records = page.records().unwrap();
        assert_eq!(records.last().unwrap().id, "APT003");
        assert_eq!(page.notifications().last().unwrap().level, Level::Success);
    }

    #[test]
    fn test_create_rejects_blank_required() {
        let mut page = page();
        let new = appointment("", "  ", AppointmentStatus::Scheduled);

        let result = page.create(new);
        assert!(matches!(result, Err(ListError::MissingFields { ref fields, .. }) if fields == &vec!["patient_name"]));
        assert_eq!(page.records().unwrap().len(), 2);
        assert_eq!(page.notifications().last().unwrap().level, Level::Error);
    }

    #[test]
    fn test_create_detects_colliding_id() {
        // Seeded record whose id the allocator does not know about
        let mut page = ListPage::<Appointment>::in_memory(IdScheme::Sequential, vec![]);
        page.repo
            .create(appointment("APT001", "Legacy", AppointmentStatus::Scheduled))
            .unwrap();

        let result = page.create(appointment("", "Ann Lee", AppointmentStatus::Scheduled));
        assert!(matches!(result, Err(ListError::DuplicateId(ref id)) if id == "APT001"));
        assert_eq!(page.records().unwrap().len(), 1);
    }

    #[test]
    fn test_update_merges() {
        let mut page = page();
        let patch = Patch::new().set("department", "Neurology").set("notes", "Bring scans");

        let updated = page.update("APT002", &patch).unwrap();
        assert_eq!(updated.department, "Neurology");
        assert_eq!(updated.notes.as_deref(), Some("Bring scans"));
        assert_eq!(updated.patient_name, "Mary Jones");
        assert_eq!(page.get("APT002").unwrap().unwrap().department, "Neurology");
    }

    #[test]
    fn test_update_rejects_blanked_required_field() {
        let mut page = page();
        let patch = Patch::new().set("patient_name", "");

        let result = page.update("APT001", &patch);
        assert!(matches!(result, Err(ListError::MissingFields { ref fields, .. }) if fields == &vec!["patient_name"]));
        assert_eq!(page.get("APT001").unwrap().unwrap().patient_name, "John Smith");
        assert_eq!(page.notifications().last().unwrap().level, Level::Error);
    }

    #[test]
    fn test_update_stores_time_in_12h_form() {
        let mut page = page();

        let updated = page.update("APT001", &Patch::new().set("time", "14:45")).unwrap();
        assert_eq!(updated.time, "02:45 PM");

        let updated = page.update("APT001", &Patch::new().set("time", "09:05 AM")).unwrap();
        assert_eq!(updated.time, "09:05 AM");

        let result = page.update("APT001", &Patch::new().set("time", "not a time"));
        assert!(matches!(result, Err(ListError::Time(_))));
        assert_eq!(page.get("APT001").unwrap().unwrap().time, "09:05 AM");
        assert_eq!(page.notifications().last().unwrap().level, Level::Error);
    }

    #[test]
    fn test_create_normalizes_time() {
        let mut page = page();
        let mut new = appointment("", "Ann Lee", AppointmentStatus::Scheduled);
        new.time = "16:30".into();

        let id = page.create(new).unwrap();
        assert_eq!(page.get(&id).unwrap().unwrap().time, "04:30 PM");

        let mut bad = appointment("", "Ann Lee", AppointmentStatus::Scheduled);
        bad.time = "25:99".into();
        assert!(matches!(page.create(bad), Err(ListError::Time(_))));
        assert_eq!(page.records().unwrap().len(), 3);
    }

    #[test]
    fn test_stale_update_is_reported_and_harmless() {
        let mut page = page();
        let before = page.records().unwrap();

        let result = page.update("APT404", &Patch::new().set("department", "X"));
        assert!(matches!(result, Err(ListError::StaleReference { .. })));

        let after = page.records().unwrap();
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(after.iter()) {
            assert!(Arc::ptr_eq(a, b));
        }
        assert_eq!(page.notifications().last().unwrap().level, Level::Error);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut page = page();

        let request = page.request_delete("APT001").unwrap();
        assert!(request.prompt().contains("APT001"));
        page.cancel_delete(request);
        assert_eq!(page.records().unwrap().len(), 2);

        let request = page.request_delete("APT001").unwrap();
        page.confirm_delete(request).unwrap();
        assert_eq!(page.view().unwrap().ids(), vec!["APT002"]);
    }

    #[test]
    fn test_request_delete_stale() {
        let mut page = page();
        assert!(matches!(
            page.request_delete("APT404"),
            Err(ListError::StaleReference { .. })
        ));
    }

    #[test]
    fn test_confirm_after_concurrent_removal_is_stale() {
        let mut page = page();
        let first = page.request_delete("APT001").unwrap();
        let second = page.request_delete("APT001").unwrap();

        page.confirm_delete(first).unwrap();
        assert!(matches!(
            page.confirm_delete(second),
            Err(ListError::StaleReference { .. })
        ));
    }

    #[test]
    fn test_status_change_is_immediate() {
        let mut page = page();
        page.set_status("APT002", AppointmentStatus::Cancelled).unwrap();
        assert_eq!(
            page.get("APT002").unwrap().unwrap().status,
            AppointmentStatus::Cancelled
        );

        page.set_status_str("APT002", "in-progress").unwrap();
        assert_eq!(
            page.get("APT002").unwrap().unwrap().status,
            AppointmentStatus::InProgress
        );

        assert!(matches!(
            page.set_status_str("APT002", "postponed"),
            Err(ListError::UnknownStatus { .. })
        ));
    }

    #[test]
    fn test_view_follows_query() {
        let mut page = page();
        page.set_search("smith");
        assert_eq!(page.view().unwrap().ids(), vec!["APT001"]);

        page.set_search("");
        page.set_filter("status", "completed").unwrap();
        assert_eq!(page.view().unwrap().ids(), vec!["APT002"]);

        page.set_filter("status", "all").unwrap();
        assert_eq!(page.view().unwrap().len(), 2);

        assert!(page.set_filter("ward", "A").is_err());
        assert!(page.set_sort(Some(SortSpec::ascending("ward"))).is_err());
    }

    #[test]
    fn test_open_editor_prefills() {
        let mut page = page();
        let form = page.open_editor("APT001").unwrap();
        assert_eq!(form.patient_name, "John Smith");
        assert!(page.open_editor("APT404").is_err());
    }

    #[test]
    fn test_append_history() {
        let mut patient = Patient::new("John Smith".into(), 45, "male".into(), "555-0101".into());
        patient.id = "P001".into();
        let mut page = ListPage::in_memory(IdScheme::Sequential, vec![patient]);

        let entry = HistoryEntry {
            date: date("2024-02-01"),
            diagnosis: "Hypertension".into(),
            treatment: "Lisinopril".into(),
            doctor_name: "Dr. Chen".into(),
        };
        let updated = page.append_history("P001", entry.clone()).unwrap();
        assert_eq!(updated.medical_history, vec![entry.clone()]);

        let older = HistoryEntry {
            date: date("2023-11-20"),
            diagnosis: "Bronchitis".into(),
            ..entry
        };
        page.append_history("P001", older).unwrap();
        assert_eq!(page.get("P001").unwrap().unwrap().medical_history.len(), 2);
        let note = &page.notifications().last().unwrap().description;
        assert!(note.contains("Bronchitis added"));
        assert!(note.contains("Latest diagnosis: Hypertension"));
    }

    #[test]
    fn test_assign_and_release_bed() {
        let mut bed = Bed::new("ICU".into(), "12".into(), "icu".into());
        bed.id = "B001".into();
        let mut page = ListPage::in_memory(IdScheme::Sequential, vec![bed]);

        let bed = page.assign_bed("B001", "Ann Lee".into(), date("2024-03-02")).unwrap();
        assert_eq!(bed.status, crate::models::BedStatus::Occupied);

        let bed = page.release_bed("B001").unwrap();
        assert!(bed.patient_name.is_none());
    }

    #[test]
    fn test_add_invoice_item() {
        let mut invoice = Invoice::new("Ann Lee".into(), date("2024-03-01"), date("2024-03-31"));
        invoice.id = "INV001".into();
        let mut page = ListPage::in_memory(IdScheme::Sequential, vec![invoice]);

        let invoice = page
            .add_item(
                "INV001",
                InvoiceItem {
                    description: "X-ray".into(),
                    quantity: 1,
                    unit_price_cents: 12_050,
                },
            )
            .unwrap();
        assert_eq!(invoice.total_cents(), Some(12_050));
        assert!(page
            .notifications()
            .last()
            .unwrap()
            .description
            .contains("120.50"));
    }

    #[test]
    fn test_add_invoice_item_rejects_overflowing_total() {
        let mut invoice = Invoice::new("Ann Lee".into(), date("2024-03-01"), date("2024-03-31"));
        invoice.id = "INV001".into();
        let mut page = ListPage::in_memory(IdScheme::Sequential, vec![invoice]);

        let result = page.add_item(
            "INV001",
            InvoiceItem {
                description: "Transplant".into(),
                quantity: 2,
                unit_price_cents: u64::MAX / 2 + 1,
            },
        );
        assert!(matches!(result, Err(ListError::InvalidPatch(_))));
        assert!(page.get("INV001").unwrap().unwrap().items.is_empty());
        assert_eq!(page.notifications().last().unwrap().level, Level::Error);
    }

    #[test]
    fn test_attach_file_unknown_record() {
        let mut page = ListPage::<MedicalRecord>::in_memory(IdScheme::Sequential, vec![]);
        let attachment = Attachment {
            file_name: "scan.pdf".into(),
            content_type: "application/pdf".into(),
            size_bytes: 2048,
            uploaded_on: date("2024-03-01"),
        };
        assert!(matches!(
            page.attach_file("MR404", attachment),
            Err(ListError::StaleReference { .. })
        ));
    }

    #[test]
    fn test_pages_are_independent() {
        let mut doctors = ListPage::<Doctor>::in_memory(IdScheme::Sequential, vec![]);
        let mut appointments = page();

        doctors
            .create(Doctor {
                email: "omar@example.org".into(),
                ..Doctor::new("Dr. Omar".into(), "Surgery".into(), "Surgery".into())
            })
            .unwrap();
        assert_eq!(doctors.records().unwrap().len(), 1);
        assert_eq!(appointments.records().unwrap().len(), 2);
        assert!(appointments.drain_notifications().is_empty());
    }
}

//! View-all page - every record, sortable, with inline edit and delete
//!
//! Saves and deletes are applied to the loaded rows first and then sent to
//! the backend. A failed request is reported but the local change stays.

use crate::api::Backend;
use crate::error::{Error, ValidationError};
use crate::models::{Contact, PlacementRecord, RecordTuple, UpdateRequest, ViewRequest};
use crate::notify::Notice;
use crate::sort::{SortColumn, SortState};

use super::{is_blank, optional, parse_ctc, ChangePreview};

/// Draft of one row being edited inline, all eight fields as text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowEdit {
    pub id: i64,
    pub college_name: String,
    pub company_name: String,
    pub role: String,
    pub ctc: String,
    pub hr_name: String,
    pub linkedin_id: String,
    pub email: String,
    pub contact_number: String,
}

impl RowEdit {
    pub fn from_record(record: &PlacementRecord) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            id: record.id,
            college_name: record.college_name.clone(),
            company_name: record.company_name.clone(),
            role: record.role.clone(),
            ctc: record.ctc.to_string(),
            hr_name: text(&record.hr_name),
            linkedin_id: text(&record.linkedin_id),
            email: text(&record.email),
            contact_number: text(&record.contact_number),
        }
    }

    /// Validate the draft into the record it would become.
    fn to_record(&self) -> Result<PlacementRecord, ValidationError> {
        let required = [&self.college_name, &self.company_name, &self.role, &self.ctc];
        if required.iter().any(|v| is_blank(v)) {
            return Err(ValidationError::MissingFields);
        }
        Ok(PlacementRecord {
            id: self.id,
            college_name: self.college_name.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            role: self.role.trim().to_string(),
            ctc: parse_ctc(&self.ctc)?,
            hr_name: optional(&self.hr_name),
            linkedin_id: optional(&self.linkedin_id),
            email: optional(&self.email),
            contact_number: optional(&self.contact_number),
        })
    }

    fn preview_line(&self) -> String {
        format!(
            "{} || {} || {} || {}",
            self.college_name, self.company_name, self.role, self.ctc
        )
    }
}

pub struct ViewPage<'a, B: Backend + ?Sized> {
    backend: &'a B,
    records: Vec<PlacementRecord>,
    sort: SortState,
    editing: Option<RowEdit>,
}

impl<'a, B: Backend + ?Sized> ViewPage<'a, B> {
    /// Load every record once, requesting the server-side order of `sort`.
    pub fn open(backend: &'a B, sort: SortState) -> (Self, Vec<Notice>) {
        let request = ViewRequest {
            sort_by: sort.column.key().to_string(),
        };
        let mut notices = Vec::new();
        let records = match backend.view(&request) {
            Ok(records) => {
                tracing::info!("Loaded {} records", records.len());
                records
            }
            Err(e) => {
                tracing::warn!("Failed to load records: {e}");
                notices.push(Notice::from_error(&e));
                Vec::new()
            }
        };
        let page = Self {
            backend,
            records,
            sort,
            editing: None,
        };
        (page, notices)
    }

    pub fn records(&self) -> &[PlacementRecord] {
        &self.records
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort.toggle(column);
    }

    /// Records in display order.
    pub fn rows(&self) -> Vec<PlacementRecord> {
        self.sort.sorted(&self.records)
    }

    fn position(&self, id: i64) -> Result<usize, Error> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::RecordNotFound(id))
    }

    /// Start editing row `id`, replacing any draft in progress.
    pub fn begin_edit(&mut self, id: i64) -> Result<(), Error> {
        let index = self.position(id)?;
        self.editing = Some(RowEdit::from_record(&self.records[index]));
        Ok(())
    }

    pub fn editing(&self) -> Option<&RowEdit> {
        self.editing.as_ref()
    }

    pub fn edit_mut(&mut self) -> Option<&mut RowEdit> {
        self.editing.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Current and new values shown before a save is confirmed.
    pub fn save_preview(&self) -> Option<ChangePreview> {
        let draft = self.editing.as_ref()?;
        let index = self.position(draft.id).ok()?;
        Some(ChangePreview {
            current: RowEdit::from_record(&self.records[index]).preview_line(),
            new: draft.preview_line(),
        })
    }

    /// Apply the draft locally, then send it with its contact fields.
    pub fn save(&mut self) -> Notice {
        let Some(draft) = self.editing.as_ref() else {
            return Notice::from_error(&ValidationError::NoRecordSelected.into());
        };
        let index = match self.position(draft.id) {
            Ok(index) => index,
            Err(e) => return Notice::from_error(&e),
        };
        let updated = match draft.to_record() {
            Ok(record) => record,
            Err(e) => return Notice::from_error(&e.into()),
        };

        let request = UpdateRequest {
            old: self.records[index].tuple(),
            new: updated.tuple(),
            contact: Some(Contact {
                hr_name: updated.hr_name.clone(),
                linkedin_id: updated.linkedin_id.clone(),
                email: updated.email.clone(),
                contact_number: updated.contact_number.clone(),
            }),
        };
        self.records[index] = updated;
        self.editing = None;

        tracing::info!(
            "Saving row {}: [{}] -> [{}]",
            self.records[index].id,
            request.old,
            request.new
        );
        match self.backend.update(&request) {
            Ok(ack) => Notice::success(ack.text().unwrap_or("Data updated successfully!")),
            Err(e) => Notice::from_error(&e),
        }
    }

    /// Tuple of row `id`, shown before a delete is confirmed.
    pub fn delete_preview(&self, id: i64) -> Result<RecordTuple, Error> {
        Ok(self.records[self.position(id)?].tuple())
    }

    /// Remove row `id` locally, then ask the backend to delete it.
    pub fn delete(&mut self, id: i64) -> Notice {
        let index = match self.position(id) {
            Ok(index) => index,
            Err(e) => return Notice::from_error(&e),
        };
        let removed = self.records.remove(index);
        if self.editing.as_ref().is_some_and(|d| d.id == id) {
            self.editing = None;
        }

        let tuple = removed.tuple();
        tracing::info!("Deleting row {id}: [{tuple}]");
        match self.backend.delete(&tuple) {
            Ok(ack) => Notice::success(ack.text().unwrap_or("Data deleted successfully!")),
            Err(e) => Notice::from_error(&e),
        }
    }

    /// Link to the CSV export of all records.
    pub fn download_url(&self) -> String {
        self.backend.download_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{record, Call, FakeBackend};
    use crate::notify::Level;
    use crate::sort::SortOrder;

    fn backend() -> FakeBackend {
        let mut b = FakeBackend::new();
        let mut first = record(1, "Stanford", "Google", "SWE", 30.0);
        first.email = Some("hr@google.com".to_string());
        b.records = vec![
            first,
            record(2, "MIT", "Apple", "PM", 20.0),
            record(3, "IIT", "Meta", "SWE", 25.0),
        ];
        b
    }

    fn ids(rows: &[PlacementRecord]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_open_requests_sort_key() {
        let backend = backend();
        let (page, notices) = ViewPage::open(&backend, SortState::default());
        assert!(notices.is_empty());
        assert_eq!(
            backend.calls(),
            vec![Call::View(ViewRequest {
                sort_by: "college_name".to_string()
            })]
        );
        assert_eq!(ids(&page.rows()), vec![3, 2, 1]);
    }

    #[test]
    fn test_open_failure_reports() {
        let mut backend = backend();
        backend.fail_status = Some(500);
        let (page, notices) = ViewPage::open(&backend, SortState::default());
        assert_eq!(notices.len(), 1);
        assert!(page.records().is_empty());
    }

    #[test]
    fn test_sort_is_local() {
        let backend = backend();
        let sort = SortState::new(SortColumn::Ctc, SortOrder::Desc);
        let (mut page, _) = ViewPage::open(&backend, sort);
        assert_eq!(ids(&page.rows()), vec![1, 3, 2]);
        page.toggle_sort(SortColumn::Ctc);
        assert_eq!(ids(&page.rows()), vec![2, 3, 1]);
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn test_begin_edit_unknown_row() {
        let backend = backend();
        let (mut page, _) = ViewPage::open(&backend, SortState::default());
        let err = page.begin_edit(42).unwrap_err();
        assert_eq!(err.to_string(), "item not found for given id: 42");
    }

    #[test]
    fn test_save_updates_locally_and_sends_contact() {
        let backend = backend();
        let (mut page, _) = ViewPage::open(&backend, SortState::default());
        page.begin_edit(1).unwrap();
        assert_eq!(page.editing().unwrap().email, "hr@google.com");

        let draft = page.edit_mut().unwrap();
        draft.ctc = "32.5".to_string();
        draft.hr_name = "Asha".to_string();

        let preview = page.save_preview().unwrap();
        assert_eq!(preview.current, "Stanford || Google || SWE || 30");
        assert_eq!(preview.new, "Stanford || Google || SWE || 32.5");

        let notice = page.save();
        assert!(notice.is_success());
        assert!(page.editing().is_none());
        let row = page.records().iter().find(|r| r.id == 1).unwrap();
        assert_eq!(row.ctc, 32.5);
        assert_eq!(row.hr_name.as_deref(), Some("Asha"));

        let request = backend
            .calls()
            .into_iter()
            .find_map(|c| match c {
                Call::Update(r) => Some(r),
                _ => None,
            })
            .unwrap();
        assert_eq!(request.old.ctc, 30.0);
        assert_eq!(request.new.ctc, 32.5);
        let contact = request.contact.unwrap();
        assert_eq!(contact.hr_name.as_deref(), Some("Asha"));
        assert_eq!(contact.email.as_deref(), Some("hr@google.com"));
        assert_eq!(contact.linkedin_id, None);
    }

    #[test]
    fn test_save_cleared_contact_sends_null() {
        let backend = backend();
        let (mut page, _) = ViewPage::open(&backend, SortState::default());
        page.begin_edit(1).unwrap();
        page.edit_mut().unwrap().email.clear();

        assert!(page.save().is_success());
        let row = page.records().iter().find(|r| r.id == 1).unwrap();
        assert_eq!(row.email, None);

        let request = backend
            .calls()
            .into_iter()
            .find_map(|c| match c {
                Call::Update(r) => Some(r),
                _ => None,
            })
            .unwrap();
        assert_eq!(request.contact.unwrap().email, None);
    }

    #[test]
    fn test_save_invalid_ctc_keeps_draft() {
        let backend = backend();
        let (mut page, _) = ViewPage::open(&backend, SortState::default());
        page.begin_edit(2).unwrap();
        page.edit_mut().unwrap().ctc = "lots".to_string();

        let notice = page.save();
        assert_eq!(notice.level, Level::Error);
        assert!(page.editing().is_some());
        assert_eq!(page.records()[1].ctc, 20.0);
        assert!(!backend.calls().iter().any(|c| matches!(c, Call::Update(_))));
    }

    #[test]
    fn test_save_failure_keeps_local_change() {
        let mut backend = backend();
        backend.fail_status = Some(500);
        let mut page = ViewPage {
            backend: &backend,
            records: backend.records.clone(),
            sort: SortState::default(),
            editing: None,
        };
        page.begin_edit(2).unwrap();
        page.edit_mut().unwrap().role = "APM".to_string();

        let notice = page.save();
        assert_eq!(notice.level, Level::Error);
        assert_eq!(page.records()[1].role, "APM");
    }

    #[test]
    fn test_delete_removes_locally_and_sends_tuple() {
        let backend = backend();
        let (mut page, _) = ViewPage::open(&backend, SortState::default());
        assert_eq!(page.delete_preview(2).unwrap().company_name, "Apple");

        let notice = page.delete(2);
        assert!(notice.is_success());
        assert_eq!(ids(page.records()), vec![1, 3]);
        assert!(backend.calls().contains(&Call::Delete(RecordTuple {
            college_name: "MIT".to_string(),
            company_name: "Apple".to_string(),
            role: "PM".to_string(),
            ctc: 20.0,
        })));
    }

    #[test]
    fn test_delete_unknown_row() {
        let backend = backend();
        let (mut page, _) = ViewPage::open(&backend, SortState::default());
        let notice = page.delete(9);
        assert_eq!(notice.level, Level::Error);
        assert_eq!(notice.description, "item not found for given id: 9");
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn test_download_url() {
        let backend = backend();
        let (page, _) = ViewPage::open(&backend, SortState::default());
        assert_eq!(page.download_url(), "http://backend.test/download");
    }
}

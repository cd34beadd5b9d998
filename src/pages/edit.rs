//! Edit/Delete page - find a college's records, then change or remove one
//!
//! Rows are located by the backend through their (college, company, role,
//! ctc) tuple, so both the old and the new tuple travel with an update.

use crate::api::Backend;
use crate::autocomplete::{Field, Key, Suggestions};
use crate::error::{Error, ValidationError};
use crate::models::{PlacementRecord, RecordTuple, SearchQuery, UpdateRequest};
use crate::notify::Notice;

use super::{is_blank, parse_ctc, ChangePreview, ReferenceLists};

/// Editable fields of the selected record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub company_name: String,
    pub role: String,
    pub ctc: String,
}

impl EditForm {
    pub fn from_record(record: &PlacementRecord) -> Self {
        Self {
            company_name: record.company_name.clone(),
            role: record.role.clone(),
            ctc: record.ctc.to_string(),
        }
    }
}

/// Rows sharing one (company, role) pair
#[derive(Debug, Clone, PartialEq)]
pub struct PickerGroup<'r> {
    pub company_name: &'r str,
    pub role: &'r str,
    /// One entry per distinct row; several when only the ctc differs
    pub variants: Vec<&'r PlacementRecord>,
}

impl PickerGroup<'_> {
    /// Whether a secondary choice by ctc is needed
    pub fn is_ambiguous(&self) -> bool {
        self.variants.len() > 1
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.company_name, self.role)
    }
}

/// Group search results by (company, role), in first-seen order.
pub fn group_records(records: &[PlacementRecord]) -> Vec<PickerGroup<'_>> {
    let mut groups: Vec<PickerGroup<'_>> = Vec::new();
    for record in records {
        match groups
            .iter_mut()
            .find(|g| g.company_name == record.company_name && g.role == record.role)
        {
            Some(group) => group.variants.push(record),
            None => groups.push(PickerGroup {
                company_name: &record.company_name,
                role: &record.role,
                variants: vec![record],
            }),
        }
    }
    groups
}

pub struct EditPage<'a, B: Backend + ?Sized> {
    backend: &'a B,
    pub lists: ReferenceLists,
    pub suggestions: Suggestions,
    college_name: String,
    results: Vec<PlacementRecord>,
    selected: Option<PlacementRecord>,
    pub form: EditForm,
    original: EditForm,
}

impl<'a, B: Backend + ?Sized> EditPage<'a, B> {
    pub fn open(backend: &'a B, suggestion_limit: usize) -> (Self, Vec<Notice>) {
        let (lists, notices) = ReferenceLists::load_colleges(backend);
        let mut suggestions = Suggestions::new(suggestion_limit);
        suggestions.attach_outside_listener();
        let page = Self {
            backend,
            lists,
            suggestions,
            college_name: String::new(),
            results: Vec::new(),
            selected: None,
            form: EditForm::default(),
            original: EditForm::default(),
        };
        (page, notices)
    }

    pub fn college_name(&self) -> &str {
        &self.college_name
    }

    pub fn results(&self) -> &[PlacementRecord] {
        &self.results
    }

    pub fn selected(&self) -> Option<&PlacementRecord> {
        self.selected.as_ref()
    }

    /// Keystroke in the college field; stale results are dropped.
    pub fn type_college(&mut self, value: &str) {
        self.suggestions
            .focus(Field::CollegeName, &self.lists.colleges);
        self.college_name = value.to_string();
        self.results.clear();
        self.suggestions.input(value);
    }

    pub fn key(&mut self, key: Key) {
        if let Some(commit) = self.suggestions.key(key) {
            self.college_name = commit.value;
        }
    }

    pub fn click(&mut self, index: usize) {
        if let Some(commit) = self.suggestions.click(index) {
            self.college_name = commit.value;
        }
    }

    /// Step one: fetch every record of the typed college.
    ///
    /// Returns a notice only when there is something to report.
    pub fn search(&mut self) -> Option<Notice> {
        if is_blank(&self.college_name) {
            return Some(Notice::from_error(&ValidationError::MissingCollegeName.into()));
        }

        let query = SearchQuery {
            college_name: Some(self.college_name.trim().to_string()),
            ..Default::default()
        };
        match self.backend.search(&query) {
            Ok(records) => {
                tracing::info!("Found {} records for {}", records.len(), self.college_name);
                self.results = records;
                self.results
                    .is_empty()
                    .then(|| Notice::warning("No items were found..."))
            }
            Err(e) => {
                self.results.clear();
                Some(Notice::from_error(&e))
            }
        }
    }

    /// Search results grouped for the record picker.
    pub fn groups(&self) -> Vec<PickerGroup<'_>> {
        group_records(&self.results)
    }

    /// Step two: choose the record to edit.
    pub fn select(&mut self, id: i64) -> Result<(), Error> {
        let record = self
            .results
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(Error::RecordNotFound(id))?;
        self.form = EditForm::from_record(&record);
        self.original = self.form.clone();
        self.selected = Some(record);
        Ok(())
    }

    /// Update is only offered once a field differs from the original.
    pub fn can_update(&self) -> bool {
        self.selected.is_some() && self.form != self.original
    }

    pub fn can_delete(&self) -> bool {
        self.selected.is_some()
    }

    /// Text shown in the update confirmation.
    pub fn update_preview(&self) -> Option<ChangePreview> {
        let record = self.selected.as_ref()?;
        let line = |f: &EditForm| {
            format!(
                "{} || {} || {} || {}",
                record.college_name, f.company_name, f.role, f.ctc
            )
        };
        Some(ChangePreview {
            current: line(&self.original),
            new: line(&self.form),
        })
    }

    fn build_update(&self) -> Result<UpdateRequest, ValidationError> {
        let record = self
            .selected
            .as_ref()
            .ok_or(ValidationError::NoRecordSelected)?;
        if !self.can_update() {
            return Err(ValidationError::Unchanged);
        }
        if is_blank(&self.form.company_name) || is_blank(&self.form.role) || is_blank(&self.form.ctc)
        {
            return Err(ValidationError::MissingFields);
        }
        let ctc = parse_ctc(&self.form.ctc)?;

        Ok(UpdateRequest {
            old: record.tuple(),
            new: RecordTuple {
                college_name: record.college_name.clone(),
                company_name: self.form.company_name.trim().to_string(),
                role: self.form.role.trim().to_string(),
                ctc,
            },
            contact: None,
        })
    }

    /// Send the confirmed update. Selection and results are cleared afterwards.
    pub fn submit_update(&mut self) -> Notice {
        let request = match self.build_update() {
            Ok(request) => request,
            Err(e) => return Notice::from_error(&e.into()),
        };

        tracing::info!("Updating [{}] -> [{}]", request.old, request.new);
        let notice = match self.backend.update(&request) {
            Ok(ack) => Notice::success(format!(
                "Data updated successfully! {}",
                ack.text().unwrap_or_default()
            )),
            Err(e) => Notice::from_error(&e),
        };
        self.reset();
        notice
    }

    /// Delete the selected record by its original tuple.
    pub fn submit_delete(&mut self) -> Notice {
        let Some(record) = self.selected.as_ref() else {
            return Notice::from_error(&ValidationError::NoRecordSelected.into());
        };

        let tuple = record.tuple();
        tracing::info!("Deleting [{}]", tuple);
        let notice = match self.backend.delete(&tuple) {
            Ok(ack) => Notice::success(format!(
                "Data deleted successfully! {}",
                ack.text().unwrap_or_default()
            )),
            Err(e) => Notice::from_error(&e),
        };
        self.reset();
        notice
    }

    fn reset(&mut self) {
        self.selected = None;
        self.results.clear();
        self.form = EditForm::default();
        self.original = EditForm::default();
    }
}

impl<B: Backend + ?Sized> Drop for EditPage<'_, B> {
    fn drop(&mut self) {
        self.suggestions.detach_outside_listener();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{record, Call, FakeBackend};
    use crate::notify::Level;

    fn backend() -> FakeBackend {
        let mut b = FakeBackend::new();
        b.colleges = ["MIT", "Stanford"].map(String::from).to_vec();
        b.records = vec![
            record(0, "MIT", "Google", "SWE", 30.0),
            record(1, "MIT", "Google", "SWE", 35.0),
            record(2, "MIT", "Apple", "PM", 20.0),
            record(3, "Stanford", "Google", "SWE", 40.0),
        ];
        b
    }

    fn searched(backend: &FakeBackend) -> EditPage<'_, FakeBackend> {
        let (mut page, _) = EditPage::open(backend, 5);
        page.type_college("MIT");
        assert!(page.search().is_none());
        page
    }

    #[test]
    fn test_blank_college_is_rejected() {
        let backend = backend();
        let (mut page, _) = EditPage::open(&backend, 5);
        let notice = page.search().unwrap();
        assert_eq!(notice.description, "Please enter a college name.");
        assert!(!backend.calls().iter().any(|c| matches!(c, Call::Search(_))));
    }

    #[test]
    fn test_search_sends_college_only() {
        let backend = backend();
        let page = searched(&backend);
        assert_eq!(page.results().len(), 3);
        assert!(backend.calls().contains(&Call::Search(SearchQuery {
            college_name: Some("MIT".to_string()),
            company_name: None,
            role: None,
        })));
    }

    #[test]
    fn test_no_results_warns() {
        let backend = backend();
        let (mut page, _) = EditPage::open(&backend, 5);
        page.type_college("Harvard");
        let notice = page.search().unwrap();
        assert_eq!(notice.description, "No items were found...");
    }

    #[test]
    fn test_typing_clears_results() {
        let backend = backend();
        let mut page = searched(&backend);
        page.type_college("MI");
        assert!(page.results().is_empty());
    }

    #[test]
    fn test_groups_split_ctc_variants() {
        let backend = backend();
        let page = searched(&backend);
        let groups = page.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label(), "Google - SWE");
        assert!(groups[0].is_ambiguous());
        assert_eq!(
            groups[0].variants.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![0, 1]
        );
        assert!(!groups[1].is_ambiguous());
    }

    #[test]
    fn test_select_unknown_id() {
        let backend = backend();
        let mut page = searched(&backend);
        assert!(matches!(page.select(3), Err(Error::RecordNotFound(3))));
    }

    #[test]
    fn test_update_disabled_until_changed() {
        let backend = backend();
        let mut page = searched(&backend);
        assert!(!page.can_delete());
        page.select(1).unwrap();
        assert!(page.can_delete());
        assert!(!page.can_update());

        let notice = page.submit_update();
        assert_eq!(notice.level, Level::Warning);
        assert!(!backend.calls().iter().any(|c| matches!(c, Call::Update(_))));

        page.form.ctc = "36".to_string();
        assert!(page.can_update());
        page.form.ctc = "35".to_string();
        assert!(!page.can_update());
    }

    #[test]
    fn test_update_sends_old_and_new() {
        let backend = backend();
        let mut page = searched(&backend);
        page.select(1).unwrap();
        page.form.role = "Senior SWE".to_string();
        page.form.ctc = "45.5".to_string();

        let preview = page.update_preview().unwrap();
        assert_eq!(preview.current, "MIT || Google || SWE || 35");
        assert_eq!(preview.new, "MIT || Google || Senior SWE || 45.5");

        let notice = page.submit_update();
        assert!(notice.is_success());
        assert!(notice.description.starts_with("Data updated successfully!"));
        assert!(page.selected().is_none());
        assert!(page.results().is_empty());

        let request = backend
            .calls()
            .into_iter()
            .find_map(|c| match c {
                Call::Update(r) => Some(r),
                _ => None,
            })
            .unwrap();
        assert_eq!(request.old.ctc, 35.0);
        assert_eq!(request.old.role, "SWE");
        assert_eq!(request.new.role, "Senior SWE");
        assert_eq!(request.new.ctc, 45.5);
        assert_eq!(request.new.college_name, "MIT");
    }

    #[test]
    fn test_update_rejects_bad_ctc() {
        let backend = backend();
        let mut page = searched(&backend);
        page.select(2).unwrap();
        page.form.ctc = "twenty".to_string();
        let notice = page.submit_update();
        assert!(notice.description.contains("valid decimal number"));
        assert!(page.selected().is_some());
    }

    #[test]
    fn test_update_rejects_blank() {
        let backend = backend();
        let mut page = searched(&backend);
        page.select(2).unwrap();
        page.form.company_name.clear();
        assert_eq!(page.submit_update().description, "Please fill in all fields.");
    }

    #[test]
    fn test_delete_sends_original_tuple() {
        let backend = backend();
        let mut page = searched(&backend);
        page.select(0).unwrap();
        page.form.ctc = "99".to_string();

        let notice = page.submit_delete();
        assert!(notice.is_success());
        assert!(backend.calls().contains(&Call::Delete(RecordTuple {
            college_name: "MIT".to_string(),
            company_name: "Google".to_string(),
            role: "SWE".to_string(),
            ctc: 30.0,
        })));
        assert!(page.selected().is_none());
    }

    #[test]
    fn test_delete_without_selection() {
        let backend = backend();
        let mut page = searched(&backend);
        let notice = page.submit_delete();
        assert_eq!(notice.level, Level::Warning);
        assert!(!backend.calls().iter().any(|c| matches!(c, Call::Delete(_))));
    }

    #[test]
    fn test_backend_failure_is_error_notice() {
        let mut backend = backend();
        backend.fail_status = Some(500);
        let (mut page, _) = EditPage::open(&backend, 5);
        page.type_college("MIT");
        let notice = page.search().unwrap();
        assert_eq!(notice.level, Level::Error);
    }

    #[test]
    fn test_college_autocomplete() {
        let backend = backend();
        let (mut page, _) = EditPage::open(&backend, 5);
        page.type_college("stan");
        page.key(Key::Enter);
        assert_eq!(page.college_name(), "Stanford");
    }
}

//! Add page - create a single placement record

use crate::api::Backend;
use crate::autocomplete::{Commit, Field, Key, Suggestions};
use crate::error::ValidationError;
use crate::models::{Contact, NewRecord};
use crate::notify::Notice;

use super::{is_blank, optional, parse_ctc, ReferenceLists};

/// Raw text of the add form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub college_name: String,
    pub company_name: String,
    pub role: String,
    pub ctc: String,
    pub hr_name: String,
    pub linkedin_id: String,
    pub email: String,
    pub contact_number: String,
}

impl AddForm {
    /// Check required fields and build the request body.
    pub fn validate(&self) -> Result<NewRecord, ValidationError> {
        let required = [&self.college_name, &self.company_name, &self.role, &self.ctc];
        if required.iter().any(|v| is_blank(v)) {
            return Err(ValidationError::MissingFields);
        }
        let ctc = parse_ctc(&self.ctc)?;

        Ok(NewRecord {
            college_name: self.college_name.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            role: self.role.trim().to_string(),
            ctc,
            contact: Contact {
                hr_name: optional(&self.hr_name),
                linkedin_id: optional(&self.linkedin_id),
                email: optional(&self.email),
                contact_number: optional(&self.contact_number),
            },
        })
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::CollegeName => &mut self.college_name,
            Field::CompanyName => &mut self.company_name,
            Field::Role => &mut self.role,
        }
    }
}

pub struct AddPage<'a, B: Backend + ?Sized> {
    backend: &'a B,
    pub form: AddForm,
    pub lists: ReferenceLists,
    pub suggestions: Suggestions,
}

impl<'a, B: Backend + ?Sized> AddPage<'a, B> {
    /// Open the page, loading the autocomplete lists.
    pub fn open(backend: &'a B, suggestion_limit: usize) -> (Self, Vec<Notice>) {
        let (lists, notices) = ReferenceLists::load(backend);
        let mut suggestions = Suggestions::new(suggestion_limit);
        suggestions.attach_outside_listener();
        let page = Self {
            backend,
            form: AddForm::default(),
            lists,
            suggestions,
        };
        (page, notices)
    }

    /// A text field with suggestions received focus.
    pub fn focus(&mut self, field: Field) {
        self.suggestions.focus(field, self.lists.for_field(field));
    }

    /// Keystroke in a suggestion-backed field.
    pub fn type_into(&mut self, field: Field, value: &str) {
        self.focus(field);
        *self.form.field_mut(field) = value.to_string();
        self.suggestions.input(value);
    }

    pub fn key(&mut self, key: Key) {
        if let Some(commit) = self.suggestions.key(key) {
            self.apply(commit);
        }
    }

    pub fn click(&mut self, index: usize) {
        if let Some(commit) = self.suggestions.click(index) {
            self.apply(commit);
        }
    }

    fn apply(&mut self, commit: Commit) {
        if let Some(field) = commit.field {
            *self.form.field_mut(field) = commit.value;
        }
    }

    /// Validate and send the creation request.
    ///
    /// Validation failures keep the form as typed. Once a request is made the
    /// form is cleared whatever the outcome.
    pub fn submit(&mut self) -> Notice {
        let record = match self.form.validate() {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Add rejected: {e}");
                return Notice::from_error(&e.into());
            }
        };

        tracing::info!(
            "Adding {} / {} / {} ({})",
            record.college_name,
            record.company_name,
            record.role,
            record.ctc
        );
        let notice = match self.backend.add(&record) {
            Ok(ack) => Notice::success(ack.text().unwrap_or("Data added successfully!")),
            Err(e) => Notice::error(format!("Failed to add data: {e}")),
        };

        self.form = AddForm::default();
        self.suggestions.clear();
        notice
    }
}

impl<B: Backend + ?Sized> Drop for AddPage<'_, B> {
    fn drop(&mut self) {
        self.suggestions.detach_outside_listener();
    }
}

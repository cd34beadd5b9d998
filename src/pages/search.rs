//! Search page - query records by college, company, role or a combination

use crate::api::Backend;
use crate::autocomplete::{Commit, Field, Key, Suggestions};
use crate::error::ValidationError;
use crate::models::{PlacementRecord, SearchQuery};
use crate::notify::Notice;
use crate::sort::{SortColumn, SortState};

use super::{is_blank, optional, ReferenceLists};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    CollegeName,
    CompanyName,
    Role,
    MultipleCriteria,
}

impl SearchMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "college" | "college_name" => Some(Self::CollegeName),
            "company" | "company_name" => Some(Self::CompanyName),
            "role" => Some(Self::Role),
            "multi" | "multiple" => Some(Self::MultipleCriteria),
            _ => None,
        }
    }

    /// The single field this mode searches, `None` in multi mode
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::CollegeName => Some(Field::CollegeName),
            Self::CompanyName => Some(Field::CompanyName),
            Self::Role => Some(Field::Role),
            Self::MultipleCriteria => None,
        }
    }
}

/// Inputs of multi-criteria mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub college_name: String,
    pub company_name: String,
    pub role: String,
}

impl Criteria {
    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::CollegeName => &mut self.college_name,
            Field::CompanyName => &mut self.company_name,
            Field::Role => &mut self.role,
        }
    }
}

pub struct SearchPage<'a, B: Backend + ?Sized> {
    backend: &'a B,
    pub lists: ReferenceLists,
    pub suggestions: Suggestions,
    mode: SearchMode,
    pub term: String,
    pub criteria: Criteria,
    results: Vec<PlacementRecord>,
    sort: SortState,
}

impl<'a, B: Backend + ?Sized> SearchPage<'a, B> {
    pub fn open(backend: &'a B, suggestion_limit: usize) -> (Self, Vec<Notice>) {
        let (lists, notices) = ReferenceLists::load(backend);
        let mut suggestions = Suggestions::new(suggestion_limit);
        suggestions.attach_outside_listener();
        let page = Self {
            backend,
            lists,
            suggestions,
            mode: SearchMode::default(),
            term: String::new(),
            criteria: Criteria::default(),
            results: Vec::new(),
            sort: SortState::default(),
        };
        (page, notices)
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Switch search mode; the single search term is cleared.
    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
        self.term.clear();
        self.suggestions.clear();
    }

    /// Keystroke in the single-term input.
    pub fn type_term(&mut self, value: &str) {
        self.term = value.to_string();
        self.results.clear();
        if let Some(field) = self.mode.field() {
            self.suggestions.focus(field, self.lists.for_field(field));
            self.suggestions.input(value);
        }
    }

    /// Keystroke in one of the multi-criteria inputs.
    pub fn type_criterion(&mut self, field: Field, value: &str) {
        *self.criteria.field_mut(field) = value.to_string();
        self.results.clear();
        self.suggestions.focus(field, self.lists.for_field(field));
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
        match (self.mode, commit.field) {
            (SearchMode::MultipleCriteria, Some(field)) => {
                *self.criteria.field_mut(field) = commit.value;
            }
            _ => self.term = commit.value,
        }
    }

    /// Build the request body for the current mode.
    pub fn query(&self) -> Result<SearchQuery, ValidationError> {
        let Some(field) = self.mode.field() else {
            let query = SearchQuery {
                college_name: optional(&self.criteria.college_name),
                company_name: optional(&self.criteria.company_name),
                role: optional(&self.criteria.role),
            };
            if query == SearchQuery::default() {
                return Err(ValidationError::NoSearchCriteria);
            }
            return Ok(query);
        };

        if is_blank(&self.term) {
            return Err(ValidationError::EmptySearchTerm);
        }
        let term = Some(self.term.trim().to_string());
        let mut query = SearchQuery::default();
        match field {
            Field::CollegeName => query.college_name = term,
            Field::CompanyName => query.company_name = term,
            Field::Role => query.role = term,
        }
        Ok(query)
    }

    /// Run the search. Returns a notice only when there is something to report.
    pub fn search(&mut self) -> Option<Notice> {
        let query = match self.query() {
            Ok(query) => query,
            Err(e) => return Some(Notice::from_error(&e.into())),
        };

        self.suggestions.clear();
        match self.backend.search(&query) {
            Ok(records) => {
                tracing::info!("Search returned {} records", records.len());
                self.results = records;
                self.results
                    .is_empty()
                    .then(|| Notice::warning("No items were found..."))
            }
            Err(e) => {
                tracing::warn!("Search failed: {e}");
                self.results.clear();
                Some(Notice::from_error(&e))
            }
        }
    }

    pub fn results(&self) -> &[PlacementRecord] {
        &self.results
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Header click; re-sorts the loaded results without a new request.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort.toggle(column);
    }

    /// Results in display order.
    pub fn rows(&self) -> Vec<PlacementRecord> {
        if self.sort.chosen {
            self.sort.sorted(&self.results)
        } else {
            self.results.clone()
        }
    }
}

impl<B: Backend + ?Sized> Drop for SearchPage<'_, B> {
    fn drop(&mut self) {
        self.suggestions.detach_outside_listener();
    }
}

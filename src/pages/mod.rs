//! Page controllers
//!
//! Each dashboard page is a plain struct holding its form state and
//! results, with one method per user action. Actions return a [`Notice`]
//! describing the outcome; rendering is left to the caller.

pub mod add;
pub mod analytics;
pub mod edit;
pub mod search;
pub mod upload;
pub mod view;

use std::collections::HashSet;

use crate::api::Backend;
use crate::autocomplete::Field;
use crate::error::ValidationError;
use crate::notify::Notice;

/// Candidate lists for the autocomplete fields, fetched once per page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceLists {
    pub colleges: Vec<String>,
    pub companies: Vec<String>,
    pub roles: Vec<String>,
}

impl ReferenceLists {
    /// Fetch colleges only. A failure is reported and leaves the list empty.
    pub fn load_colleges<B: Backend + ?Sized>(backend: &B) -> (Self, Vec<Notice>) {
        let mut lists = Self::default();
        let mut notices = Vec::new();
        lists.fetch_colleges(backend, &mut notices);
        (lists, notices)
    }

    /// Fetch colleges, company names and roles.
    pub fn load<B: Backend + ?Sized>(backend: &B) -> (Self, Vec<Notice>) {
        let mut lists = Self::default();
        let mut notices = Vec::new();
        lists.fetch_colleges(backend, &mut notices);
        lists.fetch_companies(backend, &mut notices);
        (lists, notices)
    }

    pub fn for_field(&self, field: Field) -> &[String] {
        match field {
            Field::CollegeName => &self.colleges,
            Field::CompanyName => &self.companies,
            Field::Role => &self.roles,
        }
    }

    fn fetch_colleges<B: Backend + ?Sized>(&mut self, backend: &B, notices: &mut Vec<Notice>) {
        match backend.colleges() {
            Ok(colleges) => {
                self.colleges = unique(colleges.into_iter().map(|c| c.college_name));
                tracing::debug!("Loaded {} colleges", self.colleges.len());
            }
            Err(e) => {
                tracing::warn!("Failed to load colleges: {e}");
                notices.push(Notice::error(e.to_string()));
            }
        }
    }

    fn fetch_companies<B: Backend + ?Sized>(&mut self, backend: &B, notices: &mut Vec<Notice>) {
        match backend.companies() {
            Ok(companies) => {
                self.companies = unique(companies.iter().map(|c| c.company_name.clone()));
                self.roles = unique(companies.into_iter().map(|c| c.role));
                tracing::debug!(
                    "Loaded {} companies, {} roles",
                    self.companies.len(),
                    self.roles.len()
                );
            }
            Err(e) => {
                tracing::warn!("Failed to load companies: {e}");
                notices.push(Notice::error(e.to_string()));
            }
        }
    }
}

/// Deduplicate, keeping first occurrences in order.
pub fn unique(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Parse a CTC field: a finite, positive decimal.
pub fn parse_ctc(input: &str) -> Result<f64, ValidationError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidCtc)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidCtc);
    }
    Ok(value)
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Blank text becomes `None`, anything else is trimmed.
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Old/new pair shown before an update is confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePreview {
    pub current: String,
    pub new: String,
}

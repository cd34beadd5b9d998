//! Autocomplete suggestion widget
//!
//! One [`Suggestions`] instance backs every free-text field on a page. The
//! field that currently has focus decides which candidate list is searched;
//! typing re-filters synchronously, and a commit hands the chosen text back to
//! the page, which writes it into its own form state.

/// Number of suggestions shown at once.
pub const DEFAULT_LIMIT: usize = 5;

/// Logical field a suggestion list can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CollegeName,
    CompanyName,
    Role,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CollegeName => write!(f, "College Name"),
            Self::CompanyName => write!(f, "Company Name"),
            Self::Role => write!(f, "Role"),
        }
    }
}

/// Navigation keys understood by the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Enter,
}

/// A suggestion picked for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub field: Option<Field>,
    pub value: String,
}

/// First `limit` candidates, in list order, containing `input` case-insensitively.
///
/// Empty input yields no suggestions.
pub fn filter_candidates(candidates: &[String], input: &str, limit: usize) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    let needle = input.to_lowercase();
    candidates
        .iter()
        .filter(|c| c.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}

/// Suggestion list state shared by the fields of one page
#[derive(Debug, Clone)]
pub struct Suggestions {
    limit: usize,
    active: Option<Field>,
    candidates: Vec<String>,
    suggestions: Vec<String>,
    highlighted: Option<usize>,
    outside_listener: bool,
}

impl Default for Suggestions {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl Suggestions {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            active: None,
            candidates: Vec::new(),
            suggestions: Vec::new(),
            highlighted: None,
            outside_listener: false,
        }
    }

    /// Bind the widget to `field`, backed by `candidates`.
    ///
    /// Re-focusing the already active field keeps the open list.
    pub fn focus(&mut self, field: Field, candidates: &[String]) {
        if self.active == Some(field) {
            return;
        }
        self.active = Some(field);
        self.candidates = candidates.to_vec();
        self.clear();
    }

    /// The bound field's value changed.
    pub fn input(&mut self, value: &str) {
        self.suggestions = filter_candidates(&self.candidates, value, self.limit);
        self.highlighted = if self.suggestions.is_empty() {
            None
        } else {
            Some(0)
        };
    }

    /// Handle a navigation key. Returns the commit when Enter picks an item.
    pub fn key(&mut self, key: Key) -> Option<Commit> {
        match key {
            Key::Down => {
                self.cycle(1);
                None
            }
            Key::Up => {
                self.cycle(-1);
                None
            }
            Key::Enter => self.highlighted.and_then(|i| self.commit(i)),
        }
    }

    /// Pointer click on suggestion `index`.
    pub fn click(&mut self, index: usize) -> Option<Commit> {
        self.commit(index)
    }

    /// Pointer hover over suggestion `index`.
    pub fn hover(&mut self, index: usize) {
        if index < self.suggestions.len() {
            self.highlighted = Some(index);
        }
    }

    /// Register the outside-click handler. Returns false if already registered.
    pub fn attach_outside_listener(&mut self) -> bool {
        !std::mem::replace(&mut self.outside_listener, true)
    }

    /// Release the outside-click handler. Returns false if none was registered.
    pub fn detach_outside_listener(&mut self) -> bool {
        std::mem::replace(&mut self.outside_listener, false)
    }

    pub fn has_outside_listener(&self) -> bool {
        self.outside_listener
    }

    /// A pointer-down happened; closes the list unless it landed inside it.
    pub fn pointer_down(&mut self, inside_list: bool) {
        if self.outside_listener && !inside_list {
            self.clear();
        }
    }

    /// Close the list without committing.
    pub fn clear(&mut self) {
        self.suggestions.clear();
        self.highlighted = None;
    }

    pub fn active(&self) -> Option<Field> {
        self.active
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_open(&self) -> bool {
        !self.suggestions.is_empty()
    }

    // Wraps both ways; with nothing to cycle through the highlight stays put.
    fn cycle(&mut self, step: isize) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        let current = self.highlighted.map_or(-1, |i| i as isize);
        self.highlighted = Some((current + step).rem_euclid(len as isize) as usize);
    }

    fn commit(&mut self, index: usize) -> Option<Commit> {
        let value = self.suggestions.get(index)?.clone();
        self.clear();
        Some(Commit {
            field: self.active,
            value,
        })
    }
}

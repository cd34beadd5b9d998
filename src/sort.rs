//! Client-side sorting of loaded result tables

use std::cmp::Ordering;

use crate::models::PlacementRecord;

/// Sortable column of a record table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    CollegeName,
    CompanyName,
    Role,
    Ctc,
}

impl SortColumn {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "college" | "college_name" => Some(Self::CollegeName),
            "company" | "company_name" => Some(Self::CompanyName),
            "role" => Some(Self::Role),
            "ctc" => Some(Self::Ctc),
            _ => None,
        }
    }

    /// Wire name, as accepted by `/view`'s `sort_by`
    pub fn key(&self) -> &'static str {
        match self {
            Self::CollegeName => "college_name",
            Self::CompanyName => "company_name",
            Self::Role => "role",
            Self::Ctc => "ctc",
        }
    }

    /// Table header label
    pub fn label(&self) -> &'static str {
        match self {
            Self::CollegeName => "College Name",
            Self::CompanyName => "Company Name",
            Self::Role => "Role",
            Self::Ctc => "CTC",
        }
    }

    pub fn compare(&self, a: &PlacementRecord, b: &PlacementRecord) -> Ordering {
        match self {
            Self::CollegeName => a.college_name.cmp(&b.college_name),
            Self::CompanyName => a.company_name.cmp(&b.company_name),
            Self::Role => a.role.cmp(&b.role),
            Self::Ctc => a.ctc.total_cmp(&b.ctc),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Current sort column and direction of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: SortColumn,
    pub order: SortOrder,
    /// False until the user picks a column; the header marker is hidden until then
    pub chosen: bool,
}

impl SortState {
    pub fn new(column: SortColumn, order: SortOrder) -> Self {
        Self {
            column,
            order,
            chosen: true,
        }
    }

    /// Header click: same column flips direction, another column starts ascending.
    pub fn toggle(&mut self, column: SortColumn) {
        if column == self.column {
            self.order = self.order.reversed();
        } else {
            self.column = column;
            self.order = SortOrder::Asc;
        }
        self.chosen = true;
    }

    /// Stable sort of `records` in place.
    pub fn apply(&self, records: &mut [PlacementRecord]) {
        records.sort_by(|a, b| {
            let ord = self.column.compare(a, b);
            match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }

    /// Sorted copy, leaving the loaded list untouched.
    pub fn sorted(&self, records: &[PlacementRecord]) -> Vec<PlacementRecord> {
        let mut out = records.to_vec();
        self.apply(&mut out);
        out
    }
}

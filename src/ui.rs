//! Terminal rendering: palette, notices, tables and navigation
//!
//! Nothing here talks to the backend. Table builders return `comfy_table`
//! values so commands decide where they are printed.

use std::cell::Cell;
use std::rc::Rc;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell as TableCell, ContentArrangement, Table};
use owo_colors::{AnsiColors, OwoColorize};

use crate::models::{AnalyticsSummary, PlacementRecord, TopCtcItem, TopListItem};
use crate::notify::{Level, Notice};
use crate::pages::analytics::format_ctc;
use crate::sort::{SortColumn, SortOrder, SortState};
use crate::theme::{Subscription, Theme, ThemeContext};

/// One entry of the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub command: &'static str,
    pub about: &'static str,
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem {
        label: "View All",
        command: "view",
        about: "List every record, sort, edit or delete rows",
    },
    NavItem {
        label: "Search",
        command: "search",
        about: "Find records by college, company, role or several at once",
    },
    NavItem {
        label: "Add",
        command: "add",
        about: "Create a placement record",
    },
    NavItem {
        label: "Edit/Delete",
        command: "edit",
        about: "Change or remove one of a college's records",
    },
    NavItem {
        label: "Mass Upload",
        command: "upload",
        about: "Send a CSV file of records",
    },
    NavItem {
        label: "Analytics",
        command: "analytics",
        about: "Totals, CTC range and top-N lists",
    },
];

/// Long help text listing the pages
pub fn banner() -> String {
    let mut out = String::from("College-Connect\n\nPages:\n");
    for item in &NAV_ITEMS {
        out.push_str(&format!(
            "  {:<12} {:<10} {}\n",
            item.label, item.command, item.about
        ));
    }
    out
}

/// Colors used for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: AnsiColors,
    pub success: AnsiColors,
    pub warning: AnsiColors,
    pub error: AnsiColors,
    pub muted: AnsiColors,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                accent: AnsiColors::Blue,
                success: AnsiColors::Green,
                warning: AnsiColors::Yellow,
                error: AnsiColors::Red,
                muted: AnsiColors::BrightBlack,
            },
            Theme::Dark => Self {
                accent: AnsiColors::BrightCyan,
                success: AnsiColors::BrightGreen,
                warning: AnsiColors::BrightYellow,
                error: AnsiColors::BrightRed,
                muted: AnsiColors::White,
            },
        }
    }

    fn level(&self, level: Level) -> AnsiColors {
        match level {
            Level::Success => self.success,
            Level::Warning => self.warning,
            Level::Error => self.error,
        }
    }
}

/// Printer that follows the theme held by a [`ThemeContext`]
#[derive(Debug)]
pub struct Console {
    palette: Rc<Cell<Palette>>,
    subscription: Subscription,
}

impl Console {
    pub fn attach(theme: &mut ThemeContext) -> Self {
        let palette = Rc::new(Cell::new(Palette::for_theme(theme.current())));
        let target = Rc::clone(&palette);
        let subscription = theme.subscribe(move |t| target.set(Palette::for_theme(t)));
        Self {
            palette,
            subscription,
        }
    }

    pub fn detach(self, theme: &mut ThemeContext) {
        theme.unsubscribe(self.subscription);
    }

    pub fn palette(&self) -> Palette {
        self.palette.get()
    }

    pub fn notice(&self, notice: &Notice) {
        let line = format_notice(notice, self.palette());
        match notice.level {
            Level::Success => println!("{line}"),
            Level::Warning | Level::Error => eprintln!("{line}"),
        }
    }

    pub fn notices(&self, notices: &[Notice]) {
        for notice in notices {
            self.notice(notice);
        }
    }

    pub fn heading(&self, text: &str) {
        println!("{}", text.color(self.palette().accent).bold());
    }

    /// Loading indicator shown while a request is in flight.
    pub fn loading(&self, what: &str) {
        eprintln!("{}", format!("Loading {what}...").color(self.palette().muted));
    }

    pub fn muted(&self, text: &str) {
        println!("{}", text.color(self.palette().muted));
    }
}

pub fn format_notice(notice: &Notice, palette: Palette) -> String {
    let title = format!("{}:", notice.title);
    format!(
        "{} {}",
        title.color(palette.level(notice.level)).bold(),
        notice.description
    )
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn column_header(column: SortColumn, sort: Option<SortState>) -> String {
    match sort {
        Some(state) if state.chosen && state.column == column => {
            let arrow = match state.order {
                SortOrder::Asc => '▲',
                SortOrder::Desc => '▼',
            };
            format!("{} {arrow}", column.label())
        }
        _ => column.label().to_string(),
    }
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Record table; contact columns are included when `contacts` is set.
pub fn records_table(rows: &[PlacementRecord], sort: Option<SortState>, contacts: bool) -> Table {
    let mut table = new_table();

    let mut header = vec![TableCell::new("ID")];
    for column in [
        SortColumn::CollegeName,
        SortColumn::CompanyName,
        SortColumn::Role,
        SortColumn::Ctc,
    ] {
        header.push(TableCell::new(column_header(column, sort)));
    }
    if contacts {
        for label in ["HR Name", "LinkedIn", "Email", "Contact"] {
            header.push(TableCell::new(label));
        }
    }
    table.set_header(header);

    for row in rows {
        let mut cells = vec![
            TableCell::new(row.id),
            TableCell::new(&row.college_name),
            TableCell::new(&row.company_name),
            TableCell::new(&row.role),
            TableCell::new(row.ctc),
        ];
        if contacts {
            cells.push(TableCell::new(or_dash(&row.hr_name)));
            cells.push(TableCell::new(or_dash(&row.linkedin_id)));
            cells.push(TableCell::new(or_dash(&row.email)));
            cells.push(TableCell::new(or_dash(&row.contact_number)));
        }
        table.add_row(cells);
    }
    table
}

pub fn summary_table(summary: &AnalyticsSummary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Total Colleges".to_string(),
        summary.total_colleges.to_string(),
    ]);
    table.add_row(vec![
        "Total Companies".to_string(),
        summary.total_companies.to_string(),
    ]);
    table.add_row(vec![
        "Total Placements".to_string(),
        summary.total_placements.to_string(),
    ]);
    table.add_row(vec!["Average CTC".to_string(), format_ctc(summary.average_ctc)]);
    table.add_row(vec!["Minimum CTC".to_string(), format_ctc(summary.min_ctc)]);
    table.add_row(vec!["Maximum CTC".to_string(), format_ctc(summary.max_ctc)]);
    table
}

/// Ranked name/count table, e.g. companies by visits.
pub fn top_list_table(name_header: &str, items: &[TopListItem]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", name_header, "Visits"]);
    if items.is_empty() {
        table.add_row(vec!["", "No data", ""]);
    }
    for (rank, item) in items.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            item.name.clone(),
            item.count.to_string(),
        ]);
    }
    table
}

pub fn top_ctc_table(items: &[TopCtcItem]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Company", "Role", "CTC", "College"]);
    if items.is_empty() {
        table.add_row(vec!["", "No data", "", "", ""]);
    }
    for (rank, item) in items.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            item.company_name.clone(),
            item.role.clone(),
            format_ctc(Some(item.ctc)),
            item.college_name.clone(),
        ]);
    }
    table
}

//! Search command - find records by college, company, role or several

use anyhow::{Context as _, Result};
use college_connect::autocomplete::Field;
use college_connect::pages::search::{SearchMode, SearchPage};
use college_connect::ui;

use super::{settle, sort_state, terminal, Context};

/// Options for the search command
#[derive(Debug, Default)]
pub struct SearchOptions {
    /// Search mode: college, company, role or multi
    pub by: Option<String>,
    /// Term for the single-field modes
    pub term: Option<String>,
    pub college: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub sort: Option<String>,
    pub desc: bool,
}

impl SearchOptions {
    /// Explicit `--by`, else multi when any per-field flag is present.
    pub fn mode(&self) -> Result<SearchMode> {
        if let Some(by) = &self.by {
            return SearchMode::parse(by).with_context(|| {
                format!("Unknown search mode '{by}'. Use college, company, role or multi")
            });
        }
        if self.college.is_some() || self.company.is_some() || self.role.is_some() {
            return Ok(SearchMode::MultipleCriteria);
        }
        Ok(SearchMode::default())
    }
}

pub fn execute(ctx: &Context<'_>, options: SearchOptions) -> Result<()> {
    let mode = options.mode()?;
    let sort = sort_state(options.sort.as_deref(), options.desc)?;

    ctx.console.loading("suggestions");
    let (mut page, notices) = SearchPage::open(ctx.backend, ctx.suggestion_limit());
    ctx.console.notices(&notices);
    page.set_mode(mode);

    match mode.field() {
        Some(field) => {
            page.term = match options.term {
                Some(term) => term,
                None => terminal().suggest(
                    &field.to_string(),
                    field,
                    page.lists.for_field(field),
                    &mut page.suggestions,
                )?,
            };
        }
        None => {
            let given = [options.college, options.company, options.role];
            let interactive = given.iter().all(Option::is_none);
            let fields = [Field::CollegeName, Field::CompanyName, Field::Role];
            let mut prompt = terminal();
            for (field, value) in fields.into_iter().zip(given) {
                let value = match value {
                    Some(value) => value,
                    None if interactive => prompt.suggest(
                        &field.to_string(),
                        field,
                        page.lists.for_field(field),
                        &mut page.suggestions,
                    )?,
                    None => continue,
                };
                page.type_criterion(field, &value);
            }
        }
    }

    ctx.console.loading("results");
    if let Some(notice) = page.search() {
        settle(ctx.console, notice)?;
    }
    if page.results().is_empty() {
        return Ok(());
    }

    if let Some(sort) = sort {
        page.set_sort(sort);
    }
    let rows = page.rows();
    println!("{}", ui::records_table(&rows, Some(page.sort_state()), false));
    ctx.console.muted(&format!("{} records found", rows.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults_to_college() {
        assert_eq!(SearchOptions::default().mode().unwrap(), SearchMode::CollegeName);
    }

    #[test]
    fn test_field_flags_imply_multi() {
        let options = SearchOptions {
            role: Some("SWE".to_string()),
            ..Default::default()
        };
        assert_eq!(options.mode().unwrap(), SearchMode::MultipleCriteria);
    }

    #[test]
    fn test_explicit_mode_wins() {
        let options = SearchOptions {
            by: Some("company".to_string()),
            role: Some("SWE".to_string()),
            ..Default::default()
        };
        assert_eq!(options.mode().unwrap(), SearchMode::CompanyName);

        let options = SearchOptions {
            by: Some("salary".to_string()),
            ..Default::default()
        };
        assert!(options.mode().is_err());
    }
}

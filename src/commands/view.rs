//! View command - list every record, optionally editing or deleting one

use anyhow::Result;
use college_connect::api::Backend;
use college_connect::pages::view::{RowEdit, ViewPage};
use college_connect::ui;

use super::{settle, sort_state, terminal, Context};

/// Answer that empties a field; an empty line keeps it.
const CLEAR: &str = "-";

fn apply_answer(slot: &mut String, answer: &str) {
    match answer.trim() {
        "" => {}
        CLEAR => slot.clear(),
        _ => *slot = answer.to_string(),
    }
}

/// Options for the view command
#[derive(Debug, Default)]
pub struct ViewOptions {
    /// Column to sort by
    pub sort: Option<String>,
    /// Sort descending
    pub desc: bool,
    /// Row id to edit interactively
    pub edit: Option<i64>,
    /// Row id to delete
    pub delete: Option<i64>,
    /// Skip confirmation prompts
    pub yes: bool,
}

pub fn execute(ctx: &Context<'_>, options: ViewOptions) -> Result<()> {
    let sort = sort_state(options.sort.as_deref(), options.desc)?.unwrap_or_default();

    ctx.console.loading("records");
    let (mut page, notices) = ViewPage::open(ctx.backend, sort);
    ctx.console.notices(&notices);

    if let Some(id) = options.delete {
        delete_row(ctx, &mut page, id, options.yes)?;
    }
    if let Some(id) = options.edit {
        edit_row(ctx, &mut page, id, options.yes)?;
    }

    let rows = page.rows();
    println!("{}", ui::records_table(&rows, Some(page.sort_state()), true));
    ctx.console.muted(&format!(
        "{} records. Download as CSV: {}",
        rows.len(),
        page.download_url()
    ));
    Ok(())
}

fn delete_row<B: Backend + ?Sized>(
    ctx: &Context<'_>,
    page: &mut ViewPage<'_, B>,
    id: i64,
    yes: bool,
) -> Result<()> {
    let tuple = page.delete_preview(id)?;
    println!("Delete: {tuple}");
    if !yes && !terminal().confirm("Are you sure you want to delete this item?")? {
        println!("Aborted.");
        return Ok(());
    }
    settle(ctx.console, page.delete(id))
}

fn edit_row<B: Backend + ?Sized>(
    ctx: &Context<'_>,
    page: &mut ViewPage<'_, B>,
    id: i64,
    yes: bool,
) -> Result<()> {
    page.begin_edit(id)?;
    let mut prompt = terminal();
    println!(
        "Editing row {id}. Leave a field empty to keep its value, or enter {CLEAR} to clear it."
    );

    if let Some(draft) = page.edit_mut() {
        let fields: [(&str, fn(&mut RowEdit) -> &mut String); 8] = [
            ("College Name", |d| &mut d.college_name),
            ("Company Name", |d| &mut d.company_name),
            ("Role", |d| &mut d.role),
            ("CTC", |d| &mut d.ctc),
            ("HR Name", |d| &mut d.hr_name),
            ("LinkedIn ID", |d| &mut d.linkedin_id),
            ("Email", |d| &mut d.email),
            ("Contact Number", |d| &mut d.contact_number),
        ];
        for (label, field) in fields {
            let slot = field(draft);
            let answer = prompt.text(&format!("{label} [{slot}]"))?;
            apply_answer(slot, &answer);
        }
    }

    if let Some(preview) = page.save_preview() {
        println!("Current: {}", preview.current);
        println!("New:     {}", preview.new);
    }
    if !yes && !prompt.confirm("Save these changes?")? {
        page.cancel_edit();
        println!("Aborted.");
        return Ok(());
    }
    settle(ctx.console, page.save())
}

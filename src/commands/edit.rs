//! Edit command - find a college's records, then update or delete one

use anyhow::Result;
use college_connect::autocomplete::Field;
use college_connect::models::PlacementRecord;
use college_connect::pages::edit::EditPage;

use super::{pick_index, settle, terminal, Context};

/// Options for the edit command
#[derive(Debug, Default)]
pub struct EditOptions {
    /// College to look up (prompted if omitted)
    pub college: Option<String>,
    /// Delete the chosen record instead of editing it
    pub delete: bool,
    /// Skip confirmation prompts
    pub yes: bool,
}

/// One line of the CTC picker. The college search matches by substring, so
/// a group can mix colleges and each line names its own.
fn variant_line(index: usize, record: &PlacementRecord) -> String {
    format!(
        "  {}. {} - CTC {} (id {})",
        index + 1,
        record.college_name,
        record.ctc,
        record.id
    )
}

pub fn execute(ctx: &Context<'_>, options: EditOptions) -> Result<()> {
    ctx.console.loading("colleges");
    let (mut page, notices) = EditPage::open(ctx.backend, ctx.suggestion_limit());
    ctx.console.notices(&notices);
    let mut prompt = terminal();

    let college = match options.college {
        Some(college) => college,
        None => prompt.suggest(
            "College Name",
            Field::CollegeName,
            &page.lists.colleges,
            &mut page.suggestions,
        )?,
    };
    page.type_college(&college);
    page.suggestions.clear();

    ctx.console.loading("records");
    if let Some(notice) = page.search() {
        settle(ctx.console, notice)?;
    }
    if page.results().is_empty() {
        return Ok(());
    }

    // Step one: company/role, then ctc when several rows share them
    let id = {
        let groups = page.groups();
        for (i, group) in groups.iter().enumerate() {
            let suffix = if group.is_ambiguous() {
                format!(" ({} CTC values)", group.variants.len())
            } else {
                format!(" ({})", group.variants[0].ctc)
            };
            println!("  {}. {}{suffix}", i + 1, group.label());
        }
        let group = &groups[pick_index(&mut prompt, "Select record #", groups.len())?];

        if group.is_ambiguous() {
            for (i, record) in group.variants.iter().enumerate() {
                println!("{}", variant_line(i, record));
            }
            let choice = pick_index(&mut prompt, "Select CTC #", group.variants.len())?;
            group.variants[choice].id
        } else {
            group.variants[0].id
        }
    };
    page.select(id)?;

    if options.delete {
        if let Some(record) = page.selected() {
            println!("Delete: {}", record.tuple());
        }
        if !options.yes && !prompt.confirm("Are you sure you want to delete this item?")? {
            println!("Aborted.");
            return Ok(());
        }
        return settle(ctx.console, page.submit_delete());
    }

    println!("Leave a field empty to keep its value.");
    for (label, slot) in [
        ("Company Name", &mut page.form.company_name),
        ("Role", &mut page.form.role),
        ("CTC", &mut page.form.ctc),
    ] {
        let answer = prompt.text(&format!("{label} [{slot}]"))?;
        if !answer.trim().is_empty() {
            *slot = answer;
        }
    }

    if !page.can_update() {
        return settle(ctx.console, page.submit_update());
    }
    if let Some(preview) = page.update_preview() {
        println!("Current: {}", preview.current);
        println!("New:     {}", preview.new);
    }
    if !options.yes && !prompt.confirm("Are you sure you want to update this item?")? {
        println!("Aborted.");
        return Ok(());
    }
    settle(ctx.console, page.submit_update())
}

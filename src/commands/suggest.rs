//! Suggest command - print what the autocomplete widget would offer

use anyhow::{Context as _, Result};
use college_connect::autocomplete::{filter_candidates, Field};
use college_connect::pages::ReferenceLists;

use super::Context;

pub fn parse_field(s: &str) -> Option<Field> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "college" | "college_name" => Some(Field::CollegeName),
        "company" | "company_name" => Some(Field::CompanyName),
        "role" => Some(Field::Role),
        _ => None,
    }
}

pub fn execute(ctx: &Context<'_>, field: &str, term: &str) -> Result<()> {
    let field = parse_field(field)
        .with_context(|| format!("Unknown field '{field}'. Use college, company or role"))?;

    ctx.console.loading("suggestions");
    let (lists, notices) = match field {
        Field::CollegeName => ReferenceLists::load_colleges(ctx.backend),
        Field::CompanyName | Field::Role => ReferenceLists::load(ctx.backend),
    };
    ctx.console.notices(&notices);

    let suggestions = filter_candidates(lists.for_field(field), term, ctx.suggestion_limit());
    if suggestions.is_empty() {
        ctx.console.muted("No suggestions");
    }
    for suggestion in suggestions {
        println!("{suggestion}");
    }
    Ok(())
}

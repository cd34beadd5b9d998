//! CLI commands, one per dashboard page plus a few helpers

pub mod add;
pub mod analytics;
pub mod download;
pub mod edit;
pub mod search;
pub mod suggest;
pub mod upload;
pub mod view;

use std::io::{self, StdinLock, Stdout};

use anyhow::{bail, Context as _, Result};
use college_connect::api::Backend;
use college_connect::config::Config;
use college_connect::notify::{Level, Notice};
use college_connect::prompt::SuggestPrompt;
use college_connect::sort::{SortColumn, SortOrder, SortState};
use college_connect::ui::Console;

/// Everything a command needs besides its own options
pub struct Context<'a> {
    pub backend: &'a dyn Backend,
    pub config: &'a Config,
    pub console: &'a Console,
}

impl Context<'_> {
    pub fn suggestion_limit(&self) -> usize {
        self.config.ui.suggestion_limit
    }
}

/// Interactive prompt on the process's stdin/stdout
pub fn terminal() -> SuggestPrompt<StdinLock<'static>, Stdout> {
    SuggestPrompt::new(io::stdin().lock(), io::stdout())
}

/// Print a notice; error-level notices become the command's error instead.
pub fn settle(console: &Console, notice: Notice) -> Result<()> {
    if notice.level == Level::Error {
        bail!(notice.description);
    }
    console.notice(&notice);
    Ok(())
}

/// Resolve `--sort` / `--desc` into a table sort state.
///
/// `None` when neither flag was given.
pub fn sort_state(sort: Option<&str>, desc: bool) -> Result<Option<SortState>> {
    let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
    match sort {
        Some(name) => {
            let column = SortColumn::parse(name).with_context(|| {
                format!("Unknown sort column '{name}'. Use college, company, role or ctc")
            })?;
            Ok(Some(SortState::new(column, order)))
        }
        None if desc => Ok(Some(SortState::new(SortColumn::default(), order))),
        None => Ok(None),
    }
}

/// Ask for a 1-based choice among `len` items until one is valid.
pub fn pick_index<R: io::BufRead, W: io::Write>(
    prompt: &mut SuggestPrompt<R, W>,
    label: &str,
    len: usize,
) -> Result<usize> {
    loop {
        let answer = prompt.text(label)?;
        let answer = answer.trim();
        if answer.is_empty() {
            bail!("No selection made");
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => return Ok(n - 1),
            _ => println!("Enter a number between 1 and {len}."),
        }
    }
}

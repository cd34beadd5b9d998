//! Download command - save the CSV export of all records

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Local};
use owo_colors::OwoColorize;

use super::Context;

/// Default export file name for a given moment
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("data_export_{}.csv", now.format("%Y-%m-%d_%H-%M-%S"))
}

pub fn execute(ctx: &Context<'_>, output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(Local::now())));

    ctx.console.loading(&ctx.backend.download_url());
    let bytes = ctx.backend.download().context("Failed to download records")?;
    fs::write(&path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} {} bytes to {}",
        "Saved".green(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_file_name() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(export_file_name(at), "data_export_2024-03-09_14-05-07.csv");
    }
}

//! Analytics command - summary card and top-N tables

use anyhow::Result;
use college_connect::pages::analytics::AnalyticsPage;
use college_connect::ui;

use super::{settle, Context};

pub fn execute(ctx: &Context<'_>, top_n: Option<u32>) -> Result<()> {
    let top_n = top_n.unwrap_or(ctx.config.ui.top_n);
    if top_n == 0 {
        anyhow::bail!("N must be greater than 0");
    }

    ctx.console.loading("analytics");
    let (page, notice) = AnalyticsPage::load(ctx.backend, top_n);
    if let Some(notice) = notice {
        settle(ctx.console, notice)?;
    }
    let Some(report) = page.report else {
        return Ok(());
    };

    ctx.console.heading("Summary");
    println!("{}", ui::summary_table(&report.summary));

    ctx.console.heading(&format!("Top {top_n} Companies by Visits"));
    println!("{}", ui::top_list_table("Company", &report.top_companies));

    ctx.console.heading(&format!("Top {top_n} Colleges by Visits"));
    println!("{}", ui::top_list_table("College", &report.top_colleges));

    ctx.console.heading(&format!("Top {top_n} Placements by CTC"));
    println!("{}", ui::top_ctc_table(&report.top_placements));
    Ok(())
}

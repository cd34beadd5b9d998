//! Upload command - send a CSV file of records

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use college_connect::pages::upload::{file_from_path, UploadPage};

use super::{settle, Context};

/// Options for the upload command
#[derive(Debug)]
pub struct UploadOptions {
    pub file: PathBuf,
    /// Declared MIME type; inferred from the extension when omitted
    pub content_type: Option<String>,
}

pub fn execute(ctx: &Context<'_>, options: UploadOptions) -> Result<()> {
    let file = file_from_path(&options.file, options.content_type.as_deref())
        .with_context(|| format!("Failed to read {}", options.file.display()))?;

    let mut page = UploadPage::new(ctx.backend);
    if let Some(notice) = page.choose(file) {
        return settle(ctx.console, notice);
    }

    ctx.console.loading("upload");
    settle(ctx.console, page.submit())
}

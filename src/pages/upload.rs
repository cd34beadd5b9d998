//! Mass upload page - send one CSV file to the backend

use std::fs;
use std::path::Path;

use crate::api::{Backend, UploadFile, CSV_MIME};
use crate::error::{Error, Result, ValidationError};
use crate::notify::Notice;

/// MIME type a browser would report for `path`, from its extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => CSV_MIME,
        "txt" => "text/plain",
        "json" => "application/json",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

/// Read a local file for upload. An explicit content type wins over the extension.
pub fn file_from_path(path: &Path, content_type: Option<&str>) -> Result<UploadFile> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string());
    let mime = content_type
        .map(str::to_string)
        .unwrap_or_else(|| mime_for_path(path).to_string());
    Ok(UploadFile { name, mime, bytes })
}

pub struct UploadPage<'a, B: Backend + ?Sized> {
    backend: &'a B,
    file: Option<UploadFile>,
}

impl<'a, B: Backend + ?Sized> UploadPage<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            file: None,
        }
    }

    pub fn file(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    /// Pick a file. Anything not declared as `text/csv` is refused.
    pub fn choose(&mut self, file: UploadFile) -> Option<Notice> {
        if file.mime != CSV_MIME {
            tracing::warn!("Rejected {} ({})", file.name, file.mime);
            self.file = None;
            return Some(Notice::from_error(&ValidationError::InvalidFileType.into()));
        }
        self.file = Some(file);
        None
    }

    /// Upload the chosen file. The selection is cleared whatever the outcome.
    pub fn submit(&mut self) -> Notice {
        let Some(file) = self.file.take() else {
            return Notice::from_error(&ValidationError::NoFileSelected.into());
        };

        tracing::info!("Uploading {} ({} bytes)", file.name, file.bytes.len());
        match self.backend.upload_csv(&file) {
            Ok(()) => Notice::success("File uploaded successfully!"),
            Err(Error::Status { status, .. }) => {
                tracing::warn!("Upload rejected with status {status}");
                Notice::error("Error uploading file. Please try again.")
            }
            Err(e) => {
                tracing::error!("Upload failed: {e}");
                Notice::error("An unexpected error occurred.")
            }
        }
    }
}

//! Backend REST surface
//!
//! Pages talk to the backend only through [`Backend`], so they can be driven
//! by [`client::HttpBackend`] in the binary and by a recording fake in tests.

pub mod client;

#[cfg(test)]
pub(crate) mod fake;

use serde_json::Value;

use crate::error::Result;
use crate::models::{
    Ack, CollegeRef, CompanyRef, NewRecord, PlacementRecord, RecordTuple, SearchQuery,
    UpdateRequest, ViewRequest,
};

pub use client::HttpBackend;

/// MIME type the upload endpoint accepts.
pub const CSV_MIME: &str = "text/csv";

/// A local file staged for `/upload-csv`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name sent in the multipart part
    pub name: String,
    /// Declared MIME type
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Operations exposed by the College-Connect backend
pub trait Backend {
    /// `GET /colleges`
    fn colleges(&self) -> Result<Vec<CollegeRef>>;

    /// `GET /companies`
    fn companies(&self) -> Result<Vec<CompanyRef>>;

    /// `POST /add`
    fn add(&self, record: &NewRecord) -> Result<Ack>;

    /// `POST /search`
    fn search(&self, query: &SearchQuery) -> Result<Vec<PlacementRecord>>;

    /// `POST /view`
    fn view(&self, request: &ViewRequest) -> Result<Vec<PlacementRecord>>;

    /// `POST /edit-college-company`
    fn update(&self, request: &UpdateRequest) -> Result<Ack>;

    /// `POST /delete-college-company`
    fn delete(&self, tuple: &RecordTuple) -> Result<Ack>;

    /// `POST /upload-csv` as multipart field `file`
    fn upload_csv(&self, file: &UploadFile) -> Result<()>;

    /// `GET /analytics?n=N`, undecoded
    fn analytics(&self, top_n: u32) -> Result<Value>;

    /// Absolute URL of `GET /download`
    fn download_url(&self) -> String;

    /// `GET /download` body
    fn download(&self) -> Result<Vec<u8>>;
}

/// Interpret an acknowledgement body leniently; non-object bodies carry no text.
pub(crate) fn ack_from(value: Value) -> Ack {
    serde_json::from_value(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ack_from_object() {
        let ack = ack_from(json!({"message": "Data added successfully!"}));
        assert_eq!(ack.text(), Some("Data added successfully!"));
    }

    #[test]
    fn test_ack_from_non_object() {
        assert_eq!(ack_from(json!("done")), Ack::default());
        assert_eq!(ack_from(json!(null)), Ack::default());
    }
}

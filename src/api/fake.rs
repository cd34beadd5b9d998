//! In-memory backend that records every call

use std::cell::RefCell;

use serde_json::{json, Value};

use super::{Backend, UploadFile};
use crate::error::{Error, Result};
use crate::models::{
    Ack, CollegeRef, CompanyRef, NewRecord, PlacementRecord, RecordTuple, SearchQuery,
    UpdateRequest, ViewRequest,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Colleges,
    Companies,
    Add(NewRecord),
    Search(SearchQuery),
    View(ViewRequest),
    Update(UpdateRequest),
    Delete(RecordTuple),
    Upload(String),
    Analytics(u32),
    Download,
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    pub colleges: Vec<String>,
    pub companies: Vec<(String, String)>,
    pub records: Vec<PlacementRecord>,
    pub analytics: Option<Value>,
    /// Status code every page action (add, search, view, update, ...) fails with
    pub fail_status: Option<u16>,
    /// Status code reference lists, analytics and download fail with
    pub fail_reference: Option<u16>,
    /// Fail page actions without any HTTP response
    pub fail_unexpected: bool,
    calls: RefCell<Vec<Call>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, call: Call) -> Result<()> {
        let reference = matches!(
            call,
            Call::Colleges | Call::Companies | Call::Analytics(_) | Call::Download
        );
        self.calls.borrow_mut().push(call);
        if self.fail_unexpected && !reference {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            )));
        }
        match (reference, self.fail_status, self.fail_reference) {
            (false, Some(status), _) | (true, _, Some(status)) => {
                Err(Error::status(status, None))
            }
            _ => Ok(()),
        }
    }

    fn matching(&self, query: &SearchQuery) -> Vec<PlacementRecord> {
        let hit = |want: &Option<String>, have: &str| want.as_deref().map_or(true, |w| w == have);
        self.records
            .iter()
            .filter(|r| {
                hit(&query.college_name, &r.college_name)
                    && hit(&query.company_name, &r.company_name)
                    && hit(&query.role, &r.role)
            })
            .cloned()
            .collect()
    }
}

pub fn record(id: i64, college: &str, company: &str, role: &str, ctc: f64) -> PlacementRecord {
    PlacementRecord {
        id,
        college_name: college.to_string(),
        company_name: company.to_string(),
        role: role.to_string(),
        ctc,
        hr_name: None,
        linkedin_id: None,
        email: None,
        contact_number: None,
    }
}

impl Backend for FakeBackend {
    fn colleges(&self) -> Result<Vec<CollegeRef>> {
        self.record(Call::Colleges)?;
        Ok(self
            .colleges
            .iter()
            .enumerate()
            .map(|(i, name)| CollegeRef {
                id: i as i64,
                college_name: name.clone(),
            })
            .collect())
    }

    fn companies(&self) -> Result<Vec<CompanyRef>> {
        self.record(Call::Companies)?;
        Ok(self
            .companies
            .iter()
            .enumerate()
            .map(|(i, (name, role))| CompanyRef {
                id: i as i64,
                company_name: name.clone(),
                role: role.clone(),
                ctc: 0.0,
            })
            .collect())
    }

    fn add(&self, record: &NewRecord) -> Result<Ack> {
        self.record(Call::Add(record.clone()))?;
        Ok(Ack {
            message: Some("Data added successfully!".to_string()),
            ..Default::default()
        })
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<PlacementRecord>> {
        self.record(Call::Search(query.clone()))?;
        Ok(self.matching(query))
    }

    fn view(&self, request: &ViewRequest) -> Result<Vec<PlacementRecord>> {
        self.record(Call::View(request.clone()))?;
        Ok(self.records.clone())
    }

    fn update(&self, request: &UpdateRequest) -> Result<Ack> {
        self.record(Call::Update(request.clone()))?;
        Ok(Ack {
            message: Some("Data successfully updated!".to_string()),
            ..Default::default()
        })
    }

    fn delete(&self, tuple: &RecordTuple) -> Result<Ack> {
        self.record(Call::Delete(tuple.clone()))?;
        Ok(Ack {
            message: Some("Data successfully deleted!".to_string()),
            ..Default::default()
        })
    }

    fn upload_csv(&self, file: &UploadFile) -> Result<()> {
        self.record(Call::Upload(file.name.clone()))
    }

    fn analytics(&self, top_n: u32) -> Result<Value> {
        self.record(Call::Analytics(top_n))?;
        Ok(self.analytics.clone().unwrap_or_else(|| json!({})))
    }

    fn download_url(&self) -> String {
        "http://backend.test/download".to_string()
    }

    fn download(&self) -> Result<Vec<u8>> {
        self.record(Call::Download)?;
        Ok(b"college_name,company_name,role,ctc\n".to_vec())
    }
}

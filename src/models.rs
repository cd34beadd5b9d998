//! Wire types exchanged with the College-Connect backend

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One placement row as returned by `/search` and `/view`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Server-assigned identifier
    pub id: i64,
    pub college_name: String,
    pub company_name: String,
    pub role: String,
    /// Cost-to-company
    pub ctc: f64,
    #[serde(default)]
    pub hr_name: Option<String>,
    #[serde(default)]
    pub linkedin_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

impl PlacementRecord {
    /// The (college, company, role, ctc) tuple the backend matches rows by
    pub fn tuple(&self) -> RecordTuple {
        RecordTuple {
            college_name: self.college_name.clone(),
            company_name: self.company_name.clone(),
            role: self.role.clone(),
            ctc: self.ctc,
        }
    }
}

/// Entry of `GET /colleges`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollegeRef {
    pub id: i64,
    pub college_name: String,
}

/// Entry of `GET /companies`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompanyRef {
    pub id: i64,
    pub company_name: String,
    pub role: String,
    pub ctc: f64,
}

/// Optional recruiter contact attached to a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        self.hr_name.is_none()
            && self.linkedin_id.is_none()
            && self.email.is_none()
            && self.contact_number.is_none()
    }
}

/// Body of `POST /add`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecord {
    pub college_name: String,
    pub company_name: String,
    pub role: String,
    pub ctc: f64,
    #[serde(flatten)]
    pub contact: Contact,
}

/// Body of `POST /search`; unset fields are sent as explicit nulls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub college_name: Option<String>,
    pub company_name: Option<String>,
    pub role: Option<String>,
}

/// Body of `POST /view`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRequest {
    pub sort_by: String,
}

/// Exact row identity used by update and delete; also the body of
/// `POST /delete-college-company`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordTuple {
    pub college_name: String,
    pub company_name: String,
    pub role: String,
    pub ctc: f64,
}

impl std::fmt::Display for RecordTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} || {} || {} || {}",
            self.college_name, self.company_name, self.role, self.ctc
        )
    }
}

/// Body of `POST /edit-college-company`
///
/// The backend locates the row by the old tuple, removes it and inserts the
/// new one.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub old: RecordTuple,
    pub new: RecordTuple,
    /// New contact fields; only sent from the view-all page
    pub contact: Option<Contact>,
}

impl Serialize for UpdateRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("old_college_name", &self.old.college_name)?;
        map.serialize_entry("old_company_name", &self.old.company_name)?;
        map.serialize_entry("old_role", &self.old.role)?;
        map.serialize_entry("old_ctc", &self.old.ctc)?;
        map.serialize_entry("new_college_name", &self.new.college_name)?;
        map.serialize_entry("new_company_name", &self.new.company_name)?;
        map.serialize_entry("new_role", &self.new.role)?;
        map.serialize_entry("new_ctc", &self.new.ctc)?;
        if let Some(contact) = &self.contact {
            map.serialize_entry("new_hr_name", &contact.hr_name)?;
            map.serialize_entry("new_linkedin_id", &contact.linkedin_id)?;
            map.serialize_entry("new_email", &contact.email)?;
            map.serialize_entry("new_contact_number", &contact.contact_number)?;
        }
        map.end()
    }
}

/// Generic `{message}` acknowledgement
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Ack {
    /// The most useful human-readable text the server sent, if any
    pub fn text(&self) -> Option<&str> {
        self.data
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error.as_deref())
    }
}

/// `summary` section of `/analytics`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalyticsSummary {
    pub total_colleges: u64,
    pub total_companies: u64,
    pub total_placements: u64,
    pub average_ctc: Option<f64>,
    pub min_ctc: Option<f64>,
    pub max_ctc: Option<f64>,
}

/// A name with a visit count
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopListItem {
    pub name: String,
    pub count: u64,
}

/// A single high-paying placement
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopCtcItem {
    pub company_name: String,
    pub role: String,
    pub ctc: f64,
    pub college_name: String,
}

/// The pre-aggregated analytics document
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    /// N used for the top lists
    pub top_n: u32,
    pub summary: AnalyticsSummary,
    pub top_companies: Vec<TopListItem>,
    pub top_colleges: Vec<TopListItem>,
    pub top_placements: Vec<TopCtcItem>,
}

impl AnalyticsReport {
    /// Key names the server uses for a given N
    pub fn keys(top_n: u32) -> [String; 4] {
        [
            "summary".to_string(),
            format!("top_{top_n}_companies_by_visits"),
            format!("top_{top_n}_colleges_by_visits"),
            format!("top_{top_n}_placements_by_ctc"),
        ]
    }

    /// Parse the analytics payload after a shallow presence check.
    ///
    /// Keys that are absent or null are reported as an incomplete payload
    /// before any field-level decoding happens.
    pub fn from_value(top_n: u32, mut value: Value) -> Result<Self> {
        let [summary_key, companies_key, colleges_key, placements_key] = Self::keys(top_n);

        for key in [&summary_key, &companies_key, &colleges_key, &placements_key] {
            if value.get(key).map_or(true, Value::is_null) {
                return Err(Error::IncompletePayload {
                    missing: key.clone(),
                });
            }
        }

        let mut take = |key: &str| value.get_mut(key).map(Value::take).unwrap_or_default();

        Ok(Self {
            top_n,
            summary: serde_json::from_value(take(&summary_key))?,
            top_companies: serde_json::from_value(take(&companies_key))?,
            top_colleges: serde_json::from_value(take(&colleges_key))?,
            top_placements: serde_json::from_value(take(&placements_key))?,
        })
    }
}

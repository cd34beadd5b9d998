//! Analytics page - summary card and top-N tables

use crate::api::Backend;
use crate::models::AnalyticsReport;
use crate::notify::Notice;

/// Top-list size used when none is configured.
pub const DEFAULT_TOP_N: u32 = 5;

/// Render a CTC figure, `N/A` when the server has none.
pub fn format_ctc(ctc: Option<f64>) -> String {
    match ctc {
        Some(value) => format!("{value:.2} LPA"),
        None => "N/A".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsPage {
    pub top_n: u32,
    pub report: Option<AnalyticsReport>,
}

impl AnalyticsPage {
    /// Fetch and validate the analytics document for `top_n`.
    ///
    /// On failure the page has no report and the notice says why.
    pub fn load<B: Backend + ?Sized>(backend: &B, top_n: u32) -> (Self, Option<Notice>) {
        let result = backend
            .analytics(top_n)
            .and_then(|value| AnalyticsReport::from_value(top_n, value));

        match result {
            Ok(report) => {
                tracing::info!(
                    "Analytics: {} placements across {} colleges",
                    report.summary.total_placements,
                    report.summary.total_colleges
                );
                let page = Self {
                    top_n,
                    report: Some(report),
                };
                (page, None)
            }
            Err(e) => {
                tracing::warn!("Analytics unavailable: {e}");
                let page = Self {
                    top_n,
                    report: None,
                };
                (page, Some(Notice::from_error(&e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeBackend};
    use crate::notify::Level;
    use serde_json::json;

    fn payload(n: u32) -> serde_json::Value {
        json!({
            "summary": {
                "total_colleges": 12,
                "total_companies": 30,
                "total_placements": 140,
                "average_ctc": 11.456,
                "min_ctc": 3.5,
                "max_ctc": 44.0
            },
            format!("top_{n}_companies_by_visits"): [{"name": "Google", "count": 9}],
            format!("top_{n}_colleges_by_visits"): [{"name": "MIT", "count": 20}],
            format!("top_{n}_placements_by_ctc"): []
        })
    }

    #[test]
    fn test_format_ctc() {
        assert_eq!(format_ctc(Some(11.456)), "11.46 LPA");
        assert_eq!(format_ctc(Some(7.0)), "7.00 LPA");
        assert_eq!(format_ctc(None), "N/A");
    }

    #[test]
    fn test_load_report() {
        let mut backend = FakeBackend::new();
        backend.analytics = Some(payload(5));

        let (page, notice) = AnalyticsPage::load(&backend, DEFAULT_TOP_N);
        assert!(notice.is_none());
        let report = page.report.unwrap();
        assert_eq!(report.summary.total_placements, 140);
        assert_eq!(report.top_colleges[0].name, "MIT");
        assert!(report.top_placements.is_empty());
        assert_eq!(backend.calls(), vec![Call::Analytics(5)]);
    }

    #[test]
    fn test_custom_n_uses_matching_keys() {
        let mut backend = FakeBackend::new();
        backend.analytics = Some(payload(3));
        let (page, notice) = AnalyticsPage::load(&backend, 3);
        assert!(notice.is_none());
        assert_eq!(page.report.unwrap().top_n, 3);
    }

    #[test]
    fn test_incomplete_payload() {
        let mut backend = FakeBackend::new();
        backend.analytics = Some(json!({"summary": {"total_colleges": 1}}));

        let (page, notice) = AnalyticsPage::load(&backend, 5);
        assert!(page.report.is_none());
        let notice = notice.unwrap();
        assert_eq!(notice.level, Level::Error);
        assert_eq!(notice.description, "Incomplete data received from server.");
    }

    #[test]
    fn test_status_failure_uses_generic_message() {
        let mut backend = FakeBackend::new();
        backend.fail_reference = Some(502);
        let (_, notice) = AnalyticsPage::load(&backend, 5);
        assert_eq!(
            notice.unwrap().description,
            "Network response was not ok (status: 502)"
        );
    }
}

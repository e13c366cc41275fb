//! Display models for table and JSON output
//!
//! Display models flatten API and batch types into CLI-friendly rows with
//! column names for tables and stable keys for JSON.

use serde::Serialize;
use tabled::Tabled;

use crate::client::batch::ItemReport;
use crate::client::{Application, Vulnerability};

/// Longest vulnerability summary shown in a table cell
const SUMMARY_WIDTH: usize = 80;

/// Application display model
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AppDisplay {
    #[tabled(rename = "APP ID")]
    pub id: String,

    #[tabled(rename = "LABEL")]
    pub label: String,

    #[tabled(rename = "LANGUAGE")]
    pub language: String,
}

impl From<Application> for AppDisplay {
    fn from(app: Application) -> Self {
        Self {
            id: app.id,
            label: app.label.unwrap_or_default(),
            language: app.language.unwrap_or_default(),
        }
    }
}

/// Vulnerability display model.
///
/// Records are vendor-shaped, so the table shows the ID and a compact
/// rendering of the remaining fields.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct VulnDisplay {
    #[tabled(rename = "VULN ID")]
    pub id: String,

    #[tabled(rename = "SUMMARY")]
    pub summary: String,
}

impl From<Vulnerability> for VulnDisplay {
    fn from(vuln: Vulnerability) -> Self {
        let id = vuln.id().unwrap_or_else(|| "-".to_string());

        let mut rest = vuln.0;
        if let Some(obj) = rest.as_object_mut() {
            obj.remove("id");
        }

        Self {
            id,
            summary: truncate(&rest.to_string(), SUMMARY_WIDTH),
        }
    }
}

/// One row of a batch operation report
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ReportDisplay {
    #[tabled(rename = "TARGET")]
    pub target: String,

    #[tabled(rename = "RESULT")]
    pub result: String,

    #[tabled(rename = "DETAIL")]
    pub detail: String,
}

impl From<&ItemReport> for ReportDisplay {
    fn from(report: &ItemReport) -> Self {
        Self {
            target: report.target.clone(),
            result: report.outcome.label().to_string(),
            detail: report.outcome.detail(),
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_app_display_from_application() {
        let app: Application =
            serde_json::from_value(json!({"id": 12, "label": "p/r", "language": "Java"})).unwrap();

        let display = AppDisplay::from(app);

        assert_eq!(display.id, "12");
        assert_eq!(display.label, "p/r");
        assert_eq!(display.language, "Java");
    }

    #[test]
    fn test_app_display_missing_fields() {
        let display = AppDisplay::from(Application::from_id("3"));
        assert_eq!(display.label, "");
        assert_eq!(display.language, "");
    }

    #[test]
    fn test_vuln_display_strips_id_from_summary() {
        let display = VulnDisplay::from(Vulnerability(json!({"id": 5, "class": "XSS"})));
        assert_eq!(display.id, "5");
        assert_eq!(display.summary, r#"{"class":"XSS"}"#);
    }

    #[test]
    fn test_vuln_display_truncates_long_summary() {
        let long = "x".repeat(200);
        let display = VulnDisplay::from(Vulnerability(json!({ "detail": long })));
        assert_eq!(display.id, "-");
        assert_eq!(display.summary.chars().count(), SUMMARY_WIDTH);
        assert!(display.summary.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("short", 8), "short");
    }
}

//! Mock Sentinel API client for testing
//!
//! Provides an in-memory implementation of the API traits so batch logic can
//! be tested without HTTP.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{ApplicationApi, ListingApi};
use super::models::{
    Application, CreateApplicationRequest, ExclusionUpdate, ScanSchedule, Vulnerability,
};
use crate::error::{ApiError, Result};

/// A recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetResources,
    ListApplications,
    ListVulnerabilities(String),
    SetExclusions {
        app_id: String,
        exclude_directories: String,
    },
    StartFullScan(String),
    ScheduleScan(String),
    CreateApplication(String),
}

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockSentinelClient::new()
///     .with_error_for("42", ApiError::Forbidden("already running".into()));
///
/// let reports = run_full_scans(&mock, &apps).await;
/// assert_eq!(mock.calls().await.len(), apps.len());
/// ```
#[derive(Default)]
pub struct MockSentinelClient {
    /// Applications returned from list_applications
    apps: Vec<Application>,
    /// Vulnerabilities per application ID
    vulns: HashMap<String, Vec<Vulnerability>>,
    /// Errors keyed by app ID (or label for creation), consumed on first use
    errors: Arc<Mutex<HashMap<String, ApiError>>>,
    /// Every call, in the order it was made
    calls: Arc<Mutex<Vec<Call>>>,
    /// Bodies passed to create_application
    created: Arc<Mutex<Vec<CreateApplicationRequest>>>,
}

impl MockSentinelClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_apps(mut self, apps: Vec<Application>) -> Self {
        self.apps = apps;
        self
    }

    pub fn with_vulns(mut self, app_id: &str, vulns: Vec<Vulnerability>) -> Self {
        self.vulns.insert(app_id.to_string(), vulns);
        self
    }

    /// Fail the next call that targets `key` (an app ID, or a label for creation)
    pub fn with_error_for(self, key: &str, error: ApiError) -> Self {
        self.errors
            .try_lock()
            .expect("mock not shared yet")
            .insert(key.to_string(), error);
        self
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn created(&self) -> Vec<CreateApplicationRequest> {
        self.created.lock().await.clone()
    }

    async fn record(&self, call: Call, key: &str) -> Result<()> {
        self.calls.lock().await.push(call);
        match self.errors.lock().await.remove(key) {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ListingApi for MockSentinelClient {
    async fn get_resources(&self) -> Result<serde_json::Value> {
        self.record(Call::GetResources, "").await?;
        Ok(serde_json::json!({ "application": "/api/application" }))
    }

    async fn list_applications(&self) -> Result<Vec<Application>> {
        self.record(Call::ListApplications, "").await?;
        Ok(self.apps.clone())
    }

    async fn list_vulnerabilities(&self, app_id: &str) -> Result<Vec<Vulnerability>> {
        self.record(Call::ListVulnerabilities(app_id.to_string()), app_id)
            .await?;
        Ok(self.vulns.get(app_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ApplicationApi for MockSentinelClient {
    async fn create_application(&self, request: &CreateApplicationRequest) -> Result<()> {
        self.created.lock().await.push(request.clone());
        self.record(Call::CreateApplication(request.label.clone()), &request.label)
            .await
    }

    async fn set_exclusions(&self, app_id: &str, update: &ExclusionUpdate) -> Result<()> {
        let call = Call::SetExclusions {
            app_id: app_id.to_string(),
            exclude_directories: update.engine_conf.exclude_directories.clone(),
        };
        self.record(call, app_id).await
    }

    async fn start_full_scan(&self, app_id: &str) -> Result<()> {
        self.record(Call::StartFullScan(app_id.to_string()), app_id)
            .await
    }

    async fn schedule_scan(&self, app_id: &str, _schedule: &ScanSchedule) -> Result<()> {
        self.record(Call::ScheduleScan(app_id.to_string()), app_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_returns_configured_data() {
        let app: Application = serde_json::from_value(json!({"id": 1})).unwrap();
        let mock = MockSentinelClient::new()
            .with_apps(vec![app])
            .with_vulns("1", vec![Vulnerability(json!({"id": 77}))]);

        assert_eq!(mock.list_applications().await.unwrap().len(), 1);
        assert_eq!(mock.list_vulnerabilities("1").await.unwrap().len(), 1);
        assert!(mock.list_vulnerabilities("2").await.unwrap().is_empty());
        assert!(mock.get_resources().await.is_ok());
        assert_eq!(mock.calls().await.len(), 4);
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockSentinelClient::new()
            .with_error_for("1", ApiError::Forbidden("no".to_string()));

        assert!(matches!(
            mock.start_full_scan("1").await,
            Err(Error::Api(ApiError::Forbidden(_)))
        ));
        assert!(mock.start_full_scan("1").await.is_ok());
    }
}

//! Listing API trait for read operations

use async_trait::async_trait;

use crate::client::models::{Application, Vulnerability};
use crate::error::Result;

/// Read operations for the Sentinel API
///
/// Collection endpoints are walked page by page; the returned vectors hold
/// every item in the order the pages were fetched.
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// Fetch the API root resources document
    async fn get_resources(&self) -> Result<serde_json::Value>;

    /// List every application visible to the API key
    async fn list_applications(&self) -> Result<Vec<Application>>;

    /// List every vulnerability recorded against an application
    async fn list_vulnerabilities(&self, app_id: &str) -> Result<Vec<Vulnerability>>;
}

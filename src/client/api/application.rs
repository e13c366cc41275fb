//! Application API trait for write operations
//!
//! Each method is a single request/response round trip. None of them retry;
//! conflicts and refusals come back as `ApiError::Conflict` and
//! `ApiError::Forbidden` so callers can tell them apart from real failures.

use async_trait::async_trait;

use crate::client::models::{CreateApplicationRequest, ExclusionUpdate, ScanSchedule};
use crate::error::Result;

/// Per-application write operations for the Sentinel API
#[async_trait]
pub trait ApplicationApi: Send + Sync {
    /// Create an application bound to a source repository and start its prescan.
    ///
    /// Not idempotent: the vendor answers 409 when the label already exists.
    async fn create_application(&self, request: &CreateApplicationRequest) -> Result<()>;

    /// Replace the application's scanner exclusion directories
    async fn set_exclusions(&self, app_id: &str, update: &ExclusionUpdate) -> Result<()>;

    /// Trigger a full scan (403 when one is already running)
    async fn start_full_scan(&self, app_id: &str) -> Result<()>;

    /// Create a recurring scan schedule (403 when one already exists)
    async fn schedule_scan(&self, app_id: &str, schedule: &ScanSchedule) -> Result<()>;
}

//! Multi-item operations over applications and repositories
//!
//! Every item in the input is processed, whatever happened to the items
//! before it. Each one ends up in an [`ItemReport`] that callers can inspect,
//! and each outcome is logged as it lands.
//!
//! Exclusions are sent concurrently. Scans, schedules and application
//! creation run one item at a time so vendor-side ordering stays predictable.

use futures::future::join_all;
use log::{Level, log};

use super::SentinelApi;
use super::models::{
    ApplianceRef, Application, Blacklist, Codebase, CreateApplicationRequest,
    DEFAULT_APPLIANCE_ID, DEFAULT_INITIAL_SCAN, DEFAULT_LANGUAGE, ExclusionUpdate, RepoDescriptor,
    ScanSchedule, ScmCredentials, UrlRewrite,
};
use crate::error::{ApiError, Error, Result};

/// How a single item of a batch ended
#[derive(Debug)]
pub enum Outcome {
    Done,
    /// HTTP 409: already created or configured
    AlreadyExists(String),
    /// HTTP 403: refused, e.g. scan running or schedule present
    Forbidden(String),
    /// Not sent at all
    Skipped(String),
    Failed(Error),
}

impl Outcome {
    fn from_result(result: Result<()>) -> Self {
        match result {
            Ok(()) => Outcome::Done,
            Err(Error::Api(ApiError::Conflict(msg))) => Outcome::AlreadyExists(msg),
            Err(Error::Api(ApiError::Forbidden(msg))) => Outcome::Forbidden(msg),
            Err(err) => Outcome::Failed(err),
        }
    }

    /// Short result label for reports
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Done => "done",
            Outcome::AlreadyExists(_) => "already exists",
            Outcome::Forbidden(_) => "forbidden",
            Outcome::Skipped(_) => "skipped",
            Outcome::Failed(_) => "failed",
        }
    }

    /// Vendor message or error text, empty on success
    pub fn detail(&self) -> String {
        match self {
            Outcome::Done => String::new(),
            Outcome::AlreadyExists(msg) | Outcome::Forbidden(msg) | Outcome::Skipped(msg) => {
                msg.clone()
            }
            Outcome::Failed(err) => err.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// Log level an item with this outcome is reported at
    pub fn level(&self) -> Level {
        match self {
            Outcome::Done => Level::Info,
            Outcome::AlreadyExists(_) | Outcome::Forbidden(_) | Outcome::Skipped(_) => Level::Warn,
            Outcome::Failed(_) => Level::Error,
        }
    }
}

/// Result of one item of a batch operation
#[derive(Debug)]
pub struct ItemReport {
    /// Application or repository the report is about
    pub target: String,
    pub outcome: Outcome,
}

impl ItemReport {
    fn new(target: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            target: target.into(),
            outcome,
        }
    }

    fn log(&self, action: &str) {
        let level = self.outcome.level();
        match &self.outcome {
            Outcome::Done => log!(level, "{}: {} succeeded", self.target, action),
            Outcome::AlreadyExists(_) => {
                log!(level, "{}: already exists, skipping {}", self.target, action)
            }
            Outcome::Forbidden(msg) => {
                log!(level, "{}: {} not permitted: {}", self.target, action, msg)
            }
            Outcome::Skipped(reason) => {
                log!(level, "{}: {}, skipping {}", self.target, reason, action)
            }
            Outcome::Failed(err) => log!(level, "{}: could not {}: {}", self.target, action, err),
        }
    }
}

/// Count of reports that ended in a generic failure
pub fn failure_count(reports: &[ItemReport]) -> usize {
    reports.iter().filter(|r| r.outcome.is_failure()).count()
}

fn describe(app: &Application) -> String {
    match &app.label {
        Some(label) => format!("{} ({})", label, app.id),
        None => app.id.clone(),
    }
}

/// Set exclusion directories on every application, all requests in flight at once.
///
/// Reports come back in input order.
pub async fn add_exclusions<A>(
    api: &A,
    apps: &[Application],
    update: &ExclusionUpdate,
) -> Vec<ItemReport>
where
    A: SentinelApi + ?Sized,
{
    let requests = apps.iter().map(|app| async move {
        let result = api.set_exclusions(&app.id, update).await;
        let report = ItemReport::new(describe(app), Outcome::from_result(result));
        report.log("add exclusions");
        report
    });

    join_all(requests).await
}

/// Trigger a full scan on every application, one at a time
pub async fn run_full_scans<A>(api: &A, apps: &[Application]) -> Vec<ItemReport>
where
    A: SentinelApi + ?Sized,
{
    let mut reports = Vec::with_capacity(apps.len());
    for app in apps {
        let result = api.start_full_scan(&app.id).await;
        let report = ItemReport::new(describe(app), Outcome::from_result(result));
        report.log("start full scan");
        reports.push(report);
    }
    reports
}

/// Create the same recurring schedule on every application, one at a time
pub async fn schedule_full_scans<A>(
    api: &A,
    apps: &[Application],
    schedule: &ScanSchedule,
) -> Vec<ItemReport>
where
    A: SentinelApi + ?Sized,
{
    let mut reports = Vec::with_capacity(apps.len());
    for app in apps {
        let result = api.schedule_scan(&app.id, schedule).await;
        let report = ItemReport::new(describe(app), Outcome::from_result(result));
        report.log("schedule full scan");
        reports.push(report);
    }
    reports
}

/// Settings shared by every application created from a repository listing
#[derive(Debug, Clone)]
pub struct CreateSettings {
    pub credentials: ScmCredentials,
    pub blacklist: Blacklist,
    pub rewrite: UrlRewrite,
    pub appliance_id: String,
}

impl CreateSettings {
    pub fn new(credentials: ScmCredentials) -> Self {
        Self {
            credentials,
            blacklist: Blacklist::default(),
            rewrite: UrlRewrite::default(),
            appliance_id: DEFAULT_APPLIANCE_ID.to_string(),
        }
    }

    /// Request body for `repo`; `None` when the listing has no clone URL
    pub fn request_for(&self, repo: &RepoDescriptor) -> Option<CreateApplicationRequest> {
        let label = repo.label();
        let repository_uri = self.rewrite.apply(repo.clone_url()?);

        Some(CreateApplicationRequest {
            label: label.clone(),
            appliance: ApplianceRef {
                id: self.appliance_id.clone(),
            },
            language: DEFAULT_LANGUAGE.to_string(),
            app_default_scan: DEFAULT_INITIAL_SCAN.to_string(),
            codebases: vec![Codebase {
                label,
                repository_uri,
                repository_type: "git".to_string(),
                repository_revision: "HEAD".to_string(),
                auth_type: "password".to_string(),
                username: self.credentials.username.clone(),
                password: self.credentials.password.clone(),
            }],
        })
    }
}

/// Create one application per repository that is not blacklisted, one at a time
pub async fn create_applications<A>(
    api: &A,
    repos: &[RepoDescriptor],
    settings: &CreateSettings,
) -> Vec<ItemReport>
where
    A: SentinelApi + ?Sized,
{
    let mut reports = Vec::with_capacity(repos.len());
    for repo in repos {
        let outcome = if let Some(reason) = settings.blacklist.reason(repo) {
            Outcome::Skipped(reason.to_string())
        } else if let Some(request) = settings.request_for(repo) {
            Outcome::from_result(api.create_application(&request).await)
        } else {
            Outcome::Skipped("no clone URL in listing".to_string())
        };

        let report = ItemReport::new(repo.label(), outcome);
        report.log("create application");
        reports.push(report);
    }
    reports
}

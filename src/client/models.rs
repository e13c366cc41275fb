//! Sentinel request and response models

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Directories the scanner skips by default (test code)
pub const DEFAULT_EXCLUDE_DIRECTORIES: &str = "/test/,test.js,test";

/// Appliance new applications are bound to
pub const DEFAULT_APPLIANCE_ID: &str = "2131";

/// Language hint that lets Sentinel detect the codebase language
pub const DEFAULT_LANGUAGE: &str = "Discover";

/// Scan run right after an application is created
pub const DEFAULT_INITIAL_SCAN: &str = "prescan";

/// Host alias rewritten in repository clone URLs before submission
pub const DEFAULT_REWRITE_FROM: &str = "lifeomic";
pub const DEFAULT_REWRITE_TO: &str = "lifeomic-bitbucket";

// ============================================================================
// Applications & vulnerabilities
// ============================================================================

/// Application resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    /// Vendor-assigned ID (sent as a number or a string)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Human label, `project/repo` for applications created by this tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appliance: Option<ApplianceRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_conf: Option<EngineConf>,
}

impl Application {
    /// Application known only by its ID
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            language: None,
            appliance: None,
            engine_conf: None,
        }
    }
}

/// Vulnerability record. The shape is vendor-defined and only passed through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vulnerability(pub serde_json::Value);

impl Vulnerability {
    /// The record's `id` field rendered as a string, if any
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Reference to a Sentinel appliance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplianceRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

/// Scanner engine configuration (not part of the public API docs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConf {
    pub exclude_directories: String,
}

// ============================================================================
// Request bodies
// ============================================================================

/// Body for `PUT /application/{id}` that sets exclusion directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionUpdate {
    pub engine_conf: EngineConf,
}

impl ExclusionUpdate {
    pub fn new(exclude_directories: impl Into<String>) -> Self {
        Self {
            engine_conf: EngineConf {
                exclude_directories: exclude_directories.into(),
            },
        }
    }
}

impl Default for ExclusionUpdate {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDE_DIRECTORIES)
    }
}

/// Body for `PUT /application/{id}/full_scan`
#[derive(Debug, Clone, Serialize)]
pub struct FullScanRequest {
    pub app_scan: &'static str,
}

impl Default for FullScanRequest {
    fn default() -> Self {
        Self {
            app_scan: "full_scan",
        }
    }
}

/// Body for `PUT /application/{id}/scan_schedule`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSchedule {
    pub timezone: String,
    pub name: String,
    pub specs: Vec<ScheduleSpec>,
}

/// One recurrence rule of a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

impl ScanSchedule {
    /// A daily schedule at `time` (`HH:MM:SS`) in `timezone`
    pub fn daily(timezone: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            timezone: timezone.into(),
            name: "scan_daily".to_string(),
            specs: vec![ScheduleSpec {
                kind: "daily".to_string(),
                time: time.into(),
            }],
        }
    }
}

impl Default for ScanSchedule {
    fn default() -> Self {
        Self::daily("America/New_York", "00:18:00")
    }
}

/// Body for `POST /create_application_and_scan`
#[derive(Debug, Clone, Serialize)]
pub struct CreateApplicationRequest {
    pub label: String,
    pub appliance: ApplianceRef,
    pub language: String,
    pub app_default_scan: String,
    pub codebases: Vec<Codebase>,
}

/// Source repository attached to a new application
#[derive(Debug, Clone, Serialize)]
pub struct Codebase {
    pub label: String,
    pub repository_uri: String,
    pub repository_type: String,
    pub repository_revision: String,
    pub auth_type: String,
    pub username: String,
    pub password: String,
}

// ============================================================================
// Repository listing input
// ============================================================================

/// A repository as listed by the source-control host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub name: String,
    pub project: ProjectRef,
    #[serde(default)]
    pub links: RepoLinks,
}

impl RepoDescriptor {
    /// First clone URL, if the listing has one
    pub fn clone_url(&self) -> Option<&str> {
        self.links.clone.first().map(|link| link.href.as_str())
    }

    /// `project/repo`
    pub fn label(&self) -> String {
        format!("{}/{}", self.project.name, self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoLinks {
    #[serde(default)]
    pub clone: Vec<CloneLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneLink {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A repository listing: either a bare array or a `{ "values": [...] }` page
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RepoListing {
    Paged { values: Vec<RepoDescriptor> },
    Flat(Vec<RepoDescriptor>),
}

impl RepoListing {
    pub fn into_repos(self) -> Vec<RepoDescriptor> {
        match self {
            RepoListing::Paged { values } => values,
            RepoListing::Flat(repos) => repos,
        }
    }
}

// ============================================================================
// Application creation settings
// ============================================================================

/// Source-control credentials Sentinel uses to clone a codebase
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for ScmCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScmCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Project and repository names never turned into applications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blacklist {
    #[serde(default)]
    pub projects: BTreeSet<String>,
    #[serde(default)]
    pub repos: BTreeSet<String>,
}

impl Blacklist {
    /// Add more names on top of the existing sets
    pub fn extend(
        &mut self,
        projects: impl IntoIterator<Item = String>,
        repos: impl IntoIterator<Item = String>,
    ) {
        self.projects.extend(projects);
        self.repos.extend(repos);
    }

    /// Why `repo` is blocked, if it is
    pub fn reason(&self, repo: &RepoDescriptor) -> Option<&'static str> {
        if self.projects.contains(&repo.project.name) {
            Some("project is blacklisted")
        } else if self.repos.contains(&repo.name) {
            Some("repository is blacklisted")
        } else {
            None
        }
    }
}

/// Host alias substitution applied to clone URLs (first occurrence only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRewrite {
    pub from: String,
    pub to: String,
}

impl UrlRewrite {
    pub fn apply(&self, url: &str) -> String {
        if self.from.is_empty() {
            return url.to_string();
        }
        url.replacen(&self.from, &self.to, 1)
    }
}

impl Default for UrlRewrite {
    fn default() -> Self {
        Self {
            from: DEFAULT_REWRITE_FROM.to_string(),
            to: DEFAULT_REWRITE_TO.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_application_numeric_and_string_ids() {
        let app: Application = serde_json::from_value(json!({"id": 123, "label": "p/r"})).unwrap();
        assert_eq!(app.id, "123");
        assert_eq!(app.label.as_deref(), Some("p/r"));

        let app: Application = serde_json::from_value(json!({"id": "abc"})).unwrap();
        assert_eq!(app.id, "abc");
        assert!(app.label.is_none());
    }

    #[test]
    fn test_application_with_config_objects() {
        let app: Application = serde_json::from_value(json!({
            "id": 7,
            "appliance": {"id": 2131},
            "engine_conf": {"exclude_directories": "/test/"},
            "unknown_field": true
        }))
        .unwrap();
        assert_eq!(app.appliance.unwrap().id, "2131");
        assert_eq!(app.engine_conf.unwrap().exclude_directories, "/test/");
    }

    #[test]
    fn test_exclusion_update_body() {
        let body = serde_json::to_value(ExclusionUpdate::default()).unwrap();
        assert_eq!(
            body,
            json!({"engine_conf": {"exclude_directories": "/test/,test.js,test"}})
        );
    }

    #[test]
    fn test_full_scan_body() {
        let body = serde_json::to_value(FullScanRequest::default()).unwrap();
        assert_eq!(body, json!({"app_scan": "full_scan"}));
    }

    #[test]
    fn test_default_schedule_body() {
        let body = serde_json::to_value(ScanSchedule::default()).unwrap();
        assert_eq!(
            body,
            json!({
                "timezone": "America/New_York",
                "name": "scan_daily",
                "specs": [{"type": "daily", "time": "00:18:00"}]
            })
        );
    }

    #[test]
    fn test_vulnerability_id() {
        let vuln = Vulnerability(json!({"id": 991, "class": "XSS"}));
        assert_eq!(vuln.id(), Some("991".to_string()));
        assert_eq!(Vulnerability(json!({"class": "XSS"})).id(), None);
    }

    #[test]
    fn test_repo_descriptor() {
        let repo: RepoDescriptor = serde_json::from_value(json!({
            "name": "r1",
            "project": {"name": "p1"},
            "links": {"clone": [{"href": "https://lifeomic/r1.git", "name": "http"}]}
        }))
        .unwrap();
        assert_eq!(repo.label(), "p1/r1");
        assert_eq!(repo.clone_url(), Some("https://lifeomic/r1.git"));
    }

    #[test]
    fn test_blacklist_reason() {
        let repo: RepoDescriptor =
            serde_json::from_value(json!({"name": "r1", "project": {"name": "p1"}})).unwrap();

        let mut blacklist = Blacklist::default();
        assert_eq!(blacklist.reason(&repo), None);

        blacklist.extend(vec![], vec!["r1".to_string()]);
        assert_eq!(blacklist.reason(&repo), Some("repository is blacklisted"));

        blacklist.extend(vec!["p1".to_string()], vec![]);
        assert_eq!(blacklist.reason(&repo), Some("project is blacklisted"));
    }

    #[test]
    fn test_url_rewrite_first_occurrence() {
        let rewrite = UrlRewrite::default();
        assert_eq!(
            rewrite.apply("https://git@lifeomic/scm/p/lifeomic.git"),
            "https://git@lifeomic-bitbucket/scm/p/lifeomic.git"
        );
        assert_eq!(rewrite.apply("https://github.com/x.git"), "https://github.com/x.git");

        let noop = UrlRewrite { from: String::new(), to: "x".to_string() };
        assert_eq!(noop.apply("https://a/b"), "https://a/b");
    }

    #[test]
    fn test_scm_credentials_debug_redacts_password() {
        let creds = ScmCredentials {
            username: "svc".to_string(),
            password: "hunter2".to_string(),
        };
        let dbg = format!("{:?}", creds);
        assert!(dbg.contains("svc"));
        assert!(!dbg.contains("hunter2"));
    }

    #[test]
    fn test_repo_listing_shapes() {
        let flat: RepoListing = serde_json::from_value(json!([
            {"name": "a", "project": {"name": "p"}}
        ]))
        .unwrap();
        assert_eq!(flat.into_repos().len(), 1);

        let paged: RepoListing = serde_json::from_value(json!({
            "values": [
                {"name": "a", "project": {"name": "p"}},
                {"name": "b", "project": {"name": "p"}}
            ],
            "isLastPage": true
        }))
        .unwrap();
        let repos = paged.into_repos();
        assert_eq!(repos.len(), 2);
        assert!(repos[0].clone_url().is_none());
    }
}

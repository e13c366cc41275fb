//! Authenticated request URL construction
//!
//! Every Sentinel request carries the API key as the first query parameter.
//! Caller parameters follow in the order they were added and are passed
//! through untouched: the vendor expects some values (exclusion lists,
//! `page:offset`) with literal commas and colons.

use std::fmt;

/// Collection segment used when no base is chosen
pub const DEFAULT_RESOURCE: &str = "application";

/// Query parameter key that drives collection paging
pub const PAGE_OFFSET_PARAM: &str = "page:offset";

/// Which resource collection a URL is rooted at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Resource {
    /// `/application`
    #[default]
    Application,
    /// Any other named collection, e.g. `/source_vuln`
    Named(String),
    /// The API root (`/`), used for the resources document
    Root,
}

/// Path and query options for a single request URL.
///
/// # Example
/// ```ignore
/// let opts = UrlOptions::new()
///     .id("123")
///     .segment("vuln")
///     .param("display_all=1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOptions {
    pub resource: Resource,
    pub resource_id: Option<String>,
    pub extra_segment: Option<String>,
    pub query: Vec<String>,
}

impl UrlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a named collection instead of `/application`.
    pub fn base(mut self, name: impl Into<String>) -> Self {
        self.resource = Resource::Named(name.into());
        self
    }

    /// Select the API root.
    pub fn root(mut self) -> Self {
        self.resource = Resource::Root;
        self
    }

    /// Append a resource identifier path segment.
    pub fn id(mut self, id: impl fmt::Display) -> Self {
        self.resource_id = Some(id.to_string());
        self
    }

    /// Append a trailing path segment after the identifier.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.extra_segment = Some(segment.into());
        self
    }

    /// Append a pre-encoded `key=value` query parameter.
    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.query.push(param.into());
        self
    }

    /// Replace any existing `page:offset` parameter with `offset`.
    ///
    /// Other parameters keep their relative order; the offset goes last.
    pub fn with_offset(&self, offset: u64) -> Self {
        let prefix = format!("{}=", PAGE_OFFSET_PARAM);
        let mut opts = self.clone();
        opts.query.retain(|p| !p.starts_with(&prefix));
        opts.query.push(format!("{}{}", prefix, offset));
        opts
    }
}

/// Builds URLs against a fixed base URL and API key.
#[derive(Clone)]
pub struct UrlBuilder {
    base_url: String,
    api_key: String,
}

impl fmt::Debug for UrlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl UrlBuilder {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base_url}{path}?key={api_key}[&param...]`.
    pub fn build(&self, opts: &UrlOptions) -> String {
        self.assemble(opts, &self.api_key)
    }

    /// Same URL with the key masked, for log lines.
    pub fn redacted(&self, opts: &UrlOptions) -> String {
        self.assemble(opts, "***")
    }

    fn assemble(&self, opts: &UrlOptions, key: &str) -> String {
        let mut url = self.path(opts);
        url.push_str("?key=");
        url.push_str(key);

        for param in &opts.query {
            url.push('&');
            url.push_str(param);
        }

        url
    }

    fn path(&self, opts: &UrlOptions) -> String {
        let mut url = self.base_url.clone();

        match &opts.resource {
            Resource::Application => push_segment(&mut url, DEFAULT_RESOURCE),
            Resource::Named(name) => push_segment(&mut url, name),
            Resource::Root => url.push('/'),
        }

        if let Some(id) = opts.resource_id.as_deref().filter(|s| !s.is_empty()) {
            push_segment(&mut url, id);
        }
        if let Some(segment) = opts.extra_segment.as_deref().filter(|s| !s.is_empty()) {
            push_segment(&mut url, segment);
        }

        url
    }
}

fn push_segment(url: &mut String, segment: &str) {
    url.push('/');
    url.push_str(segment);
}

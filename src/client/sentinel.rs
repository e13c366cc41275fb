//! Sentinel API client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::{ApplicationApi, ListingApi};
use super::models::{
    Application, CreateApplicationRequest, ExclusionUpdate, FullScanRequest, ScanSchedule,
    Vulnerability,
};
use super::pagination::{CollectionPage, fetch_all};
use super::url::{UrlBuilder, UrlOptions};
use crate::error::{ApiError, ConfigError, Result};

/// Sentinel API base URL
pub const API_BASE_URL: &str = "https://sentinel.whitehatsec.com/api";

/// Transport timeout for a single request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sentinel API client
///
/// Holds only the HTTP connection pool and the immutable base URL and key.
pub struct SentinelClient {
    http: HttpClient,
    urls: UrlBuilder,
}

impl SentinelClient {
    /// Create a client against the public Sentinel API.
    ///
    /// Fails with `ConfigError::MissingApiKey` when the key is empty.
    #[cfg(test)]
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_host(api_key, None)
    }

    /// Create a client against a custom API host (testing, proxies)
    pub fn with_host(api_key: &str, api_host: Option<String>) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey.into());
        }

        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = api_host.unwrap_or_else(|| API_BASE_URL.to_string());

        Ok(Self {
            http,
            urls: UrlBuilder::new(base_url, api_key),
        })
    }

    /// URL builder bound to this client's base URL and key
    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Send a request and map non-2xx statuses to `ApiError`
    async fn send<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        opts: &UrlOptions,
        body: Option<&B>,
    ) -> Result<Response> {
        debug!("{} {}", method, self.urls.redacted(opts));

        let mut request = self.http.request(method, self.urls.build(opts));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = if text.trim().is_empty() {
            status.to_string()
        } else {
            text
        };
        debug!("Request failed with {}: {}", status, message);

        let err = match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::CONFLICT => ApiError::Conflict(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(message)
            }
            status if status.is_server_error() => ApiError::ServerError(message),
            status => ApiError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            },
        };
        Err(err.into())
    }

    /// GET and decode a JSON body
    async fn get_json<T: DeserializeOwned>(&self, opts: &UrlOptions) -> Result<T> {
        let response = self.send::<()>(Method::GET, opts, None).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }

    /// Send a JSON body; the response body, possibly empty, is discarded
    async fn write<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        opts: &UrlOptions,
        body: &B,
    ) -> Result<()> {
        self.send(method, opts, Some(body)).await?;
        Ok(())
    }

    /// Walk a collection endpoint from offset 0
    async fn get_all<T: DeserializeOwned>(&self, opts: UrlOptions) -> Result<Vec<T>> {
        fetch_all(|offset| {
            let page_opts = opts.with_offset(offset);
            async move { self.get_json::<CollectionPage<T>>(&page_opts).await }
        })
        .await
    }
}

#[async_trait]
impl ListingApi for SentinelClient {
    async fn get_resources(&self) -> Result<serde_json::Value> {
        self.get_json(&UrlOptions::new().root()).await
    }

    async fn list_applications(&self) -> Result<Vec<Application>> {
        self.get_all(UrlOptions::new().param("display_all=1")).await
    }

    async fn list_vulnerabilities(&self, app_id: &str) -> Result<Vec<Vulnerability>> {
        self.get_all(UrlOptions::new().id(app_id).segment("vuln"))
            .await
    }
}

#[async_trait]
impl ApplicationApi for SentinelClient {
    async fn create_application(&self, request: &CreateApplicationRequest) -> Result<()> {
        let opts = UrlOptions::new().base("create_application_and_scan");
        self.write(Method::POST, &opts, request).await
    }

    async fn set_exclusions(&self, app_id: &str, update: &ExclusionUpdate) -> Result<()> {
        self.write(Method::PUT, &UrlOptions::new().id(app_id), update)
            .await
    }

    async fn start_full_scan(&self, app_id: &str) -> Result<()> {
        let opts = UrlOptions::new().id(app_id).segment("full_scan");
        self.write(Method::PUT, &opts, &FullScanRequest::default())
            .await
    }

    async fn schedule_scan(&self, app_id: &str, schedule: &ScanSchedule) -> Result<()> {
        let opts = UrlOptions::new()
            .id(app_id)
            .segment("scan_schedule")
            .param("format=json");
        self.write(Method::PUT, &opts, schedule).await
    }
}

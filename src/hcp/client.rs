//! TFE HTTP client for API interactions

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE,
};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::RwLock;
use std::time::Duration;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::client_config::ClientConfig;
use crate::hcp::jsonapi::{Document, ErrorDocument};
use crate::hcp::retry::RetryPolicy;
use crate::hcp::traits::{ApiListResponse, PaginatedResponse, ResourceList};

/// Version and rate limit information reported by the remote API
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteInfo {
    /// `TFP-API-Version`, e.g. "2.6"
    pub api_version: Option<String>,
    /// `X-TFE-Version` (Terraform Enterprise only)
    pub tfe_version: Option<String>,
    /// `TFP-AppName`
    pub app_name: Option<String>,
    /// `X-RateLimit-Limit`
    pub rate_limit: Option<f64>,
}

impl RemoteInfo {
    fn update_from(&mut self, headers: &HeaderMap) {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        if let Some(v) = read(api::HEADER_API_VERSION) {
            self.api_version = Some(v);
        }
        if let Some(v) = read(api::HEADER_TFE_VERSION) {
            self.tfe_version = Some(v);
        }
        if let Some(v) = read(api::HEADER_APP_NAME) {
            self.app_name = Some(v);
        }
        if let Some(v) = read(api::HEADER_RATE_LIMIT).and_then(|v| v.parse::<f64>().ok()) {
            self.rate_limit = Some(v);
        }
    }
}

/// TFE API client
///
/// Resource operations hang off service handles, e.g.
/// `client.workspaces().list("my-org", &opts)`.
pub struct TfeClient {
    client: Client,
    token: String,
    base_url: String,
    headers: HeaderMap,
    retry: RetryPolicy,
    remote: RwLock<RemoteInfo>,
}

impl TfeClient {
    /// Create a new TFE client with optimized connection settings
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.api_url()?;

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TfeError::Config(format!("invalid header name '{}': {}", name, e)))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                TfeError::Config(format!("invalid value for header '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            // Connection pool settings - reuse connections
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            // TCP keepalive to maintain connections
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        debug!("Created TFE client for {}", base_url);

        Ok(Self {
            client,
            token: config.token,
            base_url,
            headers,
            retry: config.retry,
            remote: RwLock::new(RemoteInfo::default()),
        })
    }

    /// Create a client configured from `TFE_ADDRESS` / `TFE_TOKEN` and friends
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// API root, e.g. `https://app.terraform.io/api/v2`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an API path (or pass through an absolute URL)
    pub(crate) fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Add standard headers to a request builder
    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, api::CONTENT_TYPE)
            .header(ACCEPT, api::CONTENT_TYPE)
            .headers(self.headers.clone())
    }

    /// GET a pre-signed URL (log archives) without the bearer token
    pub(crate) async fn fetch_url(&self, url: &str) -> Result<Response> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        check_response(response).await
    }

    /// Latest remote version information seen on any response
    pub fn remote_info(&self) -> RemoteInfo {
        self.remote
            .read()
            .map(|info| info.clone())
            .unwrap_or_default()
    }

    pub fn remote_api_version(&self) -> Option<String> {
        self.remote_info().api_version
    }

    pub fn remote_tfe_version(&self) -> Option<String> {
        self.remote_info().tfe_version
    }

    pub fn app_name(&self) -> Option<String> {
        self.remote_info().app_name
    }

    /// Requests-per-second limit advertised by the server
    pub fn rate_limit(&self) -> Option<f64> {
        self.remote_info().rate_limit
    }

    /// Whether the server is HCP Terraform rather than Terraform Enterprise
    ///
    /// `None` until a response has identified the server; call [`ping`](Self::ping)
    /// first to find out up front.
    pub fn is_cloud(&self) -> Option<bool> {
        let info = self.remote_info();
        match (info.app_name.as_deref(), info.tfe_version) {
            (Some(name), _) => Some(name == api::CLOUD_APP_NAME || name == "Terraform Cloud"),
            (None, Some(_)) => Some(false),
            (None, None) => None,
        }
    }

    /// Whether the server is Terraform Enterprise; `None` until known, as for [`is_cloud`](Self::is_cloud)
    pub fn is_enterprise(&self) -> Option<bool> {
        self.is_cloud().map(|cloud| !cloud)
    }

    fn record_remote_info(&self, headers: &HeaderMap) {
        if let Ok(mut info) = self.remote.write() {
            info.update_from(headers);
        }
    }

    /// Hit `/ping` to learn the remote API version
    pub async fn ping(&self) -> Result<RemoteInfo> {
        self.execute(Method::GET, "/ping", None).await?;
        Ok(self.remote_info())
    }

    /// Send a request, retrying per the client's `RetryPolicy`
    ///
    /// The body is buffered so every attempt sends identical bytes.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<Response> {
        let url = self.url(path);
        let mut attempt: u32 = 0;

        loop {
            let mut builder = self.with_headers(self.client.request(method.clone(), &url));
            if let Some(ref b) = body {
                builder = builder.body(b.clone());
            }

            debug!("{} {}", method, url);

            match builder.send().await {
                Ok(response) => {
                    self.record_remote_info(response.headers());
                    let status = response.status().as_u16();

                    if attempt < self.retry.max_retries && self.retry.should_retry_status(status)
                    {
                        attempt += 1;
                        let wait = self
                            .retry
                            .backoff(attempt, Some(status), Some(response.headers()));
                        warn!(
                            "{} {} returned {}, retrying in {:?} (attempt {}/{})",
                            method, url, status, wait, attempt, self.retry.max_retries
                        );
                        tokio::time::sleep(wait).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if attempt < self.retry.max_retries && self.retry.should_retry_error(&e) {
                        attempt += 1;
                        let wait = self.retry.backoff(attempt, None, None);
                        warn!(
                            "{} {} failed: {}, retrying in {:?} (attempt {}/{})",
                            method, url, e, wait, attempt, self.retry.max_retries
                        );
                        tokio::time::sleep(wait).await;
                        continue;
                    }

                    return Err(e.into());
                }
            }
        }
    }

    /// Send with retries and turn non-success statuses into errors
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<Response> {
        let response = self.send(method, path, body).await?;
        check_response(response).await
    }

    fn encode<B: Serialize>(body: &B) -> Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(body)?))
    }

    async fn parse_data<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        let doc: Document<T> = serde_json::from_slice(&bytes)?;
        Ok(doc.data)
    }

    /// GET a single resource and return its `data`
    pub(crate) async fn read_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(Method::GET, path, None).await?;
        Self::parse_data(response).await
    }

    /// GET a single resource, keeping `included`
    pub(crate) async fn read_document<T: DeserializeOwned>(&self, path: &str) -> Result<Document<T>> {
        let response = self.execute(Method::GET, path, None).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET one page of a collection
    pub(crate) async fn list_page<T: DeserializeOwned>(&self, path: &str) -> Result<ResourceList<T>> {
        let response = self.execute(Method::GET, path, None).await?;
        let bytes = response.bytes().await?;
        let list: ApiListResponse<T> = serde_json::from_slice(&bytes)?;
        Ok(list.into())
    }

    /// POST a JSON:API body and return the created resource
    pub(crate) async fn create_data<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let response = self
            .execute(Method::POST, path, Some(Self::encode(body)?))
            .await?;
        Self::parse_data(response).await
    }

    /// PATCH a JSON:API body and return the updated resource
    pub(crate) async fn update_data<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let response = self
            .execute(Method::PATCH, path, Some(Self::encode(body)?))
            .await?;
        Self::parse_data(response).await
    }

    /// POST without a body and return the resource in the response
    pub(crate) async fn post_for_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(Method::POST, path, None).await?;
        Self::parse_data(response).await
    }

    /// POST an action with no body, ignoring the response body
    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        self.execute(Method::POST, path, None).await?;
        Ok(())
    }

    /// POST a body, ignoring the response body
    pub(crate) async fn post_body<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.execute(Method::POST, path, Some(Self::encode(body)?))
            .await?;
        Ok(())
    }

    /// PATCH a body, ignoring the response body
    pub(crate) async fn patch_body<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.execute(Method::PATCH, path, Some(Self::encode(body)?))
            .await?;
        Ok(())
    }

    pub(crate) async fn delete_path(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// DELETE with a relationship body (remove-from-collection endpoints)
    pub(crate) async fn delete_with_body<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.execute(Method::DELETE, path, Some(Self::encode(body)?))
            .await?;
        Ok(())
    }

    /// GET raw bytes (downloads); redirects are followed
    pub(crate) async fn get_bytes(&self, path_or_url: &str) -> Result<Bytes> {
        let response = self.execute(Method::GET, path_or_url, None).await?;
        Ok(response.bytes().await?)
    }

    /// PUT raw bytes to a pre-signed upload URL
    ///
    /// Upload URLs carry their own authorization, so the bearer token is not sent.
    pub(crate) async fn upload_bytes(&self, upload_url: &str, data: Bytes) -> Result<()> {
        debug!("Uploading {} bytes to {}", data.len(), upload_url);
        let response = self
            .client
            .put(upload_url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await?;
        check_response(response).await?;
        Ok(())
    }

    /// PUT raw bytes to an API path (policy uploads), authenticated
    pub(crate) async fn put_octets(&self, path: &str, data: Bytes) -> Result<()> {
        let url = self.url(path);
        debug!("PUT {} ({} bytes)", url, data.len());
        let response = self
            .client
            .put(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, "application/octet-stream")
            .headers(self.headers.clone())
            .body(data)
            .send()
            .await?;
        self.record_remote_info(response.headers());
        check_response(response).await?;
        Ok(())
    }

    /// Fetch all pages from a paginated API endpoint with parallel fetching
    ///
    /// This method fetches page 1 first to learn total_pages, then fetches
    /// remaining pages in parallel (with concurrency limit).
    ///
    /// # Arguments
    /// * `path` - API path (e.g., "/organizations/my-org/teams" or with query "...?q=foo")
    /// * `error_context` - Context for error messages (e.g., "teams for organization 'my-org'")
    pub async fn fetch_all_pages<T, R>(&self, path: &str, error_context: &str) -> Result<Vec<T>>
    where
        T: Send,
        R: DeserializeOwned + PaginatedResponse<T> + Send,
    {
        let separator = if path.contains('?') { "&" } else { "?" };

        let page_path = |page_num: u32| {
            format!(
                "{}{}page[size]={}&page[number]={}",
                path,
                separator,
                api::DEFAULT_PAGE_SIZE,
                page_num
            )
        };

        let (_, first_items, meta) = self
            .fetch_single_page::<T, R>(page_path(1), 1, error_context)
            .await?;
        let mut all_items = first_items;

        let (total_pages, total_count) = match meta.and_then(|m| m.pagination) {
            Some(p) => (p.total_pages, p.total_count),
            None => return Ok(all_items),
        };

        debug!("Page 1/{}, total items: {}", total_pages, total_count);

        if total_pages <= 1 {
            return Ok(all_items);
        }

        debug!(
            "Fetching {} remaining pages in parallel (max {} concurrent)",
            total_pages - 1,
            api::MAX_CONCURRENT_PAGE_REQUESTS
        );

        let page_futures = (2..=total_pages)
            .map(|page_num| self.fetch_single_page::<T, R>(page_path(page_num), page_num, error_context));

        let results: Vec<Result<(u32, Vec<T>, Option<crate::hcp::PaginationMeta>)>> =
            stream::iter(page_futures)
                .buffer_unordered(api::MAX_CONCURRENT_PAGE_REQUESTS)
                .collect()
                .await;

        let mut page_results: Vec<(u32, Vec<T>)> = Vec::with_capacity(results.len());
        for result in results {
            let (page_num, items, _) = result?;
            page_results.push((page_num, items));
        }

        // Keep page order stable regardless of completion order
        page_results.sort_by_key(|(page_num, _)| *page_num);

        for (_, items) in page_results {
            all_items.extend(items);
        }

        debug!(
            "Fetched {} total items for {}",
            all_items.len(),
            error_context
        );
        Ok(all_items)
    }

    async fn fetch_single_page<T, R>(
        &self,
        path: String,
        page_num: u32,
        error_context: &str,
    ) -> Result<(u32, Vec<T>, Option<crate::hcp::PaginationMeta>)>
    where
        R: DeserializeOwned + PaginatedResponse<T>,
    {
        let response = self
            .execute(Method::GET, &path, None)
            .await
            .map_err(|e| with_context(e, &format!("{} (page {})", error_context, page_num)))?;
        let bytes = response.bytes().await?;
        let resp: R = serde_json::from_slice(&bytes)?;
        let meta = resp.meta().cloned();
        let items = resp.into_data();

        debug!("Page {} returned {} items", page_num, items.len());
        Ok((page_num, items, meta))
    }
}

/// Map a response to an error unless it is 2xx/3xx
pub(crate) async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() || status.is_redirection() {
        return Ok(response);
    }

    match status.as_u16() {
        401 => Err(TfeError::Unauthorized),
        404 => Err(TfeError::NotFound),
        code => {
            let body = response.bytes().await.unwrap_or_default();
            let message = match ErrorDocument::parse(&body) {
                Some(doc) => doc.message(),
                None => {
                    let text = String::from_utf8_lossy(&body).trim().to_string();
                    if text.is_empty() {
                        status
                            .canonical_reason()
                            .unwrap_or("request failed")
                            .to_string()
                    } else {
                        text
                    }
                }
            };
            Err(TfeError::Api {
                status: code,
                message,
            })
        }
    }
}

/// Prefix API error messages with what was being fetched
fn with_context(err: TfeError, context: &str) -> TfeError {
    match err {
        TfeError::Api { status, message } => TfeError::Api {
            status,
            message: format!("Failed to fetch {}: {}", context, message),
        },
        other => other,
    }
}

#[cfg(test)]
impl TfeClient {
    /// Create a test client pointing at a mock server
    ///
    /// Paths are mounted at the server root (no `/api/v2` prefix) and
    /// retries back off in milliseconds.
    pub fn test_client(base_url: &str) -> Self {
        let config = ClientConfig::new("test-token")
            .with_address(base_url)
            .with_retry(
                RetryPolicy::default()
                    .with_max_retries(3)
                    .with_wait(Duration::from_millis(1), Duration::from_millis(5)),
            );
        let mut client = Self::new(config).expect("test client");
        client.base_url = base_url.trim_end_matches('/').to_string();
        client
    }
}

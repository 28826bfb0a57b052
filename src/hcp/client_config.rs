//! Client configuration

use log::debug;
use std::time::Duration;

use crate::config::{address, api, defaults};
use crate::error::{Result, TfeError};
use crate::hcp::credentials::TokenResolver;
use crate::hcp::retry::RetryPolicy;

/// Settings used to build a `TfeClient`
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host, e.g. `https://app.terraform.io`
    pub address: String,
    /// API path prefix, normally `/api/v2/`
    pub base_path: String,
    /// Bearer token
    pub token: String,
    /// Extra headers sent with every request
    pub headers: Vec<(String, String)>,
    pub retry: RetryPolicy,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Configuration for the default address with the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            address: defaults::ADDRESS.to_string(),
            base_path: api::BASE_PATH.to_string(),
            token: token.into(),
            headers: Vec::new(),
            retry: RetryPolicy::default(),
            user_agent: defaults::USER_AGENT.to_string(),
            timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
        }
    }

    /// Build from the environment
    ///
    /// Address: `TFE_ADDRESS`, then `https://$TFE_HOSTNAME`, then the default.
    /// Token: see [`TokenResolver::resolve`].
    pub fn from_env() -> Result<Self> {
        let address = Self::address_from_env();
        let host = host_of(&address)?;
        let token = TokenResolver::new(&host).resolve(None)?;
        debug!("Configured client for {} from environment", address);
        Ok(Self::new(token).with_address(address))
    }

    fn address_from_env() -> String {
        if let Ok(addr) = std::env::var(address::ENV_VAR) {
            if !addr.is_empty() {
                return addr;
            }
        }
        if let Ok(host) = std::env::var(address::HOSTNAME_ENV_VAR) {
            if !host.is_empty() {
                return format!("https://{}", host);
            }
        }
        defaults::ADDRESS.to_string()
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Retry 5xx responses and transport errors as well as 429s
    pub fn with_retry_server_errors(mut self, enabled: bool) -> Self {
        self.retry.retry_server_errors = enabled;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full API root, e.g. `https://app.terraform.io/api/v2`
    pub fn api_url(&self) -> Result<String> {
        let base = url::Url::parse(&self.address)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(TfeError::Config(format!(
                "unsupported scheme in address '{}'",
                self.address
            )));
        }
        let path = format!("/{}", self.base_path.trim_matches('/'));
        let joined = base.join(&path)?;
        Ok(joined.as_str().trim_end_matches('/').to_string())
    }
}

/// Hostname part of an address, used to look up credentials
pub(crate) fn host_of(address: &str) -> Result<String> {
    let parsed = url::Url::parse(address)?;
    parsed
        .host_str()
        .map(|h| match parsed.port() {
            Some(port) => format!("{}:{}", h, port),
            None => h.to_string(),
        })
        .ok_or_else(|| TfeError::Config(format!("address '{}' has no host", address)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("token");
        assert_eq!(config.address, "https://app.terraform.io");
        assert_eq!(config.base_path, "/api/v2/");
        assert!(!config.retry.retry_server_errors);
    }

    #[test]
    fn test_api_url() {
        let config = ClientConfig::new("t").with_address("https://tfe.example.com/");
        assert_eq!(config.api_url().unwrap(), "https://tfe.example.com/api/v2");
    }

    #[test]
    fn test_api_url_custom_base_path() {
        let config = ClientConfig::new("t")
            .with_address("http://127.0.0.1:8080")
            .with_base_path("api/v2");
        assert_eq!(config.api_url().unwrap(), "http://127.0.0.1:8080/api/v2");
    }

    #[test]
    fn test_api_url_rejects_bad_address() {
        let config = ClientConfig::new("t").with_address("not a url");
        assert!(config.api_url().is_err());

        let config = ClientConfig::new("t").with_address("ftp://example.com");
        assert!(matches!(config.api_url(), Err(TfeError::Config(_))));
    }

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::new("t")
            .with_header("X-Custom", "1")
            .with_retry_server_errors(true)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.headers, vec![("X-Custom".to_string(), "1".to_string())]);
        assert!(config.retry.retry_server_errors);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://app.terraform.io").unwrap(), "app.terraform.io");
        assert_eq!(host_of("http://localhost:8080").unwrap(), "localhost:8080");
    }
}

/// Configuration constants for TFE API
pub mod api {
    /// Base path for TFE API v2
    pub const BASE_PATH: &str = "/api/v2/";

    /// Media type for JSON:API requests and responses
    pub const CONTENT_TYPE: &str = "application/vnd.api+json";

    pub const ORGANIZATIONS: &str = "organizations";
    pub const WORKSPACES: &str = "workspaces";
    pub const PROJECTS: &str = "projects";
    pub const TEAMS: &str = "teams";
    pub const RUNS: &str = "runs";

    /// Default page size for `fetch_all_pages`
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Maximum page size accepted by the API
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Maximum concurrent page requests when fetching all pages
    pub const MAX_CONCURRENT_PAGE_REQUESTS: usize = 10;

    /// Response headers carrying remote version information
    pub const HEADER_API_VERSION: &str = "TFP-API-Version";
    pub const HEADER_TFE_VERSION: &str = "X-TFE-Version";
    pub const HEADER_APP_NAME: &str = "TFP-AppName";
    pub const HEADER_RATE_LIMIT: &str = "X-RateLimit-Limit";
    pub const HEADER_RATE_RESET: &str = "X-RateLimit-Reset";

    /// Application name reported by HCP Terraform (as opposed to Enterprise)
    pub const CLOUD_APP_NAME: &str = "HCP Terraform";
}

/// Configuration constants for credentials
pub mod credentials {
    /// Credentials file name
    pub const FILE_NAME: &str = "terraform.d/credentials.tfrc.json";

    /// Path to Terraform credentials file on Unix (relative to HOME)
    pub const FILE_PATH_UNIX: &str = ".terraform.d/credentials.tfrc.json";

    /// Environment variable names for token (checked in order)
    pub const TOKEN_ENV_VARS: &[&str] = &["TFE_TOKEN", "TFC_TOKEN", "HCP_TOKEN"];
}

/// Environment variables for the API endpoint
pub mod address {
    /// Full address, e.g. `https://tfe.example.com`
    pub const ENV_VAR: &str = "TFE_ADDRESS";

    /// Bare hostname, used when `TFE_ADDRESS` is not set
    pub const HOSTNAME_ENV_VAR: &str = "TFE_HOSTNAME";
}

/// Retry tuning
pub mod retry {
    use std::time::Duration;

    pub const MAX_RETRIES: u32 = 30;
    pub const WAIT_MIN: Duration = Duration::from_millis(100);
    pub const WAIT_MAX: Duration = Duration::from_millis(400);
}

/// Log polling tuning
pub mod logs {
    pub const BACKOFF_MIN_MS: f64 = 1000.0;
    pub const BACKOFF_MAX_MS: f64 = 3000.0;

    /// Extra reads allowed after the owner finished but before ETX arrived
    pub const TRUNCATED_READ_LIMIT: u32 = 10;

    /// Bytes requested per log chunk
    pub const CHUNK_SIZE: usize = 64 * 1024;

    /// Policy check output is only available once the check has run
    pub const POLICY_CHECK_POLL_MS: u64 = 500;
    pub const POLICY_CHECK_MAX_POLLS: u32 = 1200;
}

/// Default values
pub mod defaults {
    /// Default TFE address
    pub const ADDRESS: &str = "https://app.terraform.io";

    pub const USER_AGENT: &str = concat!("tfe-client/", env!("CARGO_PKG_VERSION"));

    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

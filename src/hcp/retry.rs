//! Retry policy for API requests
//!
//! Rate-limited responses (429) are always retried. Server errors and
//! transport failures are retried only when `retry_server_errors` is enabled.

use rand::Rng;
use reqwest::header::HeaderMap;
use std::time::Duration;

use crate::config::{api, retry};

/// Retry settings shared by every request issued through `TfeClient`
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Lower bound for backoff
    pub wait_min: Duration,
    /// Upper bound for backoff
    pub wait_max: Duration,
    /// Also retry 5xx responses and transport errors
    pub retry_server_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: retry::MAX_RETRIES,
            wait_min: retry::WAIT_MIN,
            wait_max: retry::WAIT_MAX,
            retry_server_errors: false,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_wait(mut self, min: Duration, max: Duration) -> Self {
        self.wait_min = min;
        self.wait_max = max.max(min);
        self
    }

    pub fn with_server_errors(mut self, enabled: bool) -> Self {
        self.retry_server_errors = enabled;
        self
    }

    /// Whether a response with this status should be retried
    pub fn should_retry_status(&self, status: u16) -> bool {
        status == 429 || (self.retry_server_errors && status >= 500)
    }

    /// Whether a transport error should be retried
    pub fn should_retry_error(&self, err: &reqwest::Error) -> bool {
        self.retry_server_errors && (err.is_connect() || err.is_timeout() || err.is_request())
    }

    /// Backoff before retry number `attempt` (1-based)
    ///
    /// 429 responses wait at least as long as `X-RateLimit-Reset` asks for,
    /// plus jitter; everything else backs off exponentially.
    pub fn backoff(&self, attempt: u32, status: Option<u16>, headers: Option<&HeaderMap>) -> Duration {
        if status == Some(429) {
            let reset = headers.and_then(rate_limit_reset);
            return self.rate_limit_backoff(reset);
        }
        self.exponential_backoff(attempt)
    }

    fn rate_limit_backoff(&self, reset_secs: Option<f64>) -> Duration {
        let spread = self.wait_max.saturating_sub(self.wait_min);
        let jitter = if spread.is_zero() {
            Duration::ZERO
        } else {
            spread.mul_f64(rand::thread_rng().gen_range(0.0..1.0))
        };

        let mut min = self.wait_min;
        if let Some(reset) = reset_secs {
            if reset > 0.0 {
                let reset = Duration::from_secs_f64(reset);
                if reset > min {
                    min = reset;
                }
            }
        }
        min + jitter
    }

    fn exponential_backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.min(16));
        let backoff = self.wait_min.saturating_mul(factor);
        backoff.min(self.wait_max)
    }
}

/// Seconds until the rate limit window resets, from `X-RateLimit-Reset`
pub fn rate_limit_reset(headers: &HeaderMap) -> Option<f64> {
    headers
        .get(api::HEADER_RATE_RESET)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
}

//! Validation and polling helpers shared by the resource modules

use log::debug;
use std::future::Future;
use std::time::Duration;

use crate::error::{Result, TfeError, ValidationError};

/// Non-empty string
pub fn valid_string(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.is_empty())
}

/// Identifier safe to put in a URL path: `[A-Za-z0-9._-]+`
pub fn valid_string_id(value: Option<&str>) -> bool {
    match value {
        Some(v) if !v.is_empty() => v
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')),
        _ => false,
    }
}

/// Loose email check: something on both sides of a single `@`
pub fn valid_email(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        _ => false,
    }
}

/// Return `err` unless `value` is a valid path identifier
pub fn require_id(value: &str, err: ValidationError) -> Result<()> {
    if valid_string_id(Some(value)) {
        Ok(())
    } else {
        Err(TfeError::Validation(err))
    }
}

/// Organization names go straight into URL paths
pub fn require_org(organization: &str) -> Result<()> {
    require_id(organization, ValidationError::InvalidOrg)
}

/// Call `check` until it yields `Some`, sleeping `interval` between attempts
///
/// Gives up with `TfeError::Timeout` after `max_attempts`.
pub async fn poll_until<T, F, Fut>(
    what: &str,
    interval: Duration,
    max_attempts: u32,
    mut check: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    for attempt in 1..=max_attempts {
        if let Some(value) = check().await? {
            return Ok(value);
        }
        debug!(
            "Waiting for {} (attempt {}/{})",
            what, attempt, max_attempts
        );
        if attempt < max_attempts {
            tokio::time::sleep(interval).await;
        }
    }
    Err(TfeError::Timeout(format!("waiting for {}", what)))
}
